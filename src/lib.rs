pub mod cli;
pub mod error;
pub mod filter;
pub mod parser;
pub mod reader;
pub mod schema;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use error::{QueryError, Result, ThrallError};
pub use parser::ThrallRecord;
pub use schema::ThrallClass;
pub use ui::{ConsoleUi, Phase, SilentUi, Tally, Ui, UiApp};
pub use writer::{ImportOutcome, ImportReport, ThrallStore};
