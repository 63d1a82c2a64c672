pub mod schema_gen;
pub mod sqlite;

pub use sqlite::{
    collect_input_files, import_files, resolve_db_path, ImportOutcome, ImportReport, ThrallStore,
};
