use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "thrall-db")]
#[command(version, about = "Import Conan Exiles thrall files into SQLite and search them")]
pub struct Cli {
    /// SQLite database path (default: thralls.db in the user data directory)
    #[arg(long, global = true, env = "THRALL_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create any missing class tables
    Init,

    /// Import thrall files (directories contribute their *.txt files)
    Import {
        /// Files or directories to import
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Show a full-screen progress view
        #[arg(long, conflicts_with = "quiet")]
        tui: bool,

        /// Print nothing but errors
        #[arg(short, long)]
        quiet: bool,
    },

    /// List all thrall class names
    Classes,

    /// List every thrall name of a class
    List {
        /// Thrall class (e.g. Archer)
        class: String,
    },

    /// Search a class with conditions like "Agility>25 AND Gender=female"
    Search {
        /// Thrall class (e.g. Archer)
        class: String,

        /// Condition string; empty matches everything
        #[arg(default_value = "")]
        query: String,
    },

    /// Show all fields of one thrall
    Show {
        /// Thrall class (e.g. Archer)
        class: String,

        /// Thrall name (case-sensitive)
        name: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
