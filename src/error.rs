use std::path::PathBuf;
use thiserror::Error;

use crate::schema::ThrallClass;

#[derive(Error, Debug)]
pub enum ThrallError {
    #[error("INVALID CLASS: {0}")]
    InvalidClass(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("No {class} named {name:?}")]
    NotFound { class: ThrallClass, name: String },
}

/// Failures while translating or running a search condition string
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Malformed condition (expected field, operator, value): {0:?}")]
    MalformedCondition(String),

    #[error("{0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, ThrallError>;
