use directories::ProjectDirs;
use rusqlite::{params_from_iter, Connection};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::schema_gen::{generate_create_table, generate_upsert};
use crate::error::{Result, ThrallError};
use crate::filter::register_functions;
use crate::parser::{parse_file, validate_class, FieldMap, ThrallRecord};
use crate::schema::{ThrallClass, ALL_CLASSES};
use crate::ui::{Phase, Ui};

/// File name of the store inside the data directory
pub const DB_FILE_NAME: &str = "thralls.db";

/// Handle on the thrall database
pub struct ThrallStore {
    conn: Connection,
}

impl ThrallStore {
    /// Open (or create) the database at `db_path` and make sure every class table exists
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        log::debug!("Opened thrall database {:?}", db_path);
        Self::from_connection(conn)
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        register_functions(&conn)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Create any missing class tables. Existing tables are never altered.
    pub fn init_schema(&self) -> Result<()> {
        for class in ALL_CLASSES {
            self.conn.execute(&generate_create_table(*class), [])?;
        }
        log::debug!("Schema ready ({} class tables)", ALL_CLASSES.len());
        Ok(())
    }

    /// Insert the record, or overwrite every column of the row with the same name
    pub fn upsert(&self, class: ThrallClass, record: &ThrallRecord) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(&generate_upsert(class))?;
        stmt.execute(params_from_iter(record.values()))?;
        log::info!("Upserted {} {:?}", class, record.name());
        Ok(())
    }

    /// Validate and store one parsed file. Nothing is written for an unknown class.
    /// The stored `class` is the canonical name of the table the row lands in.
    pub fn ingest(&self, fields: &FieldMap) -> Result<(ThrallClass, ThrallRecord)> {
        let class = validate_class(fields)?;
        let record = ThrallRecord::from_fields(fields).with_class(class);
        self.upsert(class, &record)?;
        Ok((class, record))
    }

    /// Parse and store a single thrall file
    pub fn ingest_file(&self, path: &Path) -> Result<(ThrallClass, ThrallRecord)> {
        let fields = parse_file(path)?;
        self.ingest(&fields)
    }
}

/// Resolve the database location: the given path, or `thralls.db` in the
/// per-user data directory (created if missing).
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom {
        return Ok(path);
    }

    let data_dir = match ProjectDirs::from("", "", "thrall-db") {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => {
            log::warn!(
                "No user data directory available, using {} in the current directory",
                DB_FILE_NAME
            );
            PathBuf::from(".")
        }
    };

    fs::create_dir_all(&data_dir).map_err(|source| ThrallError::Io {
        path: data_dir.clone(),
        source,
    })?;

    Ok(data_dir.join(DB_FILE_NAME))
}

/// Per-file result of a batch import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Success { class: ThrallClass, name: String },
    InvalidClass(String),
    Error(String),
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::Success { .. })
    }
}

impl From<Result<(ThrallClass, ThrallRecord)>> for ImportOutcome {
    fn from(result: Result<(ThrallClass, ThrallRecord)>) -> Self {
        match result {
            Ok((class, record)) => ImportOutcome::Success {
                class,
                name: record.name().to_string(),
            },
            Err(ThrallError::InvalidClass(value)) => ImportOutcome::InvalidClass(value),
            Err(e) => ImportOutcome::Error(e.to_string()),
        }
    }
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportOutcome::Success { .. } => write!(f, "SUCCESS"),
            ImportOutcome::InvalidClass(value) => write!(f, "INVALID CLASS: {}", value),
            ImportOutcome::Error(detail) => write!(f, "ERROR - {}", detail),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportReport {
    pub path: PathBuf,
    pub outcome: ImportOutcome,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.path.to_string_lossy());
        write!(f, "{}: {}", file_name, self.outcome)
    }
}

/// Expand the given paths into the list of files to import.
///
/// Directories contribute their `*.txt` files (not recursive); plain file
/// paths are kept as given, even if they do not exist, so the import can
/// report them.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let entries = fs::read_dir(path).map_err(|source| ThrallError::Io {
            path: path.clone(),
            source,
        })?;

        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_text_file(p))
            .collect();
        found.sort();
        log::debug!("Found {} text files in {:?}", found.len(), path);
        files.extend(found);
    }

    Ok(files)
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

/// Import files one after another. A failing file is reported and the batch
/// moves on; the returned reports line up with `files`.
pub fn import_files(store: &ThrallStore, files: &[PathBuf], ui: &mut impl Ui) -> Vec<ImportReport> {
    ui.set_phase(Phase::Importing);
    ui.set_info(format!("Processing {} file(s)...", files.len()));

    let total = files.len() as u64;
    let mut reports = Vec::with_capacity(files.len());

    for (idx, path) in files.iter().enumerate() {
        let outcome = ImportOutcome::from(store.ingest_file(path));
        match &outcome {
            ImportOutcome::Success { .. } => {}
            ImportOutcome::InvalidClass(value) => {
                log::warn!("Skipped {:?}: invalid class {:?}", path, value)
            }
            ImportOutcome::Error(detail) => log::warn!("Failed to import {:?}: {}", path, detail),
        }

        let report = ImportReport {
            path: path.clone(),
            outcome,
        };
        ui.file_done(&report, idx as u64 + 1, total);
        reports.push(report);
    }

    ui.set_info("Processing Complete");
    reports
}
