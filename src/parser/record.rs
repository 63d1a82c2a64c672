use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::{Result, ThrallError};
use crate::schema::{get_class, normalize_field_name, ThrallClass, COLUMNS, NOT_AVAILABLE};

/// Fields read from one source file, keyed by lower-cased field name
pub type FieldMap = BTreeMap<String, String>;

/// Parse `key = value` lines into a field map.
///
/// Lines without `=` are skipped. The split happens on the first `=`, both
/// halves are trimmed, and an empty value becomes the `N/A` sentinel.
/// A repeated key keeps its last value.
pub fn parse_fields(text: &str) -> FieldMap {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut fields = FieldMap::new();

    for line in text.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };

        let value = value.trim();
        let value = if value.is_empty() { NOT_AVAILABLE } else { value };
        fields.insert(key.trim().to_lowercase(), value.to_string());
    }

    fields
}

/// Read and parse a thrall file
pub fn parse_file(path: &Path) -> Result<FieldMap> {
    let text = std::fs::read_to_string(path).map_err(|source| ThrallError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let fields = parse_fields(&text);
    log::debug!("Parsed {} fields from {:?}", fields.len(), path);
    Ok(fields)
}

/// Resolve the `class` field against the known classes.
///
/// The error carries the offending value upper-cased (empty when absent).
pub fn validate_class(fields: &FieldMap) -> Result<ThrallClass> {
    let raw = fields.get("class").map(String::as_str).unwrap_or("");
    get_class(raw).ok_or_else(|| ThrallError::InvalidClass(raw.to_uppercase()))
}

/// One row of a class table, all values in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrallRecord {
    values: Vec<String>,
}

impl ThrallRecord {
    /// Map a field map onto the fixed column set, filling gaps with `N/A`.
    /// Keys that match no column are ignored.
    pub fn from_fields(fields: &FieldMap) -> Self {
        let by_column: HashMap<String, &str> = fields
            .iter()
            .map(|(key, value)| (normalize_field_name(key), value.as_str()))
            .collect();

        let values = COLUMNS
            .iter()
            .map(|col| {
                by_column
                    .get(col.name)
                    .copied()
                    .unwrap_or(NOT_AVAILABLE)
                    .to_string()
            })
            .collect();

        Self { values }
    }

    /// Replace the `class` value with the canonical class name
    pub fn with_class(mut self, class: ThrallClass) -> Self {
        if let Some(idx) = COLUMNS.iter().position(|c| c.name == "class") {
            self.values[idx] = class.name().to_string();
        }
        self
    }

    /// Build from values already in column order (one per column)
    pub(crate) fn from_values(values: Vec<String>) -> Self {
        debug_assert_eq!(values.len(), COLUMNS.len());
        Self { values }
    }

    pub fn name(&self) -> &str {
        &self.values[0]
    }

    /// Value of a column by identifier or label
    pub fn get(&self, field: &str) -> Option<&str> {
        let normalized = normalize_field_name(field);
        COLUMNS
            .iter()
            .position(|c| c.name == normalized)
            .map(|idx| self.values[idx].as_str())
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// `(label, value)` pairs in column order, for detail views
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        COLUMNS
            .iter()
            .zip(&self.values)
            .map(|(col, value)| (col.label, value.as_str()))
    }
}

impl Serialize for ThrallRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(COLUMNS.len()))?;
        for (col, value) in COLUMNS.iter().zip(&self.values) {
            map.serialize_entry(col.name, value)?;
        }
        map.end()
    }
}
