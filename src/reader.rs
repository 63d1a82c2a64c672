//! Read-side operations on the thrall store: listing, searching, detail lookup

use rusqlite::{params_from_iter, OptionalExtension};

use crate::error::{QueryError, Result, ThrallError};
use crate::filter::Filter;
use crate::parser::ThrallRecord;
use crate::schema::{ThrallClass, COLUMNS, NOT_AVAILABLE};
use crate::writer::ThrallStore;

impl ThrallStore {
    /// All names in a class table, ascending
    pub fn list_names(&self, class: ThrallClass) -> Result<Vec<String>> {
        Ok(self.select_names(class, &Filter::default())?)
    }

    /// Names matching a condition string, ascending. An empty string matches everything.
    pub fn search(
        &self,
        class: ThrallClass,
        query: &str,
    ) -> std::result::Result<Vec<String>, QueryError> {
        let filter = Filter::parse(query)?;
        log::debug!("Searching {} with {:?} {:?}", class, filter.clause, filter.params);
        self.select_names(class, &filter)
    }

    /// Full record for a name
    pub fn get_record(&self, class: ThrallClass, name: &str) -> Result<ThrallRecord> {
        let columns: Vec<String> = COLUMNS.iter().map(|c| format!("\"{}\"", c.name)).collect();
        let sql = format!(
            "SELECT {} FROM \"{}\" WHERE \"name\" = ?",
            columns.join(", "),
            class.table_name()
        );

        let values = self
            .conn()
            .query_row(&sql, [name], |row| {
                (0..COLUMNS.len())
                    .map(|idx| {
                        let value: Option<String> = row.get(idx)?;
                        Ok(value.unwrap_or_else(|| NOT_AVAILABLE.to_string()))
                    })
                    .collect::<rusqlite::Result<Vec<String>>>()
            })
            .optional()?;

        match values {
            Some(values) => Ok(ThrallRecord::from_values(values)),
            None => Err(ThrallError::NotFound {
                class,
                name: name.to_string(),
            }),
        }
    }

    fn select_names(
        &self,
        class: ThrallClass,
        filter: &Filter,
    ) -> std::result::Result<Vec<String>, QueryError> {
        let sql = format!(
            "SELECT \"name\" FROM \"{}\"{} ORDER BY \"name\" ASC",
            class.table_name(),
            filter.where_sql()
        );

        let mut stmt = self.conn().prepare(&sql)?;
        let names = stmt
            .query_map(params_from_iter(filter.params.iter()), |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }
}
