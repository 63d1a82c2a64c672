//! Translates search condition strings into parameterized SQL filters.
//!
//! The accepted language is a conjunction of conditions joined by ` AND `:
//!
//! ```text
//! Agility>25 AND Gender=female AND Level Rate>=fast
//! ```
//!
//! Field names resolve against the fixed column set and are never taken from
//! the input verbatim. Values are always bound as parameters.

use rusqlite::functions::FunctionFlags;
use rusqlite::types::{Value, ValueRef};
use rusqlite::Connection;
use std::fmt;

use crate::error::QueryError;
use crate::schema::{get_column, Column};

/// SQL function the numeric comparisons rely on: `is_number(x)` is 1 when
/// `x` is an integer, a real, or text that parses as a finite number.
pub const IS_NUMBER_FN: &str = "is_number";

/// Literal separator between conditions (case-sensitive)
pub const CONJUNCTION: &str = " AND ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    GreaterOrEqual,
    LessOrEqual,
    Greater,
    Less,
    Equal,
}

impl Operator {
    /// Match order. Two-character operators come first so `=` never splits `>=`/`<=`.
    pub const PRIORITY: [Operator; 5] = [
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
        Operator::Greater,
        Operator::Less,
        Operator::Equal,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::Equal => "=",
        }
    }

    fn is_ordering(self) -> bool {
        !matches!(self, Operator::Equal)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `field OP value` test
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: &'static Column,
    pub operator: Operator,
    pub value: String,
}

impl Condition {
    /// Ordering comparisons against a numeric value compare numerically
    fn numeric_value(&self) -> Option<f64> {
        if !self.operator.is_ordering() {
            return None;
        }
        parse_number(&self.value)
    }
}

/// Parse text as a finite number. "N/A", "fast", "12%" and "NaN" are not numbers.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Register the SQL functions a `Filter` needs on a connection
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        IS_NUMBER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            Ok(match ctx.get_raw(0) {
                ValueRef::Integer(_) | ValueRef::Real(_) => true,
                ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                    .ok()
                    .and_then(parse_number)
                    .is_some(),
                ValueRef::Null | ValueRef::Blob(_) => false,
            })
        },
    )
}

/// Parse one condition. The first operator in priority order that occurs
/// anywhere in the text decides the split point.
pub fn parse_condition(text: &str) -> Result<Condition, QueryError> {
    let (operator, field, value) = Operator::PRIORITY
        .iter()
        .find_map(|op| {
            text.split_once(op.as_str())
                .map(|(field, value)| (*op, field, value))
        })
        .ok_or_else(|| QueryError::MalformedCondition(text.to_string()))?;

    let column =
        get_column(field).ok_or_else(|| QueryError::UnknownField(field.trim().to_string()))?;

    Ok(Condition {
        column,
        operator,
        value: value.trim().to_string(),
    })
}

/// Parse a full condition string. An empty (or blank) string yields no conditions.
pub fn parse_query(query: &str) -> Result<Vec<Condition>, QueryError> {
    query
        .trim()
        .split(CONJUNCTION)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_condition)
        .collect()
}

/// WHERE clause text plus the parameters it binds, in order
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub clause: String,
    pub params: Vec<Value>,
}

impl Filter {
    pub fn from_conditions(conditions: &[Condition]) -> Self {
        let mut parts = Vec::with_capacity(conditions.len());
        let mut params = Vec::with_capacity(conditions.len());

        for cond in conditions {
            let column = cond.column.name;
            match cond.numeric_value() {
                Some(number) => {
                    // CAST turns any text into a number, so only numeric cells take part
                    parts.push(format!(
                        "({IS_NUMBER_FN}(\"{column}\") AND CAST(\"{column}\" AS REAL) {} ?)",
                        cond.operator
                    ));
                    params.push(Value::Real(number));
                }
                None => {
                    parts.push(format!("\"{column}\" {} ?", cond.operator));
                    params.push(Value::Text(cond.value.clone()));
                }
            }
        }

        Self {
            clause: parts.join(" AND "),
            params,
        }
    }

    pub fn parse(query: &str) -> Result<Self, QueryError> {
        Ok(Self::from_conditions(&parse_query(query)?))
    }

    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// ` WHERE ...`, or nothing for an empty filter
    pub fn where_sql(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clause)
        }
    }
}
