//! Raw tabular data and schema resolution.
//!
//! Spreadsheet columns are not fixed identifiers; they are discovered by
//! case-insensitive substring match. Resolution happens once, up front, and
//! yields typed column indices — a missing location column is a configuration
//! error that aborts the run before any row is touched.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One spreadsheet cell, coerced at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Empty,
}

impl RawValue {
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text rendering of the cell, `None` for empty cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Empty => None,
            RawValue::Text(s) => {
                if s.trim().is_empty() {
                    None
                } else {
                    Some(s.clone())
                }
            }
            RawValue::Number(n) => {
                if n.fract() == 0.0 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(format!("{}", n))
                }
            }
            RawValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }

    /// Year carried by the cell, for the year-inference fallback chain:
    /// dates yield their year, numbers yield themselves when they already are
    /// a 20xx year.
    pub fn year_hint(&self) -> Option<i32> {
        match self {
            RawValue::Date(d) => Some(d.year()),
            RawValue::Number(n) => {
                let y = *n as i32;
                if (2000..=2099).contains(&y) && n.fract() == 0.0 {
                    Some(y)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// An ordered raw table: column names plus rows of cells. Immutable once
/// loaded; each row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("location column not found; available columns: {available:?}")]
    LocationColumnMissing { available: Vec<String> },
}

/// Typed, validated column references resolved before the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// The mandatory country/state column.
    pub location: usize,
    pub process_number: Option<usize>,
    pub process_type: Option<usize>,
    pub status: Option<usize>,
    pub researcher: Option<usize>,
    /// Candidate date/year columns, in table order.
    pub date_candidates: Vec<usize>,
}

fn find_containing(columns: &[String], needles: &[&str]) -> Option<usize> {
    columns.iter().position(|c| {
        let upper = c.to_uppercase();
        needles.iter().any(|n| upper.contains(n))
    })
}

/// Discover the columns of interest. Only the location column is mandatory;
/// everything else degrades to per-field defaults downstream.
pub fn resolve_schema(columns: &[String]) -> Result<Schema, SchemaError> {
    let location = find_containing(columns, &["PAÍS", "PAIS"]).ok_or_else(|| {
        SchemaError::LocationColumnMissing { available: columns.to_vec() }
    })?;

    // "Contatos" is preferred over the legacy "PESQUISADOR" column.
    let researcher = find_containing(columns, &["CONTATOS"])
        .or_else(|| find_containing(columns, &["PESQUISADOR"]));

    let date_candidates = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| {
            let upper = c.to_uppercase();
            ["DATA", "ANO", "YEAR", "DATE"].iter().any(|kw| upper.contains(kw))
        })
        .map(|(i, _)| i)
        .collect();

    Ok(Schema {
        location,
        process_number: find_containing(columns, &["NÚMERO", "NUMERO"]),
        process_type: find_containing(columns, &["TIPO DE PROCESSO"]),
        status: find_containing(columns, &["STATUS"]),
        researcher,
        date_candidates,
    })
}
