//! Table sourcing: the collaborator seam that produces a complete `RawTable`.
//!
//! The shipped implementation reads a local CSV file. The remote spreadsheet
//! fetch (retry/backoff, HTTP) lives outside this crate; anything that can
//! hand over a `RawTable` satisfies [`TableSource`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::query::CentroidLookup;
use crate::table::{RawTable, RawValue};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("FileNotFound: {0}")]
    FileNotFound(String),
    #[error("MalformedTable: {0}")]
    Malformed(String),
}

/// Anything that can produce a complete raw table in one synchronous call.
pub trait TableSource {
    fn fetch(&self) -> Result<RawTable, SourceError>;
}

/// Local CSV fallback source.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvFileSource { path: path.into() }
    }
}

impl TableSource for CsvFileSource {
    fn fetch(&self) -> Result<RawTable, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::FileNotFound(self.path.display().to_string()));
        }
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| SourceError::Malformed(e.to_string()))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| SourceError::Malformed(e.to_string()))?;
            let mut row: Vec<RawValue> = record.iter().map(parse_cell).collect();
            // Ragged rows are padded so every row spans the full schema.
            row.resize(columns.len(), RawValue::Empty);
            rows.push(row);
        }

        Ok(RawTable { columns, rows })
    }
}

/// Coerce one CSV cell: empty string -> Empty, then date, then number, then
/// plain text.
fn parse_cell(cell: &str) -> RawValue {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return RawValue::Empty;
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return RawValue::Date(date);
        }
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return RawValue::Number(n);
    }
    RawValue::Text(trimmed.to_string())
}

/// Expected spreadsheet shape, printed when the source cannot be loaded.
pub fn source_guidance() -> String {
    let guide = r#"Expected spreadsheet columns:
  'PAÍS/ESTADO (ISO3)' -> e.g. 'United Kingdom (GBR)' or 'Amazonas (AM)'
  'NÚMERO'             -> e.g. '01280.000381/2023-95' (carries the year)
  'STATUS'
  'TIPO DE PROCESSO'
  'Contatos' or 'PESQUISADOR' -> responsible researcher
Place the CSV export at the path named by source.fallback in config.yaml."#;
    guide.to_string()
}

// A handful of large partners whose centroids are useful even without a
// centroid file.
const FALLBACK_CENTROIDS: &[(&str, (f64, f64))] = &[
    ("CHN", (35.0, 103.0)),
    ("USA", (37.0, -95.0)),
    ("GBR", (54.0, -2.0)),
    ("FRA", (46.0, 2.0)),
    ("DEU", (51.0, 10.0)),
    ("JPN", (36.0, 138.0)),
    ("IND", (20.0, 77.0)),
    ("CAN", (56.0, -106.0)),
    ("AUS", (-25.0, 133.0)),
    ("RUS", (60.0, 100.0)),
];

/// Load `code,lat,lon` centroids from a CSV file, merged over the static
/// fallbacks. A missing or unreadable file degrades to the fallbacks alone.
pub fn load_centroids(path: Option<&Path>) -> CentroidLookup {
    let mut centroids: CentroidLookup = HashMap::new();

    if let Some(path) = path {
        if let Ok(mut reader) = csv::Reader::from_path(path) {
            for record in reader.records().flatten() {
                let code = record.get(0).unwrap_or("").trim().to_string();
                let lat = record.get(1).and_then(|v| v.trim().parse::<f64>().ok());
                let lon = record.get(2).and_then(|v| v.trim().parse::<f64>().ok());
                if let (false, Some(lat), Some(lon)) = (code.is_empty(), lat, lon) {
                    centroids.insert(code, (lat, lon));
                }
            }
        }
    }

    for (code, coords) in FALLBACK_CENTROIDS {
        centroids.entry(code.to_string()).or_insert(*coords);
    }
    centroids
}
