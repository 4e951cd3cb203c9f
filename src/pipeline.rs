//! Record enrichment pipeline: raw table in, normalized records out.
//!
//! Pure function of the raw table and the injected lookup tables. The only
//! failure mode is schema resolution (no location column); every row-level
//! anomaly degrades to a documented default instead of aborting the run.

use serde::{Deserialize, Serialize};

use crate::location::{parse_location, Location};
use crate::lookups::Lookups;
use crate::modality::{classify_modality, Modality};
use crate::status::is_in_force;
use crate::table::{resolve_schema, RawTable, SchemaError};
use crate::year::infer_year;

pub const NOT_INFORMED: &str = "Not informed";

/// One enriched row. Created once per pipeline run, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub process_number: Option<String>,
    pub location: Location,
    pub process_type: String,
    pub modality: Modality,
    pub responsible_researcher: String,
    pub status_text: String,
    pub in_force: bool,
    pub signing_year: Option<i32>,
    pub continent: String,
}

/// Enrich every raw row, preserving row order. Fails fast only when the
/// mandatory location column cannot be identified.
pub fn normalize(table: &RawTable, lookups: &Lookups) -> Result<Vec<NormalizedRecord>, SchemaError> {
    let schema = resolve_schema(&table.columns)?;

    let records = table
        .rows
        .iter()
        .map(|row| {
            let text_at = |col: Option<usize>| -> Option<String> {
                col.and_then(|c| row.get(c)).and_then(|v| v.as_text())
            };

            let location_text = text_at(Some(schema.location));
            let location = parse_location(location_text.as_deref(), lookups);

            let process_type_text = text_at(schema.process_type);
            let modality = classify_modality(process_type_text.as_deref());

            let status_text = text_at(schema.status).unwrap_or_default();
            // Continent depends on the parsed location, so it runs last.
            let continent = location
                .continent(lookups)
                .unwrap_or(NOT_INFORMED)
                .to_string();

            NormalizedRecord {
                process_number: text_at(schema.process_number),
                in_force: is_in_force(&status_text),
                signing_year: infer_year(row, &schema),
                process_type: process_type_text.unwrap_or_else(|| NOT_INFORMED.to_string()),
                modality,
                responsible_researcher: text_at(schema.researcher)
                    .unwrap_or_else(|| NOT_INFORMED.to_string()),
                status_text,
                continent,
                location,
            }
        })
        .collect();

    Ok(records)
}
