//! Signing-year inference.
//!
//! Process numbers like `01280.000381/2023-95` embed the year after the
//! slash; that source is authoritative. Date/year columns are a heterogeneous
//! fallback scanned in schema order.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::{RawValue, Schema};

static SLASH_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"/(20\d{2})\b").unwrap());
static BARE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(20\d{2})\b").unwrap());

/// Year embedded in a process-number string, if any.
pub fn year_from_process_number(number: &str) -> Option<i32> {
    SLASH_YEAR
        .captures(number)
        .and_then(|c| c[1].parse().ok())
}

/// Infer the signing year for one row: process number first, then the
/// candidate date/year columns in order. No match anywhere means the year is
/// simply absent.
pub fn infer_year(row: &[RawValue], schema: &Schema) -> Option<i32> {
    if let Some(col) = schema.process_number {
        if let Some(text) = row.get(col).and_then(|v| v.as_text()) {
            if let Some(year) = year_from_process_number(&text) {
                return Some(year);
            }
        }
    }

    for &col in &schema.date_candidates {
        let value = match row.get(col) {
            Some(v) if !v.is_empty() => v,
            _ => continue,
        };
        if let Some(year) = value.year_hint() {
            return Some(year);
        }
        if let Some(text) = value.as_text() {
            if let Some(c) = BARE_YEAR.captures(&text) {
                if let Ok(year) = c[1].parse() {
                    return Some(year);
                }
            }
        }
    }

    None
}
