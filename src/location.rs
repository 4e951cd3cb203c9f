//! Parser for the raw "country or Brazilian state" column.
//!
//! Values look like `"United Kingdom (GBR)"`, `"Amazonas (AM)"`, or a bare
//! country name. The trailing parenthesized code decides everything: a
//! 3-letter code is an ISO3 country, a 2-letter code is accepted only when it
//! is one of the 27 Brazilian states. Anything else degrades to a plain
//! country name.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lookups::Lookups;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationLevel {
    #[serde(rename = "country")]
    Country,
    #[serde(rename = "brazilian_state")]
    BrazilianState,
}

/// Structured location derived from one raw cell.
///
/// Invariant: `state_code` is present iff `level == BrazilianState`, and a
/// state-level location always carries `country_name = "Brazil"`,
/// `iso3 = "BRA"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub level: LocationLevel,
    pub country_name: Option<String>,
    pub iso3: Option<String>,
    pub state_code: Option<String>,
    pub state_name: Option<String>,
}

impl Location {
    fn empty() -> Self {
        Location {
            level: LocationLevel::Country,
            country_name: None,
            iso3: None,
            state_code: None,
            state_name: None,
        }
    }

    fn country(name: Option<String>, iso3: Option<String>) -> Self {
        Location {
            level: LocationLevel::Country,
            country_name: name,
            iso3,
            state_code: None,
            state_name: None,
        }
    }

    /// Continent label for this location, if mapped. Brazilian states carry no
    /// ISO3 of their own, so anything resolving to Brazil is pinned to
    /// South America without consulting the table.
    pub fn continent(&self, lookups: &Lookups) -> Option<&'static str> {
        if self.level == LocationLevel::BrazilianState || self.iso3.as_deref() == Some("BRA") {
            return Some("South America");
        }
        self.iso3.as_deref().and_then(|iso| lookups.continent(iso))
    }
}

// Parenthesized code-shaped tokens: short alphanumeric runs, plus the literal
// junk values (-99, N/A) the source data carries. Longer parentheticals such
// as "(Region)" are not candidate codes.
static CODE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*([A-Za-z0-9/\-]{2,4})\s*\)").unwrap());
static TRAILING_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)\s*$").unwrap());

const INVALID_CODES: &[&str] = &["-99", "NULL", "N/A", "NA"];

fn strip_trailing_paren(s: &str) -> String {
    TRAILING_PAREN.replace(s, "").trim().to_string()
}

/// Parse a raw location cell. Total: every input yields a `Location`;
/// missing/blank input yields an all-empty country-level record.
pub fn parse_location(raw: Option<&str>, lookups: &Lookups) -> Location {
    let s = match raw {
        Some(v) if !v.trim().is_empty() => v.trim(),
        _ => return Location::empty(),
    };

    // Only the last code-shaped parenthetical is authoritative
    // ("Some Place (Region) (GBR)" -> GBR).
    let code = CODE_TOKEN
        .captures_iter(s)
        .last()
        .map(|c| c[1].to_uppercase());
    let code = match code {
        Some(c) => c,
        None => return Location::country(Some(s.to_string()), None),
    };

    let is_alpha = code.chars().all(|c| c.is_ascii_alphabetic());
    if INVALID_CODES.contains(&code.as_str()) || code.chars().all(|c| c.is_ascii_digit()) {
        return Location::country(Some(strip_trailing_paren(s)), None);
    }

    if code.len() == 2 && is_alpha {
        if let Some(name) = lookups.state_name(&code) {
            return Location {
                level: LocationLevel::BrazilianState,
                country_name: Some("Brazil".to_string()),
                iso3: Some("BRA".to_string()),
                state_code: Some(code),
                state_name: Some(name.to_string()),
            };
        }
        // A 2-letter code outside the Brazilian state set is never an ISO2
        // country code in this model.
        return Location::country(Some(strip_trailing_paren(s)), None);
    }

    if code.len() == 3 && is_alpha {
        let name = strip_trailing_paren(s);
        let name = if name.is_empty() { "Unknown".to_string() } else { name };
        return Location::country(Some(name), Some(code));
    }

    Location::country(Some(strip_trailing_paren(s)), None)
}
