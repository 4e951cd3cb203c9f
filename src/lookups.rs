//! Static lookup tables: Brazilian state names and the ISO3 → continent map.
//!
//! Both tables are injected into the pipeline through [`Lookups`] rather than
//! read as globals, so tests can substitute fixtures.

use std::collections::HashMap;

/// The 27 Brazilian federative units. A 2-letter code outside this set is
/// never accepted as a location code.
pub const UF_NAMES: &[(&str, &str)] = &[
    ("AC", "Acre"),
    ("AL", "Alagoas"),
    ("AM", "Amazonas"),
    ("AP", "Amapá"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("DF", "Distrito Federal"),
    ("ES", "Espírito Santo"),
    ("GO", "Goiás"),
    ("MA", "Maranhão"),
    ("MG", "Minas Gerais"),
    ("MS", "Mato Grosso do Sul"),
    ("MT", "Mato Grosso"),
    ("PA", "Pará"),
    ("PB", "Paraíba"),
    ("PE", "Pernambuco"),
    ("PI", "Piauí"),
    ("PR", "Paraná"),
    ("RJ", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte"),
    ("RO", "Rondônia"),
    ("RR", "Roraima"),
    ("RS", "Rio Grande do Sul"),
    ("SC", "Santa Catarina"),
    ("SE", "Sergipe"),
    ("SP", "São Paulo"),
    ("TO", "Tocantins"),
];

/// Closed enumeration of recognized ISO3 codes. Codes absent from this table
/// degrade to "Not informed" at classification time, never to an error.
pub const ISO3_TO_CONTINENT: &[(&str, &str)] = &[
    ("BRA", "South America"),
    ("ARG", "South America"),
    ("CHL", "South America"),
    ("COL", "South America"),
    ("PER", "South America"),
    ("URY", "South America"),
    ("PRY", "South America"),
    ("BOL", "South America"),
    ("ECU", "South America"),
    ("VEN", "South America"),
    ("GUY", "South America"),
    ("SUR", "South America"),
    ("GUF", "South America"),
    ("USA", "North America"),
    ("CAN", "North America"),
    ("MEX", "North America"),
    ("GTM", "Central America"),
    ("BLZ", "Central America"),
    ("SLV", "Central America"),
    ("HND", "Central America"),
    ("NIC", "Central America"),
    ("CRI", "Central America"),
    ("PAN", "Central America"),
    ("DEU", "Europe"),
    ("FRA", "Europe"),
    ("ESP", "Europe"),
    ("PRT", "Europe"),
    ("ITA", "Europe"),
    ("GBR", "Europe"),
    ("NLD", "Europe"),
    ("SWE", "Europe"),
    ("NOR", "Europe"),
    ("DNK", "Europe"),
    ("FIN", "Europe"),
    ("POL", "Europe"),
    ("AUT", "Europe"),
    ("CHE", "Europe"),
    ("BEL", "Europe"),
    ("IRL", "Europe"),
    ("GRC", "Europe"),
    ("CZE", "Europe"),
    ("HUN", "Europe"),
    ("ROU", "Europe"),
    ("BGR", "Europe"),
    ("HRV", "Europe"),
    ("SVK", "Europe"),
    ("SVN", "Europe"),
    ("LTU", "Europe"),
    ("LVA", "Europe"),
    ("EST", "Europe"),
    ("UKR", "Europe"),
    ("RUS", "Europe"),
    ("MOZ", "Africa"),
    ("ZAF", "Africa"),
    ("AGO", "Africa"),
    ("GHA", "Africa"),
    ("EGY", "Africa"),
    ("NGA", "Africa"),
    ("KEN", "Africa"),
    ("ETH", "Africa"),
    ("TZA", "Africa"),
    ("UGA", "Africa"),
    ("MAR", "Africa"),
    ("DZA", "Africa"),
    ("CHN", "Asia"),
    ("JPN", "Asia"),
    ("KOR", "Asia"),
    ("IND", "Asia"),
    ("IDN", "Asia"),
    ("THA", "Asia"),
    ("VNM", "Asia"),
    ("MYS", "Asia"),
    ("SGP", "Asia"),
    ("PHL", "Asia"),
    ("PAK", "Asia"),
    ("BGD", "Asia"),
    ("LKA", "Asia"),
    ("MMR", "Asia"),
    ("KHM", "Asia"),
    ("LAO", "Asia"),
    ("NPL", "Asia"),
    ("AFG", "Asia"),
    ("IRN", "Asia"),
    ("IRQ", "Asia"),
    ("SAU", "Asia"),
    ("ARE", "Asia"),
    ("ISR", "Asia"),
    ("TUR", "Asia"),
    ("KAZ", "Asia"),
    ("UZB", "Asia"),
    ("TWN", "Asia"),
    ("HKG", "Asia"),
    ("AUS", "Oceania"),
    ("NZL", "Oceania"),
    ("PNG", "Oceania"),
    ("FJI", "Oceania"),
    ("NCL", "Oceania"),
    ("PYF", "Oceania"),
];

/// Read-only lookup tables consumed by the enrichment pipeline.
#[derive(Debug, Clone)]
pub struct Lookups {
    pub state_names: HashMap<&'static str, &'static str>,
    pub continents: HashMap<&'static str, &'static str>,
}

impl Lookups {
    pub fn state_name(&self, code: &str) -> Option<&'static str> {
        self.state_names.get(code).copied()
    }

    pub fn continent(&self, iso3: &str) -> Option<&'static str> {
        self.continents.get(iso3).copied()
    }
}

impl Default for Lookups {
    fn default() -> Self {
        Lookups {
            state_names: UF_NAMES.iter().copied().collect(),
            continents: ISO3_TO_CONTINENT.iter().copied().collect(),
        }
    }
}
