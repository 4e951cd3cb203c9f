//! Filter and aggregation engine over the normalized dataset.
//!
//! All predicates are conjunctive and independent; empty selection sets mean
//! "no restriction". Aggregation is read-only and recomputed per query.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::location::LocationLevel;
use crate::modality::Modality;
use crate::pipeline::NormalizedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearFilter {
    All,
    Year(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    OnlyInForce,
}

/// Immutable filter selection, built fresh per query.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub year: YearFilter,
    /// Raw process-type labels; empty = no restriction.
    pub types: Vec<String>,
    /// Modality labels; empty = no restriction.
    pub modalities: Vec<Modality>,
    /// Continent labels; empty = no restriction.
    pub continents: Vec<String>,
    pub status: StatusFilter,
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            year: YearFilter::All,
            types: Vec::new(),
            modalities: Vec::new(),
            continents: Vec::new(),
            status: StatusFilter::All,
        }
    }
}

/// Apply the filter spec; content and order of surviving rows are preserved.
pub fn filter(records: &[NormalizedRecord], spec: &FilterSpec) -> Vec<NormalizedRecord> {
    records
        .iter()
        .filter(|r| {
            if let YearFilter::Year(y) = spec.year {
                if r.signing_year != Some(y) {
                    return false;
                }
            }
            if !spec.types.is_empty() && !spec.types.contains(&r.process_type) {
                return false;
            }
            if !spec.modalities.is_empty() && !spec.modalities.contains(&r.modality) {
                return false;
            }
            if !spec.continents.is_empty() && !spec.continents.contains(&r.continent) {
                return false;
            }
            if spec.status == StatusFilter::OnlyInForce && !r.in_force {
                return false;
            }
            true
        })
        .cloned()
        .collect()
}

/// Count per (location key, in-force) pair; the key is the ISO3 code for
/// countries and the 2-letter state code for Brazilian states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCount {
    pub key: String,
    pub name: String,
    pub level: LocationLevel,
    pub in_force: bool,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearStatusCount {
    pub year: i32,
    pub in_force: bool,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModalityCount {
    pub modality: Modality,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

/// KPI scalars for the dashboard header cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total: usize,
    pub in_force_count: usize,
    pub in_force_pct: f64,
    /// Distinct ISO3 codes among country-level rows.
    pub partner_countries: usize,
    pub current_year: i32,
    pub new_this_year: usize,
    pub leading_modality: Option<Modality>,
    pub leading_modality_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub by_location: Vec<LocationCount>,
    pub by_modality: Vec<ModalityCount>,
    pub by_year_status: Vec<YearStatusCount>,
    pub ranking: Vec<CountryCount>,
    pub kpis: Kpis,
}

/// Aggregate the (already filtered) subset. `current_year` anchors the
/// "new agreements this year" KPI.
pub fn aggregate(records: &[NormalizedRecord], current_year: i32) -> AggregateResult {
    AggregateResult {
        by_location: count_by_location(records),
        by_modality: count_by_modality(records),
        by_year_status: count_by_year_status(records),
        ranking: rank_countries(records),
        kpis: kpis(records, current_year),
    }
}

fn count_by_location(records: &[NormalizedRecord]) -> Vec<LocationCount> {
    let mut order: Vec<LocationCount> = Vec::new();
    let mut index: HashMap<(String, bool), usize> = HashMap::new();

    for r in records {
        let (key, name) = match r.location.level {
            LocationLevel::BrazilianState => match (&r.location.state_code, &r.location.state_name) {
                (Some(code), Some(name)) => (code.clone(), name.clone()),
                _ => continue,
            },
            LocationLevel::Country => match (&r.location.iso3, &r.location.country_name) {
                (Some(iso3), Some(name)) => (iso3.clone(), name.clone()),
                _ => continue,
            },
        };
        match index.get(&(key.clone(), r.in_force)) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert((key.clone(), r.in_force), order.len());
                order.push(LocationCount {
                    key,
                    name,
                    level: r.location.level,
                    in_force: r.in_force,
                    count: 1,
                });
            }
        }
    }
    order
}

fn count_by_modality(records: &[NormalizedRecord]) -> Vec<ModalityCount> {
    let mut order: Vec<ModalityCount> = Vec::new();
    let mut index: HashMap<Modality, usize> = HashMap::new();

    for r in records {
        // Amendments modify existing agreements; they are not counted as a
        // modality of their own in the chart.
        if r.modality == Modality::Amendment {
            continue;
        }
        match index.get(&r.modality) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert(r.modality, order.len());
                order.push(ModalityCount { modality: r.modality, count: 1 });
            }
        }
    }
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order
}

fn count_by_year_status(records: &[NormalizedRecord]) -> Vec<YearStatusCount> {
    let mut counts: HashMap<(i32, bool), usize> = HashMap::new();
    for r in records {
        if let Some(year) = r.signing_year {
            *counts.entry((year, r.in_force)).or_insert(0) += 1;
        }
    }
    let mut out: Vec<YearStatusCount> = counts
        .into_iter()
        .map(|((year, in_force), count)| YearStatusCount { year, in_force, count })
        .collect();
    out.sort_by_key(|c| (c.year, c.in_force));
    out
}

fn rank_countries(records: &[NormalizedRecord]) -> Vec<CountryCount> {
    let mut order: Vec<CountryCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for r in records {
        let country = match &r.location.country_name {
            Some(name) => name.clone(),
            None => continue,
        };
        match index.get(&country) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert(country.clone(), order.len());
                order.push(CountryCount { country, count: 1 });
            }
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order
}

fn kpis(records: &[NormalizedRecord], current_year: i32) -> Kpis {
    let total = records.len();
    let in_force_count = records.iter().filter(|r| r.in_force).count();
    let in_force_pct = if total > 0 {
        in_force_count as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let partner_countries = records
        .iter()
        .filter(|r| r.location.level == LocationLevel::Country)
        .filter_map(|r| r.location.iso3.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let new_this_year = records
        .iter()
        .filter(|r| r.signing_year == Some(current_year))
        .count();

    let mut modality_order: Vec<(Modality, usize)> = Vec::new();
    let mut modality_index: HashMap<Modality, usize> = HashMap::new();
    for r in records {
        match modality_index.get(&r.modality) {
            Some(&i) => modality_order[i].1 += 1,
            None => {
                modality_index.insert(r.modality, modality_order.len());
                modality_order.push((r.modality, 1));
            }
        }
    }
    // First-seen wins ties, like the location/ranking aggregations.
    let best = modality_order.iter().map(|&(_, c)| c).max();
    let leading = best.and_then(|best| modality_order.iter().copied().find(|&(_, c)| c == best));

    let (leading_modality, leading_modality_pct) = match leading {
        Some((m, c)) if total > 0 => (Some(m), Some(c as f64 / total as f64 * 100.0)),
        _ => (None, None),
    };

    Kpis {
        total,
        in_force_count,
        in_force_pct,
        partner_countries,
        current_year,
        new_this_year,
        leading_modality,
        leading_modality_pct,
    }
}

/// Distinct values available for the filter widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub types: Vec<String>,
    pub modalities: Vec<String>,
    pub continents: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[NormalizedRecord]) -> Self {
        let mut years: Vec<i32> = records.iter().filter_map(|r| r.signing_year).collect();
        years.sort_unstable();
        years.dedup();

        let mut types: Vec<String> = records.iter().map(|r| r.process_type.clone()).collect();
        types.sort();
        types.dedup();

        let mut modalities: Vec<String> =
            records.iter().map(|r| r.modality.label().to_string()).collect();
        modalities.sort();
        modalities.dedup();

        let mut continents: Vec<String> = records.iter().map(|r| r.continent.clone()).collect();
        continents.sort();
        continents.dedup();

        FilterOptions { years, types, modalities, continents }
    }
}

/// Injected mapping from a location code to (latitude, longitude).
pub type CentroidLookup = HashMap<String, (f64, f64)>;

/// One plottable marker: a location count joined with its centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub key: String,
    pub name: String,
    pub in_force: bool,
    pub count: usize,
    pub lat: f64,
    pub lon: f64,
}

/// Join location counts with centroids. Locations without a centroid are
/// omitted rather than erroring; populating the lookup is the collaborator's
/// responsibility.
pub fn map_points(by_location: &[LocationCount], centroids: &CentroidLookup) -> Vec<MapPoint> {
    by_location
        .iter()
        .filter_map(|lc| {
            centroids.get(&lc.key).map(|&(lat, lon)| MapPoint {
                key: lc.key.clone(),
                name: lc.name.clone(),
                in_force: lc.in_force,
                count: lc.count,
                lat,
                lon,
            })
        })
        .collect()
}
