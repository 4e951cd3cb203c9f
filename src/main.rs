use std::path::Path;

use chrono::Datelike;
use coop_agreements::{
    aggregate, filter, map_points, normalize, source::source_guidance, validate_config,
    CsvFileSource, FilterOptions, FilterSpec, Lookups, Modality, SchemaError, StatusFilter,
    TableSource, YearFilter,
};

fn main() {
    // Simple CLI flags parsing
    let args: Vec<String> = std::env::args().collect();

    let mut config_path = String::from("config.yaml");
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        if let Some(val) = args.get(pos + 1) {
            if !val.starts_with("--") {
                config_path = val.clone();
            }
        }
    }

    // Filter flags: --year 2023 | --year all, --only-in-force,
    // --types a,b  --modalities a,b  --continents a,b
    let mut spec = FilterSpec::default();
    if let Some(pos) = args.iter().position(|a| a == "--year") {
        if let Some(val) = args.get(pos + 1) {
            if let Ok(y) = val.parse::<i32>() {
                spec.year = YearFilter::Year(y);
            }
        }
    }
    if args.iter().any(|a| a == "--only-in-force") {
        spec.status = StatusFilter::OnlyInForce;
    }
    let list_flag = |name: &str| -> Vec<String> {
        args.iter()
            .position(|a| a == name)
            .and_then(|i| args.get(i + 1))
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default()
    };
    spec.types = list_flag("--types");
    spec.continents = list_flag("--continents");
    spec.modalities = list_flag("--modalities")
        .iter()
        .filter_map(|label| Modality::from_label(label))
        .collect();

    let mut stem = String::from("agreements");
    if let Some(pos) = args.iter().position(|a| a == "--stem") {
        if let Some(val) = args.get(pos + 1) {
            if !val.starts_with("--") {
                stem = val.clone();
            }
        }
    }

    // 1) Read and validate config.yaml
    let cfg = match validate_config(Path::new(&config_path)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool": "validate_config",
                    "file": config_path,
                    "error": e.to_string()
                })
            );
            std::process::exit(3);
        }
    };
    eprintln!(
        "{}",
        serde_json::json!({
            "tool": "validate_config",
            "file": config_path,
            "status": "ok",
            "input_path": cfg.input_path(),
            "output_dir": cfg.output_dir()
        })
    );

    // 2) Load the raw table from the local fallback CSV
    let source = CsvFileSource::new(cfg.input_path());
    let table = match source.fetch() {
        Ok(t) => t,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool": "load_table",
                    "file": cfg.input_path(),
                    "error": e.to_string(),
                    "error_code": 1
                })
            );
            eprintln!("{}", source_guidance());
            std::process::exit(1);
        }
    };
    eprintln!(
        "{}",
        serde_json::json!({
            "tool": "load_table",
            "file": cfg.input_path(),
            "rows": table.rows.len(),
            "columns": table.columns.clone()
        })
    );

    // 3) Enrichment pipeline
    let lookups = Lookups::default();
    let records = match normalize(&table, &lookups) {
        Ok(r) => r,
        Err(SchemaError::LocationColumnMissing { available }) => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool": "normalize",
                    "error": "LocationColumnMissing",
                    "available_columns": available,
                    "error_code": 4
                })
            );
            std::process::exit(4);
        }
    };
    let options = FilterOptions::from_records(&records);
    eprintln!(
        "{}",
        serde_json::json!({
            "tool": "normalize",
            "records": records.len(),
            "years": options.years.clone(),
            "modalities": options.modalities.clone(),
            "continents": options.continents.clone()
        })
    );

    // 4) Filter + aggregate
    let subset = filter(&records, &spec);
    let current_year = chrono::Utc::now().year();
    let agg = aggregate(&subset, current_year);
    eprintln!(
        "{}",
        serde_json::json!({
            "tool": "aggregate",
            "subset": subset.len(),
            "locations": agg.by_location.len(),
            "in_force_pct": agg.kpis.in_force_pct,
            "partner_countries": agg.kpis.partner_countries
        })
    );

    // 5) Map markers, when a centroid file is configured
    let centroid_path = cfg.centroids_path();
    let centroids =
        coop_agreements::load_centroids(centroid_path.as_deref().map(Path::new));
    let points = map_points(&agg.by_location, &centroids);
    eprintln!(
        "{}",
        serde_json::json!({
            "tool": "map_points",
            "points": points.len(),
            "without_centroid": agg.by_location.len().saturating_sub(points.len())
        })
    );

    // 6) Emit normalized dataset + summary (atomic)
    let summary = serde_json::json!({
        "id": cfg.id,
        "kpis": agg.kpis,
        "by_location": agg.by_location,
        "by_modality": agg.by_modality,
        "by_year_status": agg.by_year_status,
        "ranking": agg.ranking,
        "map_points": points,
        "filter_options": options,
    });
    match coop_agreements::emit_dataset(&subset, &summary, &cfg.output_dir(), &stem) {
        Ok(paths) => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool": "emit_dataset",
                    "data_path": paths.data_path,
                    "summary_path": paths.summary_path
                })
            );
        }
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool": "emit_dataset",
                    "error": e.to_string(),
                    "error_code": 6
                })
            );
            std::process::exit(6);
        }
    }
}
