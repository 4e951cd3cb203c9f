use std::fs;

use coop_agreements::{validate_config, ConfigError, CsvFileSource, RawValue, SourceError, TableSource};

#[test]
fn valid_config_round_trip() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("config.yaml");
    fs::write(
        &path,
        r#"
id: coop-dashboard
source:
  sheet_url: "https://example.org/export?format=csv"
  fallback: "./data/agreements.csv"
outputs:
  dir: "./output"
  centroids: "./data/iso3_centroids.csv"
"#,
    )
    .unwrap();

    let cfg = validate_config(&path).expect("config should validate");
    assert_eq!(cfg.id, "coop-dashboard");
    assert_eq!(cfg.input_path(), "./data/agreements.csv");
    assert_eq!(cfg.output_dir(), "./output");
    assert_eq!(cfg.centroids_path().as_deref(), Some("./data/iso3_centroids.csv"));
}

#[test]
fn config_requires_fallback_and_output_dir() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("config.yaml");
    fs::write(&path, "id: coop-dashboard\nsource:\n  sheet_url: x\n").unwrap();

    match validate_config(&path) {
        Err(ConfigError::Invalid(msg)) => {
            assert!(msg.contains("fallback") || msg.contains("outputs.dir"));
        }
        other => panic!("expected Invalid, got {:?}", other),
    }
}

#[test]
fn config_requires_id() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("config.yaml");
    fs::write(
        &path,
        "id: \"\"\nsource:\n  fallback: x.csv\noutputs:\n  dir: out\n",
    )
    .unwrap();
    assert!(matches!(validate_config(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn missing_config_is_a_read_error() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("nope.yaml");
    assert!(matches!(validate_config(&path), Err(ConfigError::Read(_))));
}

#[test]
fn csv_source_coerces_cells() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("agreements.csv");
    fs::write(
        &path,
        "NÚMERO,PAÍS/ESTADO (ISO3),ANO,DATA\n\
         01280.000381/2023-95,United Kingdom (GBR),2023,2023-04-01\n\
         ,Amazonas (AM),,15/06/2021\n",
    )
    .unwrap();

    let table = CsvFileSource::new(&path).fetch().unwrap();
    assert_eq!(table.columns.len(), 4);
    assert_eq!(table.rows.len(), 2);

    assert_eq!(
        table.rows[0][0],
        RawValue::Text("01280.000381/2023-95".to_string())
    );
    assert_eq!(table.rows[0][2], RawValue::Number(2023.0));
    assert!(matches!(&table.rows[0][3], RawValue::Date(_)));

    assert_eq!(table.rows[1][0], RawValue::Empty);
    // Day-first dates are also recognized.
    assert!(matches!(&table.rows[1][3], RawValue::Date(d) if d.format("%Y").to_string() == "2021"));
}

#[test]
fn missing_csv_is_file_not_found() {
    let td = tempfile::tempdir().unwrap();
    let source = CsvFileSource::new(td.path().join("absent.csv"));
    assert!(matches!(source.fetch(), Err(SourceError::FileNotFound(_))));
}

#[test]
fn centroids_merge_over_fallbacks() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("centroids.csv");
    fs::write(&path, "code,lat,lon\nPER,-9.19,-75.0\nGBR,55.0,-3.0\n").unwrap();

    let centroids = coop_agreements::load_centroids(Some(&path));
    assert_eq!(centroids.get("PER"), Some(&(-9.19, -75.0)));
    // File entry overrides the static fallback.
    assert_eq!(centroids.get("GBR"), Some(&(55.0, -3.0)));
    // Static fallback survives for codes the file does not cover.
    assert_eq!(centroids.get("CHN"), Some(&(35.0, 103.0)));

    // No file at all still yields the fallbacks.
    let fallback_only = coop_agreements::load_centroids(None);
    assert_eq!(fallback_only.get("USA"), Some(&(37.0, -95.0)));
}
