use std::fs;

use coop_agreements::{emit_dataset, normalize, Lookups, RawTable, RawValue};

fn sample_records() -> Vec<coop_agreements::NormalizedRecord> {
    let table = RawTable {
        columns: ["NÚMERO", "PAÍS/ESTADO (ISO3)", "TIPO DE PROCESSO", "STATUS"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        rows: vec![vec![
            RawValue::Text("1/2023-1".into()),
            RawValue::Text("Peru (PER)".into()),
            RawValue::Text("Acordo de Cooperação".into()),
            RawValue::Text("Vigente".into()),
        ]],
    };
    normalize(&table, &Lookups::default()).unwrap()
}

#[test]
fn emits_dataset_and_summary_with_fingerprint() {
    let records = sample_records();
    let td = tempfile::tempdir().unwrap();
    let outdir = td.path().join("out");

    let summary = serde_json::json!({ "id": "coop-dashboard", "total": records.len() });
    let paths = emit_dataset(&records, &summary, outdir.to_str().unwrap(), "agreements")
        .expect("emit ok");

    let data: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.data_path).unwrap()).unwrap();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["modality"], "Cooperation Agreement");
    assert_eq!(data[0]["location"]["level"], "country");
    assert_eq!(data[0]["in_force"], true);

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.summary_path).unwrap()).unwrap();
    assert_eq!(summary["id"], "coop-dashboard");
    let fp = summary["dataset_fingerprint"].as_str().unwrap();
    assert_eq!(fp.len(), 64);

    // No temp files left behind.
    let leftovers: Vec<_> = fs::read_dir(&outdir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn fingerprint_is_stable_across_identical_runs() {
    let records = sample_records();
    let td = tempfile::tempdir().unwrap();

    let summary = serde_json::json!({ "id": "coop-dashboard" });
    let first = emit_dataset(&records, &summary, td.path().join("a").to_str().unwrap(), "agreements").unwrap();
    let second = emit_dataset(&records, &summary, td.path().join("b").to_str().unwrap(), "agreements").unwrap();

    let fp = |p: &str| -> String {
        let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(p).unwrap()).unwrap();
        v["dataset_fingerprint"].as_str().unwrap().to_string()
    };
    assert_eq!(fp(&first.summary_path), fp(&second.summary_path));
}
