use coop_agreements::{normalize, LocationLevel, Lookups, Modality, RawTable, RawValue, SchemaError, NOT_INFORMED};

fn table(columns: &[&str], rows: Vec<Vec<RawValue>>) -> RawTable {
    RawTable {
        columns: columns.iter().map(|s| s.to_string()).collect(),
        rows,
    }
}

fn text(s: &str) -> RawValue {
    RawValue::Text(s.to_string())
}

fn sample_table() -> RawTable {
    table(
        &["NÚMERO", "PAÍS/ESTADO (ISO3)", "TIPO DE PROCESSO", "STATUS", "Contatos"],
        vec![
            vec![
                text("01280.000381/2023-95"),
                text("United Kingdom (GBR)"),
                text("Acordo de Cooperação"),
                text("Vigente"),
                text("Dr. Silva"),
            ],
            vec![
                text("01280.000999/2021-10"),
                text("Amazonas (AM)"),
                text("Termo Aditivo"),
                text("Não vigente"),
                RawValue::Empty,
            ],
            vec![
                RawValue::Empty,
                text("Atlantis (ATL)"),
                RawValue::Empty,
                RawValue::Empty,
                RawValue::Empty,
            ],
        ],
    )
}

#[test]
fn enriches_rows_in_order() {
    let records = normalize(&sample_table(), &Lookups::default()).unwrap();
    assert_eq!(records.len(), 3);

    let uk = &records[0];
    assert_eq!(uk.location.iso3.as_deref(), Some("GBR"));
    assert_eq!(uk.modality, Modality::CooperationAgreement);
    assert!(uk.in_force);
    assert_eq!(uk.signing_year, Some(2023));
    assert_eq!(uk.continent, "Europe");
    assert_eq!(uk.responsible_researcher, "Dr. Silva");

    let am = &records[1];
    assert_eq!(am.location.level, LocationLevel::BrazilianState);
    assert_eq!(am.location.state_code.as_deref(), Some("AM"));
    assert_eq!(am.modality, Modality::Amendment);
    assert!(!am.in_force);
    assert_eq!(am.signing_year, Some(2021));
    assert_eq!(am.continent, "South America");
    assert_eq!(am.responsible_researcher, NOT_INFORMED);
}

#[test]
fn row_level_anomalies_degrade_to_defaults() {
    let records = normalize(&sample_table(), &Lookups::default()).unwrap();
    let atlantis = &records[2];
    assert_eq!(atlantis.location.iso3.as_deref(), Some("ATL"));
    assert_eq!(atlantis.modality, Modality::Other);
    assert_eq!(atlantis.process_type, NOT_INFORMED);
    assert!(!atlantis.in_force);
    assert_eq!(atlantis.status_text, "");
    assert_eq!(atlantis.signing_year, None);
    assert_eq!(atlantis.continent, NOT_INFORMED);
}

#[test]
fn missing_location_column_fails_fast_with_available_columns() {
    let t = table(&["NÚMERO", "STATUS"], vec![vec![text("x"), text("y")]]);
    match normalize(&t, &Lookups::default()) {
        Err(SchemaError::LocationColumnMissing { available }) => {
            assert_eq!(available, vec!["NÚMERO".to_string(), "STATUS".to_string()]);
        }
        other => panic!("expected LocationColumnMissing, got {:?}", other),
    }
}

#[test]
fn normalize_is_idempotent() {
    let t = sample_table();
    let lookups = Lookups::default();
    let first = normalize(&t, &lookups).unwrap();
    let second = normalize(&t, &lookups).unwrap();
    assert_eq!(first, second);
}

#[test]
fn lookup_tables_are_injectable() {
    // A fixture with no recognized states: "(AM)" is then not a state code
    // and degrades to a plain country name.
    let lookups = Lookups {
        state_names: std::collections::HashMap::new(),
        continents: std::collections::HashMap::new(),
    };
    let records = normalize(&sample_table(), &lookups).unwrap();
    assert_eq!(records[1].location.level, LocationLevel::Country);
    assert_eq!(records[1].location.country_name.as_deref(), Some("Amazonas"));
    assert_eq!(records[1].location.iso3, None);
    // GBR is no longer mapped to a continent either.
    assert_eq!(records[0].continent, NOT_INFORMED);
}
