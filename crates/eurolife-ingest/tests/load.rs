//! Loading Eurostat-shaped inputs and describing them for detection.

use std::fs;

use eurolife_ingest::{IngestError, build_table_schema, profile_table, read_csv_table, read_feature_collection};
use eurolife_map::{ColumnRoleDetector, DetectionMethod, RolePatterns};
use eurolife_model::YearRange;

#[test]
fn sdmx_export_is_detected_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eurostat_income.csv");
    fs::write(
        &path,
        "DATAFLOW,freq,geo,TIME_PERIOD,OBS_VALUE,OBS_FLAG\n\
         ESTAT:ILC_DI03,A,DE,2013,21000,\n\
         ESTAT:ILC_DI03,A,EL,2013,:,c\n",
    )
    .unwrap();

    let table = read_csv_table(&path).unwrap();
    let profile = profile_table(&table, "Income");
    let roles = ColumnRoleDetector::new(
        RolePatterns::with_value_candidates(&["value", "income"]),
        YearRange::default(),
    )
    .detect(&build_table_schema(&table));

    assert_eq!(profile.rows, 2);
    assert_eq!(profile.missing_cells, 1);
    assert_eq!(roles.country.map(|c| c.name), Some("geo".to_string()));
    assert_eq!(roles.time.map(|c| c.name), Some("TIME_PERIOD".to_string()));
    assert_eq!(roles.value.map(|c| c.name), Some("OBS_VALUE".to_string()));
}

#[test]
fn unnamed_year_column_is_found_by_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("life.csv");
    fs::write(&path, "geo,period,satisfaction\nDE,2013,7.2\nFR,2018,6.9\n").unwrap();

    let table = read_csv_table(&path).unwrap();
    let roles = ColumnRoleDetector::new(
        RolePatterns::with_value_candidates(&["satisfaction"]),
        YearRange::default(),
    )
    .detect(&build_table_schema(&table));

    let time = roles.time.unwrap();
    assert_eq!(time.name, "period");
    assert_eq!(time.method, DetectionMethod::YearRange);
}

#[test]
fn missing_inputs_are_distinguished() {
    let dir = tempfile::tempdir().unwrap();

    let csv = read_csv_table(&dir.path().join("absent.csv")).unwrap_err();
    let json = read_feature_collection(&dir.path().join("absent.json")).unwrap_err();

    assert!(csv.is_missing_file());
    assert!(json.is_missing_file());

    let empty = dir.path().join("empty.csv");
    fs::write(&empty, "").unwrap();
    assert!(matches!(
        read_csv_table(&empty).unwrap_err(),
        IngestError::EmptyCsv { .. }
    ));
}
