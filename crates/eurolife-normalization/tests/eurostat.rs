//! Normalization of Eurostat-shaped files read from disk.

use std::io::Write;

use eurolife_ingest::{read_csv_table, read_feature_collection};
use eurolife_model::{DatasetSpec, GeometrySpec, NormalizationOptions};
use eurolife_normalization::{COUNTRY_CODE_KEY, DatasetNormalizer, GeometryNormalizer};
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn wide_life_satisfaction_csv() {
    let file = write_temp("geo,2013,2018\nDE,7.2,7.5\nEL,6.1,6.3\n");
    let table = read_csv_table(file.path()).unwrap();
    let options = NormalizationOptions::default();

    let normalized = DatasetNormalizer::new(&options)
        .normalize(&table, &DatasetSpec::life_satisfaction())
        .unwrap();

    let mut rows: Vec<(String, i32, f64)> = normalized
        .dataset
        .records
        .iter()
        .map(|r| (r.country.to_string(), r.year, r.value))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
    assert_eq!(
        rows,
        vec![
            ("DE".to_string(), 2013, 7.2),
            ("DE".to_string(), 2018, 7.5),
            ("GR".to_string(), 2013, 6.1),
            ("GR".to_string(), 2018, 6.3),
        ]
    );
    assert_eq!(
        normalized.dataset.header(),
        vec!["country", "year", "life_satisfaction"]
    );
}

#[test]
fn sdmx_income_csv_with_flags() {
    let file = write_temp(
        "DATAFLOW,freq,unit,geo,TIME_PERIOD,OBS_VALUE,OBS_FLAG\n\
         ESTAT:ILC_DI03,A,EUR,DE,2013,21000,\n\
         ESTAT:ILC_DI03,A,EUR,DE,2018,23000,b\n\
         ESTAT:ILC_DI03,A,EUR,DE,2021,:,\n\
         ESTAT:ILC_DI03,A,EUR,UK,2013,19000,\n\
         ESTAT:ILC_DI03,A,EUR,FR,2015,20000,\n",
    );
    let table = read_csv_table(file.path()).unwrap();
    let options = NormalizationOptions::default();

    let normalized = DatasetNormalizer::new(&options)
        .normalize(&table, &DatasetSpec::income())
        .unwrap();
    let dataset = &normalized.dataset;

    assert_eq!(dataset.header(), vec!["country", "year", "median_income", "DATAFLOW", "freq", "unit"]);
    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.records[2].value, 22000.0);
    assert_eq!(dataset.records[3].country.as_str(), "GB");
    assert_eq!(normalized.report.dropped_outside_years, 1);
    assert_eq!(normalized.report.imputed_by_country, 1);
}

#[test]
fn boundary_document_gets_canonical_keys() {
    let file = write_temp(
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[10.0,51.0]},
             "properties":{"CNTR_CODE":"DE","NAME_LATN":"Deutschland"}}
        ]}"#,
    );
    let mut collection = read_feature_collection(file.path()).unwrap();

    let report = GeometryNormalizer::new(&GeometrySpec::default()).normalize(&mut collection);

    assert_eq!(report.with_code, 1);
    assert_eq!(collection.features[0].property_str(COUNTRY_CODE_KEY), Some("DE"));
    assert_eq!(collection.features[0].property_str("country_name"), Some("Deutschland"));
}
