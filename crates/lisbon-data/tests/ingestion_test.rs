//! Integration tests for loading both sheets from disk.

use chrono::NaiveDate;
use lisbon_data::{ColumnNames, DataError, PolicyMetric, Sheet, load_base, load_returns};
use std::io::Write;
use std::path::Path;

fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_load_workbook_exports() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = write_csv(
        dir.path(),
        "base.csv",
        "Número da Apólice,Resultado - Mês,Resultado - Três Meses,Resultado - Desde o Início\n\
         9001,0.42,1.10,12.5\n",
    );
    let returns_path = write_csv(
        dir.path(),
        "returns.csv",
        "Número da Apólice,Data de Avaliação,Nome do Ativo,Retornos,Valor de Conta\n\
         9001,2024-07-31,Global Equity,1.5,120000\n\
         9001,2024-08-30,Global Equity,-0.5,119000\n\
         9001,31/08/2024,US Treasuries,0.3,119000\n",
    );

    let base = load_base(
        &Sheet::from_path("base", &base_path).unwrap(),
        &ColumnNames::default(),
    )
    .unwrap();
    let returns = load_returns(
        &Sheet::from_path("returns", &returns_path).unwrap(),
        &ColumnNames::default(),
    )
    .unwrap();

    let policy = base.policy("9001").unwrap();
    assert_eq!(policy.metric(PolicyMetric::ReturnSinceInception), Some(12.5));

    assert_eq!(returns.rows.len(), 3);
    assert_eq!(returns.latest_date(), NaiveDate::from_ymd_opt(2024, 8, 31));
    assert!(returns.holdings.is_none());
}

#[test]
fn test_custom_column_names() {
    let csv = "policy,date,asset,ret\nA-1,2024-01-31,Gold,2.0\n";
    let columns = ColumnNames {
        policy_id: "policy".to_string(),
        as_of_date: "date".to_string(),
        entity_id: "asset".to_string(),
        return_value: "ret".to_string(),
        ..ColumnNames::default()
    };

    let sheet = Sheet::from_reader("returns", csv.as_bytes()).unwrap();
    let returns = load_returns(&sheet, &columns).unwrap();

    assert_eq!(returns.rows[0].entity_id, "Gold");
    assert_eq!(returns.missing_columns.len(), 5);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Sheet::from_path("base", &dir.path().join("absent.csv")).unwrap_err();

    assert!(matches!(err, DataError::Io(_)));
}
