use std::path::PathBuf;

use chrono::NaiveDate;
use slot_metrics::{
    config::Config,
    input::{RowSource, XlsxSource},
    pipeline::MetricsEngine,
    sales::CellValue,
};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/vendas.xlsx")
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn workbook_dates_arrive_as_typed_cells() {
    let bytes = std::fs::read(fixture()).unwrap();
    let table = XlsxSource.read_table(&bytes).unwrap();

    assert_eq!(
        table.columns(),
        &["Descrição", "Valor", "Quantidade", "Data da venda"]
    );
    assert_eq!(table.len(), 4);

    let first = &table.rows()[0];
    assert_eq!(first.get("Descrição"), &CellValue::Text("Pacote (5 sessões)".into()));
    assert_eq!(first.get("Valor"), &CellValue::Number(400.0));
    assert_eq!(first.get("Quantidade"), &CellValue::Empty);
    match first.get("Data da venda") {
        CellValue::DateTime(stamp) => assert_eq!(stamp.date(), ymd(2024, 1, 1)),
        other => panic!("expected a typed date, got {other:?}"),
    }
}

#[test]
fn workbook_export_aggregates_end_to_end() {
    let mut engine = MetricsEngine::new(Config::default()).unwrap();
    let report = engine.process_file(&fixture()).unwrap();

    assert_eq!(report.diagnostics.total_rows, 4);
    assert_eq!(report.diagnostics.test_rows, 1);
    assert_eq!(report.diagnostics.dropped_rows, 1);

    assert_eq!(report.daily.len(), 2);
    assert_eq!(report.daily[0].date, ymd(2024, 1, 1));
    assert_eq!(report.daily[0].avg_ticket, Some(80.0));
    assert_eq!(report.daily[1].date, ymd(2024, 1, 2));
    assert_eq!(report.daily[1].total_slots, 5.0);
    assert_eq!(report.daily[1].cumulative_avg_ticket, Some(45.0));
    assert!(engine.cached_input().is_some());
}
