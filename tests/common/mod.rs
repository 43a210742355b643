#![allow(dead_code)]

use chrono::NaiveDate;
use slot_metrics::sales::{CellValue, Row, SalesTable};

pub const DESCRIPTION: &str = "Descrição";
pub const AMOUNT: &str = "Valor";
pub const QUANTITY: &str = "Quantidade";
pub const SALE_DATE: &str = "Data da venda";

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Empty table with the default export columns.
pub fn export_table() -> SalesTable {
    SalesTable::new([DESCRIPTION, AMOUNT, QUANTITY, SALE_DATE])
}

pub fn sale_row(date: &str, amount: impl Into<CellValue>, description: &str) -> Row {
    Row::new()
        .with(DESCRIPTION, description)
        .with(AMOUNT, amount)
        .with(SALE_DATE, date)
}

/// The three-row export used throughout the docs.
pub fn reference_table() -> SalesTable {
    export_table()
        .with_row(sale_row("2024-01-01", 100.0, "Avulsa"))
        .with_row(sale_row("2024-01-01", 300.0, "Mensal"))
        .with_row(sale_row("2024-01-02", 50.0, "Pacote (5 sessões)"))
}
