//! Cell coercion for the sale fields.
//!
//! Every function here is total: a cell that cannot be read yields `None` (or
//! the documented default) and the caller decides what that means for the row.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::table::CellValue;

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const DAY_FIRST_DATE: &str = "%d/%m/%Y";
const DAY_FIRST_DATETIMES: &[&str] = &["%d/%m/%Y %H:%M:%S%.f", "%d/%m/%Y %H:%M"];
const MONTH_FIRST_DATE: &str = "%m/%d/%Y";
const MONTH_FIRST_DATETIMES: &[&str] = &["%m/%d/%Y %H:%M:%S%.f", "%m/%d/%Y %H:%M"];

/// Preferred reading of ambiguous `a/b/yyyy` dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    #[default]
    DayFirst,
    MonthFirst,
}

impl DateOrder {
    fn alternate(self) -> Self {
        match self {
            DateOrder::DayFirst => DateOrder::MonthFirst,
            DateOrder::MonthFirst => DateOrder::DayFirst,
        }
    }

    fn formats(self) -> (&'static str, &'static [&'static str]) {
        match self {
            DateOrder::DayFirst => (DAY_FIRST_DATE, DAY_FIRST_DATETIMES),
            DateOrder::MonthFirst => (MONTH_FIRST_DATE, MONTH_FIRST_DATETIMES),
        }
    }
}

/// Reads a revenue amount. Non-finite values count as unparsable.
pub fn parse_amount(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Number(value) => *value,
        CellValue::Text(text) => text.trim().parse::<f64>().ok()?,
        CellValue::Empty | CellValue::DateTime(_) => return None,
    };
    value.is_finite().then_some(value)
}

/// Reads a quantity, falling back to 1 when the cell is missing or unparsable.
/// Fractional quantities are kept as they are.
pub fn parse_quantity(cell: &CellValue) -> f64 {
    let value = match cell {
        CellValue::Number(value) => Some(*value),
        CellValue::Text(text) => text.trim().parse::<f64>().ok(),
        CellValue::Empty | CellValue::DateTime(_) => None,
    };
    value.filter(|value| value.is_finite()).unwrap_or(1.0)
}

/// Reads the calendar date of a sale, discarding time of day.
pub fn parse_sale_date(cell: &CellValue, order: DateOrder) -> Option<NaiveDate> {
    match cell {
        CellValue::DateTime(value) => Some(value.date()),
        CellValue::Text(text) => parse_date_text(text.trim(), order),
        CellValue::Empty | CellValue::Number(_) => None,
    }
}

fn parse_date_text(text: &str, order: DateOrder) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(date) = first_datetime(text, ISO_DATETIME_FORMATS) {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
        return Some(stamp.naive_local().date());
    }
    parse_slashed(text, order).or_else(|| parse_slashed(text, order.alternate()))
}

fn parse_slashed(text: &str, order: DateOrder) -> Option<NaiveDate> {
    let (date_format, datetime_formats) = order.formats();
    NaiveDate::parse_from_str(text, date_format)
        .ok()
        .or_else(|| first_datetime(text, datetime_formats))
}

fn first_datetime(text: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|stamp| stamp.date())
}
