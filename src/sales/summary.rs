use chrono::NaiveDate;
use serde::Serialize;

/// Revenue per slot, `None` when no slots were sold.
///
/// `None` serializes as `null` so consumers can tell "no slots" apart from a
/// genuine ticket of zero.
pub fn ticket(revenue: f64, slots: f64) -> Option<f64> {
    if slots == 0.0 {
        None
    } else {
        Some(revenue / slots)
    }
}

/// A valid sale row with its slot classification applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedSale {
    /// Zero-based position of the row in the input table.
    pub row: usize,
    pub description: Option<String>,
    pub amount: f64,
    pub quantity: f64,
    pub sale_date: NaiveDate,
    pub slots_per_unit: u32,
    /// `slots_per_unit * quantity`; fractional when the quantity is.
    pub slots_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

/// Per-day totals before the cumulative scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub total_revenue: f64,
    pub total_slots: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_revenue: f64,
    pub total_slots: f64,
    pub avg_ticket: Option<f64>,
    pub cumulative_revenue: f64,
    pub cumulative_slots: f64,
    pub cumulative_avg_ticket: Option<f64>,
}

/// Row counts collected while cleaning the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowDiagnostics {
    pub total_rows: usize,
    pub test_rows: usize,
    pub invalid_amount: usize,
    pub invalid_date: usize,
    /// Rows dropped because amount, date or both failed to parse.
    pub dropped_rows: usize,
    pub valid_rows: usize,
    /// Valid rows whose description matched no classifier rule.
    pub unclassified_rows: usize,
}

/// Top-line figures for a whole report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Headline {
    pub total_revenue: f64,
    pub total_slots: f64,
    pub cumulative_avg_ticket: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub valid_rows: Vec<ClassifiedSale>,
    pub daily: Vec<DailySummary>,
    pub diagnostics: RowDiagnostics,
}

impl SalesReport {
    pub fn headline(&self) -> Headline {
        match self.daily.last() {
            Some(last) => Headline {
                total_revenue: last.cumulative_revenue,
                total_slots: last.cumulative_slots,
                cumulative_avg_ticket: last.cumulative_avg_ticket,
            },
            None => Headline {
                total_revenue: 0.0,
                total_slots: 0.0,
                cumulative_avg_ticket: None,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }
}
