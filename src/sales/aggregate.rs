//! Row cleaning and the daily reduction.
//!
//! The pipeline runs as explicit passes over plain vectors:
//! schema check, test-row filter, normalization, classification and validity
//! filter, then group, sort, reduce and a single cumulative scan. The scan is
//! only meaningful over ascending dates, so sorting happens before it and
//! nowhere else.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::Result;

use super::{
    classifier::{fold_text, SlotClassifier},
    normalize::{parse_amount, parse_quantity, parse_sale_date, DateOrder},
    schema::FieldMapping,
    summary::{ticket, ClassifiedSale, DailySummary, DayTotals, RowDiagnostics, SalesReport},
    table::{Row, SalesTable},
};

pub const DEFAULT_TEST_MARKER: &str = "TESTE";

/// A row after normalization, before the validity filter.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSale {
    pub row: usize,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub quantity: f64,
    pub sale_date: Option<NaiveDate>,
}

impl RawSale {
    pub fn from_row(index: usize, row: &Row, fields: &FieldMapping, order: DateOrder) -> Self {
        Self {
            row: index,
            description: row.get(&fields.description).as_text(),
            amount: parse_amount(row.get(&fields.amount)),
            quantity: parse_quantity(row.get(&fields.quantity)),
            sale_date: parse_sale_date(row.get(&fields.sale_date), order),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.amount.is_some() && self.sale_date.is_some()
    }

    /// Applies the classifier; `None` when amount or date is missing.
    pub fn classify(self, classifier: &SlotClassifier) -> Option<ClassifiedSale> {
        let amount = self.amount?;
        let sale_date = self.sale_date?;
        let outcome = classifier.classify_detailed(self.description.as_deref());
        Some(ClassifiedSale {
            row: self.row,
            description: self.description,
            amount,
            quantity: self.quantity,
            sale_date,
            slots_per_unit: outcome.slots,
            slots_total: f64::from(outcome.slots) * self.quantity,
            rule: outcome.rule,
        })
    }
}

/// Turns sales tables into [`SalesReport`]s.
#[derive(Debug, Clone)]
pub struct Aggregator {
    fields: FieldMapping,
    classifier: SlotClassifier,
    test_marker: String,
    date_order: DateOrder,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            fields: FieldMapping::default(),
            classifier: SlotClassifier::default(),
            test_marker: DEFAULT_TEST_MARKER.into(),
            date_order: DateOrder::default(),
        }
    }
}

impl Aggregator {
    pub fn new(fields: FieldMapping, classifier: SlotClassifier) -> Self {
        Self {
            fields,
            classifier,
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            fields: config.fields.clone(),
            classifier: SlotClassifier::from_config(&config.classifier)?,
            test_marker: config.test_marker.clone(),
            date_order: config.date_order,
        })
    }

    pub fn with_test_marker(mut self, marker: impl Into<String>) -> Self {
        self.test_marker = marker.into();
        self
    }

    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    pub fn fields(&self) -> &FieldMapping {
        &self.fields
    }

    pub fn classifier(&self) -> &SlotClassifier {
        &self.classifier
    }

    /// A table with neither columns nor rows (an empty file) yields an empty
    /// report; otherwise the mapped columns must be present.
    pub fn aggregate(&self, table: &SalesTable) -> Result<SalesReport> {
        if table.columns().is_empty() && table.is_empty() {
            debug!("empty export, nothing to aggregate");
            return Ok(SalesReport {
                valid_rows: Vec::new(),
                daily: Vec::new(),
                diagnostics: RowDiagnostics::default(),
            });
        }
        self.fields.check(table)?;

        let mut diagnostics = RowDiagnostics {
            total_rows: table.len(),
            ..RowDiagnostics::default()
        };

        let production = self.drop_test_rows(table, &mut diagnostics);

        let raw: Vec<RawSale> = production
            .into_iter()
            .map(|(index, row)| RawSale::from_row(index, row, &self.fields, self.date_order))
            .collect();

        let mut valid_rows = Vec::with_capacity(raw.len());
        for sale in raw {
            if sale.amount.is_none() {
                diagnostics.invalid_amount += 1;
            }
            if sale.sale_date.is_none() {
                diagnostics.invalid_date += 1;
            }
            let index = sale.row;
            match sale.classify(&self.classifier) {
                Some(classified) => {
                    if classified.rule.is_none() {
                        diagnostics.unclassified_rows += 1;
                    }
                    valid_rows.push(classified);
                }
                None => {
                    debug!(row = index, "dropping row with unparsable amount or date");
                    diagnostics.dropped_rows += 1;
                }
            }
        }
        diagnostics.valid_rows = valid_rows.len();

        let daily = summarize_days(&valid_rows);
        info!(
            rows = diagnostics.total_rows,
            test_rows = diagnostics.test_rows,
            dropped = diagnostics.dropped_rows,
            valid = diagnostics.valid_rows,
            days = daily.len(),
            "aggregated sales export"
        );

        Ok(SalesReport {
            valid_rows,
            daily,
            diagnostics,
        })
    }

    fn drop_test_rows<'a>(
        &self,
        table: &'a SalesTable,
        diagnostics: &mut RowDiagnostics,
    ) -> Vec<(usize, &'a Row)> {
        let marker = fold_text(self.test_marker.trim());
        table
            .rows()
            .iter()
            .enumerate()
            .filter(|(index, row)| {
                if marker.is_empty() {
                    return true;
                }
                let is_test = row
                    .get(&self.fields.description)
                    .as_text()
                    .map(|text| fold_text(&text).contains(&marker))
                    .unwrap_or(false);
                if is_test {
                    debug!(row = *index, "skipping test sale");
                    diagnostics.test_rows += 1;
                }
                !is_test
            })
            .collect()
    }
}

/// Aggregates with the built-in mapping, rules and test marker.
pub fn aggregate(table: &SalesTable) -> Result<SalesReport> {
    Aggregator::default().aggregate(table)
}

/// Group, sort, reduce and scan already validated sales.
pub fn summarize_days(sales: &[ClassifiedSale]) -> Vec<DailySummary> {
    let groups = group_by_date(sales);
    let ordered = sort_groups(groups);
    let totals: Vec<DayTotals> = ordered
        .into_iter()
        .map(|(date, day_sales)| reduce_day(date, &day_sales))
        .collect();
    cumulative_scan(&totals)
}

fn group_by_date(sales: &[ClassifiedSale]) -> HashMap<NaiveDate, Vec<&ClassifiedSale>> {
    let mut groups: HashMap<NaiveDate, Vec<&ClassifiedSale>> = HashMap::new();
    for sale in sales {
        groups.entry(sale.sale_date).or_default().push(sale);
    }
    groups
}

fn sort_groups(
    groups: HashMap<NaiveDate, Vec<&ClassifiedSale>>,
) -> Vec<(NaiveDate, Vec<&ClassifiedSale>)> {
    let mut ordered: Vec<_> = groups.into_iter().collect();
    ordered.sort_by_key(|(date, _)| *date);
    ordered
}

fn reduce_day(date: NaiveDate, sales: &[&ClassifiedSale]) -> DayTotals {
    DayTotals {
        date,
        total_revenue: sales.iter().map(|sale| sale.amount).sum(),
        total_slots: sales.iter().map(|sale| sale.slots_total).sum(),
    }
}

/// Running totals over days that are already in ascending date order.
pub fn cumulative_scan(days: &[DayTotals]) -> Vec<DailySummary> {
    let mut cumulative_revenue = 0.0;
    let mut cumulative_slots = 0.0;
    days.iter()
        .map(|day| {
            cumulative_revenue += day.total_revenue;
            cumulative_slots += day.total_slots;
            DailySummary {
                date: day.date,
                total_revenue: day.total_revenue,
                total_slots: day.total_slots,
                avg_ticket: ticket(day.total_revenue, day.total_slots),
                cumulative_revenue,
                cumulative_slots,
                cumulative_avg_ticket: ticket(cumulative_revenue, cumulative_slots),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sales::table::CellValue;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sale(date: NaiveDate, amount: f64, slots: u32) -> ClassifiedSale {
        ClassifiedSale {
            row: 0,
            description: None,
            amount,
            quantity: 1.0,
            sale_date: date,
            slots_per_unit: slots,
            slots_total: f64::from(slots),
            rule: None,
        }
    }

    #[test]
    fn raw_sale_reads_mapped_columns() {
        let fields = FieldMapping::default();
        let row = Row::new()
            .with("Descrição", "Pacote (5 sessões)")
            .with("Valor", "50")
            .with("Data da venda", "2024-01-02 10:00:00");
        let raw = RawSale::from_row(3, &row, &fields, DateOrder::DayFirst);
        assert_eq!(raw.row, 3);
        assert_eq!(raw.quantity, 1.0);
        assert!(raw.is_valid());
        let classified = raw.classify(&SlotClassifier::default()).unwrap();
        assert_eq!(classified.slots_per_unit, 5);
        assert_eq!(classified.slots_total, 5.0);
        assert_eq!(classified.sale_date, ymd(2024, 1, 2));
    }

    #[test]
    fn raw_sale_without_amount_does_not_classify() {
        let fields = FieldMapping::default();
        let row = Row::new()
            .with("Descrição", "Avulsa")
            .with("Valor", CellValue::Empty)
            .with("Data da venda", "2024-01-02");
        let raw = RawSale::from_row(0, &row, &fields, DateOrder::DayFirst);
        assert!(!raw.is_valid());
        assert!(raw.classify(&SlotClassifier::default()).is_none());
    }

    #[test]
    fn days_come_out_sorted_even_when_input_is_not() {
        let sales = vec![
            sale(ymd(2024, 1, 3), 30.0, 3),
            sale(ymd(2024, 1, 1), 10.0, 1),
            sale(ymd(2024, 1, 2), 20.0, 2),
            sale(ymd(2024, 1, 1), 5.0, 1),
        ];
        let daily = summarize_days(&sales);
        let dates: Vec<NaiveDate> = daily.iter().map(|day| day.date).collect();
        assert_eq!(dates, vec![ymd(2024, 1, 1), ymd(2024, 1, 2), ymd(2024, 1, 3)]);
        assert_eq!(daily[0].total_revenue, 15.0);
        assert_eq!(daily[0].total_slots, 2.0);
        assert_eq!(daily[2].cumulative_revenue, 65.0);
        assert_eq!(daily[2].cumulative_slots, 7.0);
    }

    #[test]
    fn scan_keeps_undefined_ratios_explicit() {
        let totals = [
            DayTotals {
                date: ymd(2024, 1, 1),
                total_revenue: 90.0,
                total_slots: 0.0,
            },
            DayTotals {
                date: ymd(2024, 1, 2),
                total_revenue: 10.0,
                total_slots: 5.0,
            },
        ];
        let daily = cumulative_scan(&totals);
        assert_eq!(daily[0].avg_ticket, None);
        assert_eq!(daily[0].cumulative_avg_ticket, None);
        assert_eq!(daily[1].avg_ticket, Some(2.0));
        assert_eq!(daily[1].cumulative_avg_ticket, Some(20.0));
    }

    #[test]
    fn empty_marker_keeps_every_row() {
        let table = SalesTable::new(["Descrição", "Valor", "Data da venda"]).with_row(
            Row::new()
                .with("Descrição", "teste avulsa")
                .with("Valor", 10.0)
                .with("Data da venda", "2024-01-01"),
        );
        let report = Aggregator::default()
            .with_test_marker("")
            .aggregate(&table)
            .unwrap();
        assert_eq!(report.diagnostics.test_rows, 0);
        assert_eq!(report.daily[0].total_slots, 1.0);
    }

    #[test]
    fn huge_quantities_do_not_overflow() {
        let huge = "9000000000000000000";
        let table = SalesTable::new(["Descrição", "Valor", "Quantidade", "Data da venda"])
            .with_row(
                Row::new()
                    .with("Descrição", "Semestral")
                    .with("Valor", 10.0)
                    .with("Quantidade", huge)
                    .with("Data da venda", "2024-01-01"),
            )
            .with_row(
                Row::new()
                    .with("Descrição", "Avulsa")
                    .with("Valor", 10.0)
                    .with("Quantidade", huge)
                    .with("Data da venda", "2024-01-02"),
            )
            .with_row(
                Row::new()
                    .with("Descrição", "Avulsa")
                    .with("Valor", 10.0)
                    .with("Quantidade", huge)
                    .with("Data da venda", "2024-01-02"),
            );
        let report = aggregate(&table).unwrap();
        assert_eq!(report.daily[0].total_slots, 24.0 * 9e18);
        assert_eq!(report.daily[1].total_slots, 2.0 * 9e18);
        assert!(report.headline().total_slots.is_finite());
        assert!(report.daily[1].cumulative_avg_ticket.unwrap() > 0.0);
    }

    #[test]
    fn fractional_quantity_scales_slots() {
        let table = SalesTable::new(["Descrição", "Valor", "Quantidade", "Data da venda"])
            .with_row(
                Row::new()
                    .with("Descrição", "Mensal")
                    .with("Valor", 100.0)
                    .with("Quantidade", "2.5")
                    .with("Data da venda", "2024-01-01"),
            );
        let report = aggregate(&table).unwrap();
        assert_eq!(report.valid_rows[0].quantity, 2.5);
        assert_eq!(report.valid_rows[0].slots_total, 10.0);
        assert_eq!(report.daily[0].avg_ticket, Some(10.0));
    }

    #[test]
    fn table_without_header_is_an_empty_report() {
        let report = aggregate(&SalesTable::new(Vec::<String>::new())).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.diagnostics, RowDiagnostics::default());
    }
}
