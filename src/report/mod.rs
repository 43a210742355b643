//! Plain-text and JSON renderings of a [`SalesReport`].

pub mod table;

use colored::Colorize;

use crate::{
    config::Config,
    currency::{
        format_currency_value, format_date, format_slots, format_ticket, CurrencyCode, LocaleConfig,
    },
    errors::Result,
    sales::SalesReport,
};

use table::{Table, TableColumn};

/// Locale and currency used when rendering figures.
#[derive(Debug, Clone)]
pub struct ReportStyle {
    pub locale: LocaleConfig,
    pub currency: CurrencyCode,
    pub color: bool,
}

impl ReportStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            locale: LocaleConfig::for_tag(&config.locale),
            currency: CurrencyCode::new(config.currency.as_str()),
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn money(&self, amount: f64) -> String {
        format_currency_value(amount, &self.currency, &self.locale)
    }

    fn title(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Headline figures followed by the daily table.
pub fn render_summary(report: &SalesReport, style: &ReportStyle) -> String {
    let headline = report.headline();
    let mut out = String::new();
    out.push_str(&style.title("Sales metrics"));
    out.push('\n');
    out.push_str(&format!(
        "Cumulative ticket (per slot): {}\n",
        format_ticket(headline.cumulative_avg_ticket, &style.locale)
    ));
    out.push_str(&format!(
        "Total revenue: {}\n",
        style.money(headline.total_revenue)
    ));
    out.push_str(&format!(
        "Total slots: {}\n",
        format_slots(&style.locale, headline.total_slots)
    ));

    if report.is_empty() {
        out.push_str("\nNo valid sales found.\n");
        return out;
    }

    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::right("Revenue"),
        TableColumn::right("Slots"),
        TableColumn::right("Ticket"),
        TableColumn::right("Cum. revenue"),
        TableColumn::right("Cum. slots"),
        TableColumn::right("Cum. ticket"),
    ]);
    for day in &report.daily {
        table.push(vec![
            format_date(&style.locale, day.date),
            style.money(day.total_revenue),
            format_slots(&style.locale, day.total_slots),
            format_ticket(day.avg_ticket, &style.locale),
            style.money(day.cumulative_revenue),
            format_slots(&style.locale, day.cumulative_slots),
            format_ticket(day.cumulative_avg_ticket, &style.locale),
        ]);
    }
    out.push('\n');
    out.push_str(&table.render());
    out.push('\n');

    let diagnostics = &report.diagnostics;
    if diagnostics.test_rows + diagnostics.dropped_rows > 0 {
        out.push_str(&format!(
            "\nSkipped {} test row(s) and {} row(s) with unreadable amount or date.\n",
            diagnostics.test_rows, diagnostics.dropped_rows
        ));
    }
    out
}

/// Detail view of the rows that made it into the aggregation.
pub fn render_rows(report: &SalesReport, style: &ReportStyle) -> String {
    let mut table = Table::new(vec![
        TableColumn::right("Row"),
        TableColumn::left("Date"),
        TableColumn::left("Description"),
        TableColumn::right("Amount"),
        TableColumn::right("Qty"),
        TableColumn::right("Slots/unit"),
        TableColumn::right("Slots"),
    ]);
    for sale in &report.valid_rows {
        table.push(vec![
            (sale.row + 1).to_string(),
            format_date(&style.locale, sale.sale_date),
            sale.description.clone().unwrap_or_default(),
            style.money(sale.amount),
            format_slots(&style.locale, sale.quantity),
            sale.slots_per_unit.to_string(),
            format_slots(&style.locale, sale.slots_total),
        ]);
    }
    format!("{}\n", table.render())
}

/// Pretty JSON export of the whole report.
pub fn to_json(report: &SalesReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
