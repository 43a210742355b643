//! Display formatting for money, ratios and dates. No conversion happens here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("BRL")
    }
}

/// Separators and date layout for one language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_pattern: String,
}

impl LocaleConfig {
    /// Known tags get their usual separators; anything else reads as en-US.
    pub fn for_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" | "de-de" | "es-es" => Self {
                language_tag: tag.into(),
                decimal_separator: ',',
                grouping_separator: '.',
                date_pattern: "%d/%m/%Y".into(),
            },
            _ => Self {
                language_tag: tag.into(),
                decimal_separator: '.',
                grouping_separator: ',',
                date_pattern: "%Y-%m-%d".into(),
            },
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("pt-BR")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "BRL" => "R$".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let mut out = String::new();
    if value < 0.0 && body.chars().any(|ch| ch != '0' && ch != '.') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, locale.grouping_separator));
    if let Some(frac_part) = frac_part {
        out.push(locale.decimal_separator);
        out.push_str(frac_part);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency_value(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let body = format_number(locale, amount, minor_units_for(code.as_str()));
    let symbol = symbol_for(code.as_str());
    match body.strip_prefix('-') {
        Some(positive) => format!("-{} {}", symbol, positive),
        None => format!("{} {}", symbol, body),
    }
}

/// Formats a revenue-per-slot ratio; undefined ratios render as `n/a`.
pub fn format_ticket(value: Option<f64>, locale: &LocaleConfig) -> String {
    match value {
        Some(value) => format_number(locale, value, 2),
        None => "n/a".into(),
    }
}

/// Whole counts print without decimals; fractional ones keep two places.
pub fn format_slots(locale: &LocaleConfig, value: f64) -> String {
    let precision = if value.fract() == 0.0 { 0 } else { 2 };
    format_number(locale, value, precision)
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    date.format(&locale.date_pattern).to_string()
}
