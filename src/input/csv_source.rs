use tracing::debug;

use crate::{
    errors::Result,
    sales::{Row, SalesTable},
};

use super::RowSource;

/// Reads delimited text with a header row. The header defines the schema.
#[derive(Debug, Clone, Copy)]
pub struct CsvSource {
    delimiter: u8,
}

impl Default for CsvSource {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvSource {
    /// Non-ASCII delimiters fall back to a comma.
    pub fn with_delimiter(delimiter: char) -> Self {
        let delimiter = if delimiter.is_ascii() {
            delimiter as u8
        } else {
            b','
        };
        Self { delimiter }
    }
}

impl RowSource for CsvSource {
    fn read_table(&self, bytes: &[u8]) -> Result<SalesTable> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = SalesTable::new(headers.iter().cloned());
        for record in reader.records() {
            let record = record?;
            let mut row = Row::new();
            for (column, value) in headers.iter().zip(record.iter()) {
                row.insert(column.as_str(), value);
            }
            table.push(row);
        }
        debug!(columns = headers.len(), rows = table.len(), "read csv export");
        Ok(table)
    }
}
