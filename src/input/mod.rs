//! Adapters that turn exported files into [`SalesTable`]s.

pub mod csv_source;
pub mod json_source;
pub mod xlsx_source;

use std::path::Path;

use crate::{
    config::Config,
    errors::{MetricsError, Result},
    sales::SalesTable,
};

pub use csv_source::CsvSource;
pub use json_source::JsonSource;
pub use xlsx_source::XlsxSource;

/// Something that can decode raw export bytes into a table.
pub trait RowSource: Send + Sync {
    fn read_table(&self, bytes: &[u8]) -> Result<SalesTable>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
    Xlsx,
}

impl InputFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") | Some("txt") => Ok(InputFormat::Csv),
            Some("json") => Ok(InputFormat::Json),
            Some("xlsx") | Some("xlsm") | Some("xls") | Some("ods") => Ok(InputFormat::Xlsx),
            _ => Err(MetricsError::UnsupportedInput(format!(
                "cannot tell the format of {}",
                path.display()
            ))),
        }
    }

    pub fn source(self, config: &Config) -> Box<dyn RowSource> {
        match self {
            InputFormat::Csv => Box::new(CsvSource::with_delimiter(config.csv_delimiter)),
            InputFormat::Json => Box::new(JsonSource),
            InputFormat::Xlsx => Box::new(XlsxSource),
        }
    }

    /// Short name mixed into the content hash of cached inputs.
    pub fn tag(self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Json => "json",
            InputFormat::Xlsx => "xlsx",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("vendas.CSV")).unwrap(),
            InputFormat::Csv
        );
        assert_eq!(
            InputFormat::from_path(Path::new("vendas.json")).unwrap(),
            InputFormat::Json
        );
    }

    #[test]
    fn spreadsheets_use_the_workbook_reader() {
        assert_eq!(
            InputFormat::from_path(Path::new("Vendas_EVO.xlsx")).unwrap(),
            InputFormat::Xlsx
        );
        assert_eq!(
            InputFormat::from_path(Path::new("vendas.ODS")).unwrap(),
            InputFormat::Xlsx
        );
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let err = InputFormat::from_path(Path::new("vendas")).unwrap_err();
        assert!(matches!(err, MetricsError::UnsupportedInput(_)));
        assert!(InputFormat::from_path(Path::new("vendas.pdf")).is_err());
    }
}
