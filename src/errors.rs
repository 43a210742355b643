use thiserror::Error;

use crate::config::ConfigError;

/// Failures that cross the crate boundary.
///
/// Row-level problems (unparsable amounts or dates, unknown descriptions) never
/// show up here; they are absorbed by the pipeline and counted in
/// [`RowDiagnostics`](crate::sales::RowDiagnostics).
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("missing required field `{field}` (expected column \"{column}\")")]
    MissingField { field: &'static str, column: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("invalid classifier pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
