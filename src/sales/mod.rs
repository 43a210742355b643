//! Sales export model, slot classification, and the daily aggregation pipeline.

pub mod aggregate;
pub mod classifier;
pub mod normalize;
pub mod schema;
pub mod summary;
pub mod table;

pub use aggregate::{aggregate, cumulative_scan, summarize_days, Aggregator, RawSale};
pub use classifier::{
    classify, fold_text, Classification, ClassifierConfig, KeywordRule, SlotClassifier, SlotRule,
};
pub use normalize::DateOrder;
pub use schema::FieldMapping;
pub use summary::{
    ticket, ClassifiedSale, DailySummary, DayTotals, Headline, RowDiagnostics, SalesReport,
};
pub use table::{CellValue, Row, SalesTable};
