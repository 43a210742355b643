#![doc(test(attr(deny(warnings))))]

//! Slot Metrics turns point-of-sale sales exports into slot counts and a
//! cumulative daily revenue-per-slot series.
//!
//! ```
//! use slot_metrics::sales::{aggregate, classify, Row, SalesTable};
//!
//! assert_eq!(classify(Some("Pacote (10 sessões)")), 10);
//!
//! let table = SalesTable::new(["Descrição", "Valor", "Data da venda"]).with_row(
//!     Row::new()
//!         .with("Descrição", "Mensal")
//!         .with("Valor", 300.0)
//!         .with("Data da venda", "2024-01-01"),
//! );
//! let report = aggregate(&table).unwrap();
//! assert_eq!(report.daily[0].avg_ticket, Some(75.0));
//! ```

pub mod config;
pub mod currency;
pub mod errors;
pub mod input;
pub mod pipeline;
pub mod report;
pub mod sales;
pub mod utils;

pub use errors::{MetricsError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Slot Metrics tracing initialized.");
    });
}
