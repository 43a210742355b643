use std::{fs, path::Path, sync::Arc};

use tracing::{debug, info};

use crate::{
    config::Config,
    errors::Result,
    input::InputFormat,
    sales::{Aggregator, SalesReport, SalesTable},
};

use super::cache::{ContentHash, ReportCache};

/// Runs the pipeline for one input at a time and memoizes the last result.
#[derive(Debug)]
pub struct MetricsEngine {
    config: Config,
    aggregator: Aggregator,
    cache: ReportCache,
}

impl MetricsEngine {
    pub fn new(config: Config) -> Result<Self> {
        let aggregator = Aggregator::from_config(&config)?;
        Ok(Self {
            config,
            aggregator,
            cache: ReportCache::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Aggregates a table directly, bypassing the cache.
    pub fn process_table(&self, table: &SalesTable) -> Result<SalesReport> {
        self.aggregator.aggregate(table)
    }

    /// Decodes and aggregates `bytes`, reusing the previous report when the
    /// content is unchanged. Any other input evicts the cached report first.
    pub fn process_bytes(&mut self, bytes: &[u8], format: InputFormat) -> Result<Arc<SalesReport>> {
        let hash = ContentHash::of(format.tag(), bytes);
        if let Some(report) = self.cache.get(&hash) {
            debug!(%hash, "reusing cached report");
            return Ok(report);
        }
        self.cache.invalidate();
        debug!(%hash, "processing new input");

        let table = format.source(&self.config).read_table(bytes)?;
        let report = self.aggregator.aggregate(&table)?;
        Ok(self.cache.store(hash, report))
    }

    pub fn process_file(&mut self, path: &Path) -> Result<Arc<SalesReport>> {
        let format = InputFormat::from_path(path)?;
        let bytes = fs::read(path)?;
        info!(path = %path.display(), bytes = bytes.len(), "reading sales export");
        self.process_bytes(&bytes, format)
    }

    pub fn cached_input(&self) -> Option<ContentHash> {
        self.cache.current()
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}
