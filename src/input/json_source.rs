use serde_json::{Map, Value};

use crate::{
    errors::{MetricsError, Result},
    sales::{CellValue, Row, SalesTable},
};

use super::RowSource;

/// Reads a JSON array of objects. The schema is the union of keys across all
/// records.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSource;

impl RowSource for JsonSource {
    fn read_table(&self, bytes: &[u8]) -> Result<SalesTable> {
        let records: Vec<Value> = serde_json::from_slice(bytes)?;
        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let object: Map<String, Value> = match record {
                Value::Object(object) => object,
                other => {
                    return Err(MetricsError::UnsupportedInput(format!(
                        "record {} is not an object: {}",
                        index, other
                    )))
                }
            };
            let mut row = Row::new();
            for (key, value) in object {
                if !columns.contains(&key) {
                    columns.push(key.clone());
                }
                row.insert(key, CellValue::from(value));
            }
            rows.push(row);
        }
        let mut table = SalesTable::new(columns);
        for row in rows {
            table.push(row);
        }
        Ok(table)
    }
}
