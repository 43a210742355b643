use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::debug;

use crate::{
    errors::Result,
    sales::{CellValue, Row, SalesTable},
};

use super::RowSource;

/// Reads the first worksheet of a workbook. Row one is the header.
///
/// Date-formatted cells arrive as [`CellValue::DateTime`], so sale dates from
/// the point-of-sale export never go through text parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSource;

impl RowSource for XlsxSource {
    fn read_table(&self, bytes: &[u8]) -> Result<SalesTable> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        let Some(sheet) = workbook.sheet_names().first().cloned() else {
            return Ok(SalesTable::new(Vec::<String>::new()));
        };
        let range = workbook.worksheet_range(&sheet)?;

        let mut rows = range.rows();
        let headers: Vec<Option<String>> = match rows.next() {
            Some(header) => header.iter().map(header_name).collect(),
            None => return Ok(SalesTable::new(Vec::<String>::new())),
        };
        let mut table = SalesTable::new(headers.iter().flatten().cloned());
        for cells in rows {
            if cells.iter().all(|cell| matches!(cell, Data::Empty)) {
                continue;
            }
            let mut row = Row::new();
            for (column, cell) in headers.iter().zip(cells) {
                if let Some(column) = column {
                    row.insert(column.as_str(), cell_value(cell));
                }
            }
            table.push(row);
        }
        debug!(sheet = %sheet, columns = table.columns().len(), rows = table.len(), "read workbook");
        Ok(table)
    }
}

fn header_name(cell: &Data) -> Option<String> {
    let name = cell.to_string().trim().to_string();
    (!name.is_empty()).then_some(name)
}

/// Maps a workbook cell onto the table's cell model.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            CellValue::from(text.as_str())
        }
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Text(if *value { "TRUE" } else { "FALSE" }.into()),
        Data::DateTime(stamp) => match stamp.as_datetime() {
            Some(value) => CellValue::DateTime(value),
            None => CellValue::Number(stamp.as_f64()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_cells_map_to_matching_values() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_value(&Data::Float(12.5)), CellValue::Number(12.5));
        assert_eq!(cell_value(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(
            cell_value(&Data::String("Avulsa".into())),
            CellValue::Text("Avulsa".into())
        );
        assert_eq!(
            cell_value(&Data::DateTimeIso("2024-01-02T10:00:00".into())),
            CellValue::Text("2024-01-02T10:00:00".into())
        );
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        assert!(XlsxSource.read_table(b"not a workbook").is_err());
    }
}
