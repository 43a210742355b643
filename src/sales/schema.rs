use serde::{Deserialize, Serialize};

use crate::errors::{MetricsError, Result};

use super::table::SalesTable;

/// Maps the logical sale fields onto the column names of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub description: String,
    pub amount: String,
    pub quantity: String,
    pub sale_date: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            description: "Descrição".into(),
            amount: "Valor".into(),
            quantity: "Quantidade".into(),
            sale_date: "Data da venda".into(),
        }
    }
}

impl FieldMapping {
    /// Fails on the first required field whose column is absent from `table`.
    ///
    /// Quantity is optional and never checked.
    pub fn check(&self, table: &SalesTable) -> Result<()> {
        let required = [
            ("description", &self.description),
            ("amount", &self.amount),
            ("sale_date", &self.sale_date),
        ];
        for (field, column) in required {
            if !table.has_column(column) {
                return Err(MetricsError::MissingField {
                    field,
                    column: column.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn has_quantity(&self, table: &SalesTable) -> bool {
        table.has_column(&self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_table_without_quantity() {
        let table = SalesTable::new(["Descrição", "Valor", "Data da venda"]);
        let mapping = FieldMapping::default();
        assert!(mapping.check(&table).is_ok());
        assert!(!mapping.has_quantity(&table));
    }

    #[test]
    fn names_the_missing_field() {
        let table = SalesTable::new(["Descrição", "Data da venda"]);
        let err = FieldMapping::default().check(&table).unwrap_err();
        match err {
            MetricsError::MissingField { field, column } => {
                assert_eq!(field, "amount");
                assert_eq!(column, "Valor");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn custom_mapping_is_honoured() {
        let mapping = FieldMapping {
            description: "item".into(),
            amount: "total".into(),
            quantity: "qty".into(),
            sale_date: "sold_at".into(),
        };
        let table = SalesTable::new(["item", "total", "sold_at", "qty"]);
        assert!(mapping.check(&table).is_ok());
        assert!(mapping.has_quantity(&table));
    }
}
