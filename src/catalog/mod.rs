//! Immutable, validated view over the two ingestion tables.
//!
//! Construction validates the table schemas once; lookups never re-validate.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{AreaRecord, CatalogItem},
    errors::{EstimatorError, Result},
};

/// Columns the area table must carry.
pub const AREA_COLUMNS: [&str; 3] = ["item_number", "area_name", "area_value"];

/// Columns the category table must carry.
pub const CATEGORY_COLUMNS: [&str; 7] = [
    "category_item_number",
    "category",
    "item",
    "cost",
    "cost_unit",
    "density",
    "density_unit",
];

/// An untyped tabular dataset handed over by the ingestion collaborator.
///
/// Rows hold cells in column order; extra columns beyond the required set are
/// carried along and ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }
}

/// Read-only catalog built from the area and category tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    areas: Vec<AreaRecord>,
    items: Vec<CatalogItem>,
    categories: Vec<String>,
}

impl Catalog {
    /// Validates both tables and builds the catalog.
    ///
    /// Duplicate area names keep the first occurrence; duplicate
    /// `(category, item)` pairs likewise. Numeric cells are clamped to zero
    /// when negative.
    pub fn from_tables(area_table: &RawTable, category_table: &RawTable) -> Result<Self> {
        validate_schema(area_table, "area", &AREA_COLUMNS)?;
        validate_schema(category_table, "category", &CATEGORY_COLUMNS)?;

        let mut areas: Vec<AreaRecord> = Vec::new();
        for (row_number, row) in TableRows::new(area_table).enumerate() {
            let name = row.text("area_name")?;
            if areas.iter().any(|area| area.name == name) {
                continue;
            }
            let size_value = row.number("area_value", row_number)?;
            areas.push(AreaRecord::new(name, size_value));
        }

        let mut items: Vec<CatalogItem> = Vec::new();
        let mut categories: Vec<String> = Vec::new();
        for (row_number, row) in TableRows::new(category_table).enumerate() {
            let category = row.text("category")?;
            let item = row.text("item")?;
            if !categories.iter().any(|known| *known == category) {
                categories.push(category.clone());
            }
            if items
                .iter()
                .any(|known| known.category == category && known.item == item)
            {
                continue;
            }
            let cost = row.number("cost", row_number)?;
            let density = row.number("density", row_number)?;
            items.push(CatalogItem::new(
                category,
                item,
                cost,
                row.text("cost_unit")?,
                density,
                row.text("density_unit")?,
            ));
        }

        Ok(Self {
            areas,
            items,
            categories,
        })
    }

    /// All areas, in first-appearance order.
    pub fn areas(&self) -> &[AreaRecord] {
        &self.areas
    }

    pub fn area_info(&self, name: &str) -> Result<&AreaRecord> {
        self.areas
            .iter()
            .find(|area| area.name == name)
            .ok_or_else(|| EstimatorError::AreaNotFound(name.to_string()))
    }

    /// Distinct category names, in first-appearance order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|category| category == name)
    }

    /// Item names belonging to a category, in first-appearance order.
    /// Unknown categories yield an empty list.
    pub fn items_in_category(&self, category: &str) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .map(|item| item.item.as_str())
            .collect()
    }

    pub fn item_info(&self, category: &str, item: &str) -> Result<&CatalogItem> {
        self.items
            .iter()
            .find(|known| known.category == category && known.item == item)
            .ok_or_else(|| EstimatorError::ItemNotFound {
                category: category.to_string(),
                item: item.to_string(),
            })
    }
}

fn validate_schema(table: &RawTable, table_name: &'static str, required: &[&str]) -> Result<()> {
    let missing = table.missing_columns(required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EstimatorError::Schema {
            table: table_name,
            missing,
        })
    }
}

struct TableRows<'a> {
    table: &'a RawTable,
    next: usize,
}

impl<'a> TableRows<'a> {
    fn new(table: &'a RawTable) -> Self {
        Self { table, next: 0 }
    }
}

impl<'a> Iterator for TableRows<'a> {
    type Item = RowView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.table.rows.get(self.next)?;
        self.next += 1;
        Some(RowView {
            table: self.table,
            row,
        })
    }
}

struct RowView<'a> {
    table: &'a RawTable,
    row: &'a [String],
}

impl RowView<'_> {
    fn text(&self, column: &str) -> Result<String> {
        // Column presence was validated up front; a short row is a data defect.
        let index = self
            .table
            .column_index(column)
            .expect("column validated during schema check");
        self.row
            .get(index)
            .map(|cell| cell.trim().to_string())
            .ok_or_else(|| {
                EstimatorError::InvalidInput(format!("row is missing a value for `{column}`"))
            })
    }

    fn number(&self, column: &str, row_number: usize) -> Result<f64> {
        let raw = self.text(column)?;
        let value: f64 = raw.parse().map_err(|_| {
            EstimatorError::InvalidInput(format!(
                "row {} has a non-numeric `{column}` value: `{raw}`",
                row_number + 1
            ))
        })?;
        Ok(value.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_table() -> RawTable {
        RawTable::new(
            AREA_COLUMNS.iter().map(|c| c.to_string()).collect(),
            vec![
                vec!["1".into(), "Kitchen".into(), "200".into()],
                vec!["2".into(), "Garage".into(), "450".into()],
                vec!["3".into(), "Kitchen".into(), "999".into()],
            ],
        )
    }

    fn category_table() -> RawTable {
        RawTable::new(
            CATEGORY_COLUMNS.iter().map(|c| c.to_string()).collect(),
            vec![
                vec![
                    "1".into(),
                    "Flooring".into(),
                    "Tile".into(),
                    "5".into(),
                    "USD".into(),
                    "1".into(),
                    "sqft".into(),
                ],
                vec![
                    "2".into(),
                    "Flooring".into(),
                    "Hardwood".into(),
                    "9".into(),
                    "USD".into(),
                    "1".into(),
                    "sqft".into(),
                ],
                vec![
                    "3".into(),
                    "Paint".into(),
                    "Primer".into(),
                    "20".into(),
                    "gallon".into(),
                    "0.0025".into(),
                    "sqft".into(),
                ],
            ],
        )
    }

    #[test]
    fn builds_catalog_with_first_appearance_order() {
        let catalog = Catalog::from_tables(&area_table(), &category_table()).unwrap();
        let names: Vec<_> = catalog.areas().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Kitchen", "Garage"]);
        let categories: Vec<_> = catalog.categories().collect();
        assert_eq!(categories, ["Flooring", "Paint"]);
        assert_eq!(catalog.items_in_category("Flooring"), ["Tile", "Hardwood"]);
    }

    #[test]
    fn duplicate_area_keeps_first_row() {
        let catalog = Catalog::from_tables(&area_table(), &category_table()).unwrap();
        assert_eq!(catalog.area_info("Kitchen").unwrap().size_value, 200.0);
    }

    #[test]
    fn missing_columns_fail_with_table_name() {
        let broken = RawTable::new(
            vec!["item_number".into(), "area_name".into()],
            vec![vec!["1".into(), "Kitchen".into()]],
        );
        let err = Catalog::from_tables(&broken, &category_table()).unwrap_err();
        match err {
            EstimatorError::Schema { table, missing } => {
                assert_eq!(table, "area");
                assert_eq!(missing, vec!["area_value".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_lookups_fail_loudly() {
        let catalog = Catalog::from_tables(&area_table(), &category_table()).unwrap();
        assert!(catalog.area_info("Attic").is_err());
        assert!(catalog.item_info("Flooring", "Carpet").is_err());
        assert!(catalog.items_in_category("Roofing").is_empty());
    }

    #[test]
    fn negative_numbers_clamp_to_zero() {
        let table = RawTable::new(
            AREA_COLUMNS.iter().map(|c| c.to_string()).collect(),
            vec![vec!["1".into(), "Cellar".into(), "-12".into()]],
        );
        let catalog = Catalog::from_tables(&table, &category_table()).unwrap();
        assert_eq!(catalog.area_info("Cellar").unwrap().size_value, 0.0);
    }

    #[test]
    fn non_numeric_cells_are_rejected() {
        let table = RawTable::new(
            AREA_COLUMNS.iter().map(|c| c.to_string()).collect(),
            vec![vec!["1".into(), "Cellar".into(), "lots".into()]],
        );
        assert!(Catalog::from_tables(&table, &category_table()).is_err());
    }
}
