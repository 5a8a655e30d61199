//! Domain types for priced catalog items.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// A priced, density-rated material definition within a category.
///
/// Identity key is `(category, item)`; the same item name may appear under
/// several categories with independent pricing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub category: String,
    pub item: String,
    pub cost_per_unit: f64,
    pub cost_unit: String,
    pub default_density: f64,
    pub density_unit: String,
}

impl CatalogItem {
    pub fn new(
        category: impl Into<String>,
        item: impl Into<String>,
        cost_per_unit: f64,
        cost_unit: impl Into<String>,
        default_density: f64,
        density_unit: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            item: item.into(),
            cost_per_unit: cost_per_unit.max(0.0),
            cost_unit: cost_unit.into(),
            default_density: default_density.max(0.0),
            density_unit: density_unit.into(),
        }
    }

    /// True when cost and density are expressed in different units, meaning a
    /// density conversion applies and an override may be offered.
    pub fn cross_unit(&self) -> bool {
        self.cost_unit != self.density_unit
    }
}

impl NamedEntity for CatalogItem {
    fn name(&self) -> &str {
        &self.item
    }
}

impl Displayable for CatalogItem {
    fn display_label(&self) -> String {
        format!("{} ({})", self.item, self.category)
    }
}
