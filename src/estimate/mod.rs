//! Unit conversion engine: quantity + density + unit cost to a cost figure.

use crate::domain::{AreaRecord, CatalogItem};

/// Unit areas are measured in; density units matching it default the quantity
/// to the area size.
pub const AREA_SIZE_UNIT: &str = "sqft";

/// Result of a successful estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub units_needed: f64,
    pub total_cost: f64,
}

/// Computes the cost-bearing units and total cost for a quantity.
///
/// Returns `None` when the quantity is not positive; that is a prompt for
/// input, not a failure. A zero density means the cost unit and density unit
/// coincide (or the caller zeroed the conversion) and the quantity passes
/// through unchanged.
pub fn estimate(quantity: f64, density: f64, cost_per_unit: f64) -> Option<Estimate> {
    if quantity <= 0.0 {
        return None;
    }
    let units_needed = if density > 0.0 {
        quantity * density
    } else {
        quantity
    };
    Some(Estimate {
        units_needed,
        total_cost: units_needed * cost_per_unit,
    })
}

/// Where the quantity for an item starts out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityDefault {
    /// Density unit matches the area-size measure: default to the area size,
    /// overridable by the user.
    AreaSize(f64),
    /// No sensible default; the user must supply a value (starting at 0).
    Manual,
}

impl QuantityDefault {
    pub fn initial_value(self) -> f64 {
        match self {
            QuantityDefault::AreaSize(size) => size,
            QuantityDefault::Manual => 0.0,
        }
    }
}

pub fn quantity_default(item: &CatalogItem, area: &AreaRecord) -> QuantityDefault {
    if item.density_unit == AREA_SIZE_UNIT {
        QuantityDefault::AreaSize(area.size_value)
    } else {
        QuantityDefault::Manual
    }
}

/// Whether the catalog density may be overridden for an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DensityPolicy {
    /// Cross-unit item: catalog density is a default the user may override.
    Overridable(f64),
    /// Cost unit equals density unit: the catalog value is passed through
    /// as-is and overrides are ignored.
    Fixed(f64),
}

impl DensityPolicy {
    pub fn resolve(self, requested: Option<f64>) -> f64 {
        match self {
            DensityPolicy::Overridable(default) => requested.unwrap_or(default),
            DensityPolicy::Fixed(value) => value,
        }
    }
}

pub fn density_policy(item: &CatalogItem) -> DensityPolicy {
    if item.cross_unit() {
        DensityPolicy::Overridable(item.default_density)
    } else {
        DensityPolicy::Fixed(item.default_density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_or_negative_quantity_yields_none() {
        assert!(estimate(0.0, 1.0, 5.0).is_none());
        assert!(estimate(-3.0, 1.0, 5.0).is_none());
    }

    #[test]
    fn positive_density_multiplies() {
        let result = estimate(200.0, 0.5, 4.0).unwrap();
        assert_eq!(result.units_needed, 100.0);
        assert_eq!(result.total_cost, 400.0);
    }

    #[test]
    fn zero_density_passes_quantity_through() {
        let result = estimate(12.0, 0.0, 3.0).unwrap();
        assert_eq!(result.units_needed, 12.0);
        assert_eq!(result.total_cost, 36.0);
    }

    #[test]
    fn quantity_defaults_follow_density_unit() {
        let area = AreaRecord::new("Kitchen", 200.0);
        let sqft_item = CatalogItem::new("Flooring", "Tile", 5.0, "USD", 1.0, "sqft");
        let each_item = CatalogItem::new("Fixtures", "Outlet", 4.0, "USD", 1.0, "each");
        assert_eq!(
            quantity_default(&sqft_item, &area),
            QuantityDefault::AreaSize(200.0)
        );
        assert_eq!(quantity_default(&each_item, &area), QuantityDefault::Manual);
        assert_eq!(quantity_default(&each_item, &area).initial_value(), 0.0);
    }

    #[test]
    fn density_override_only_applies_cross_unit() {
        let cross = CatalogItem::new("Paint", "Primer", 20.0, "gallon", 0.0025, "sqft");
        let same = CatalogItem::new("Fixtures", "Outlet", 4.0, "each", 2.0, "each");
        assert_eq!(density_policy(&cross).resolve(Some(0.005)), 0.005);
        assert_eq!(density_policy(&cross).resolve(None), 0.0025);
        // Same-unit items keep the raw catalog density even when an override
        // is requested; the catalog value flows through the formula unchanged.
        assert_eq!(density_policy(&same).resolve(Some(9.0)), 2.0);
    }
}
