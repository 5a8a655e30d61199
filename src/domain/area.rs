//! Domain type for a named physical area.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// A named physical space whose size drives quantity defaults.
///
/// The size is expressed in square feet; the unit is implicit throughout the
/// source tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AreaRecord {
    pub name: String,
    pub size_value: f64,
}

impl AreaRecord {
    pub fn new(name: impl Into<String>, size_value: f64) -> Self {
        Self {
            name: name.into(),
            size_value: size_value.max(0.0),
        }
    }
}

impl NamedEntity for AreaRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for AreaRecord {
    fn display_label(&self) -> String {
        format!("{} ({} sqft)", self.name, self.size_value)
    }
}
