//! Domain type for committed ledger entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// One committed item cost inside an area ledger.
///
/// Entries are immutable once created; undoing and re-adding an item mints a
/// fresh entry with a new id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub item: String,
    pub assumption_text: String,
    pub total_cost: f64,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(item: impl Into<String>, assumption_text: impl Into<String>, total_cost: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            item: item.into(),
            assumption_text: assumption_text.into(),
            total_cost,
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for LedgerEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for LedgerEntry {
    fn name(&self) -> &str {
        &self.item
    }
}

impl Displayable for LedgerEntry {
    fn display_label(&self) -> String {
        format!("{} ({:.2})", self.item, self.total_cost)
    }
}
