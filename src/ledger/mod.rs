//! Per-area ledger of committed item costs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::LedgerEntry,
    errors::{EstimatorError, Result},
    format::round_display,
};

/// Running record of completed items for one area.
///
/// Entries keep insertion order, which is also display order, and item names
/// are unique within a ledger. The grand total is kept unrounded; rounding
/// happens only at display time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaLedger {
    pub area: String,
    entries: Vec<LedgerEntry>,
    grand_total: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AreaLedger {
    pub fn new(area: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            area: area.into(),
            entries: Vec::new(),
            grand_total: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Commits an item cost, minting a fresh entry.
    ///
    /// The entry list, membership, and grand total change together or not at
    /// all: the duplicate check happens before any mutation.
    pub fn add(
        &mut self,
        item: &str,
        assumption_text: impl Into<String>,
        total_cost: f64,
    ) -> Result<&LedgerEntry> {
        if self.contains(item) {
            return Err(EstimatorError::ItemCompleted {
                area: self.area.clone(),
                item: item.to_string(),
            });
        }
        self.entries
            .push(LedgerEntry::new(item, assumption_text, total_cost));
        self.recompute_total();
        self.touch();
        Ok(self.entries.last().expect("entry just pushed"))
    }

    /// Removes a committed item, returning its entry.
    ///
    /// Undo is an exact inverse of add: the remaining entries drive the grand
    /// total, so re-summing restores the pre-add value bit for bit.
    pub fn undo(&mut self, item: &str) -> Result<LedgerEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.item == item)
            .ok_or_else(|| EstimatorError::EntryNotFound {
                area: self.area.clone(),
                item: item.to_string(),
            })?;
        let removed = self.entries.remove(index);
        self.recompute_total();
        self.touch();
        Ok(removed)
    }

    /// Unrounded running total.
    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    /// Total rounded to two decimals with `-0.0` normalized away.
    pub fn display_total(&self) -> f64 {
        round_display(self.grand_total)
    }

    /// Committed entries in insertion order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn contains(&self, item: &str) -> bool {
        self.entries.iter().any(|entry| entry.item == item)
    }

    pub fn completed_items(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.item.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn recompute_total(&mut self) {
        self.grand_total = self.entries.iter().map(|entry| entry.total_cost).sum();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
