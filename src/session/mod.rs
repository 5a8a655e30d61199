//! Session orchestrator: cursors, lazy ledgers, and read models.
//!
//! All mutable session state lives in [`SessionState`]; callers pass it
//! explicitly, so the core stays testable without any UI attached.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::Catalog,
    domain::LedgerEntry,
    errors::{EstimatorError, Result},
    estimate::{self, density_policy, quantity_default},
    ledger::AreaLedger,
};

/// Prospective cost for the current selection, shown before committing.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub category: String,
    pub item: String,
    pub quantity: f64,
    pub density: f64,
    pub cost_per_unit: f64,
    pub cost_unit: String,
    pub units_needed: f64,
    pub total_cost: f64,
}

/// Outcome of a successful commit.
#[derive(Debug, Clone)]
pub struct CommitReceipt {
    pub entry: LedgerEntry,
    pub grand_total: f64,
    pub next_item: Option<String>,
}

/// Read model of one area's committed state, for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaSummary {
    pub area: String,
    pub size_value: f64,
    pub grand_total: f64,
    pub entries: Vec<LedgerEntry>,
}

/// All mutable state of one estimation session.
pub struct SessionState {
    catalog: Catalog,
    ledgers: Vec<AreaLedger>,
    current_area: Option<String>,
    current_category: Option<String>,
    current_item: Option<String>,
    add_enabled: bool,
}

impl SessionState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ledgers: Vec::new(),
            current_area: None,
            current_category: None,
            current_item: None,
            add_enabled: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_area(&self) -> Option<&str> {
        self.current_area.as_deref()
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    pub fn current_item(&self) -> Option<&str> {
        self.current_item.as_deref()
    }

    pub fn add_enabled(&self) -> bool {
        self.add_enabled
    }

    /// The ledger for an area, if that area has been visited.
    pub fn ledger(&self, area: &str) -> Option<&AreaLedger> {
        self.ledgers.iter().find(|ledger| ledger.area == area)
    }

    /// Selects the active area, materializing its ledger on first visit.
    ///
    /// Re-selecting the current area is a no-op; switching areas resets the
    /// transient cursors but never touches committed ledger state.
    pub fn select_area(&mut self, name: &str) -> Result<()> {
        self.catalog.area_info(name)?;
        if self.current_area.as_deref() == Some(name) {
            return Ok(());
        }
        if self.ledger(name).is_none() {
            tracing::debug!(area = name, "materializing area ledger");
            self.ledgers.push(AreaLedger::new(name));
        }
        self.current_area = Some(name.to_string());
        self.current_category = None;
        self.current_item = None;
        self.add_enabled = true;
        Ok(())
    }

    /// Selects the active category and re-pins the item cursor.
    pub fn select_category(&mut self, name: &str) -> Result<()> {
        self.require_area()?;
        if !self.catalog.has_category(name) {
            return Err(EstimatorError::CategoryNotFound(name.to_string()));
        }
        self.current_category = Some(name.to_string());
        self.repin_item()?;
        self.add_enabled = true;
        Ok(())
    }

    /// Items of the current category still selectable in the current area.
    ///
    /// Recomputed fresh on every call: catalog order minus the completed set.
    pub fn available_items(&self) -> Result<Vec<String>> {
        let area = self.require_area()?;
        let category = self.require_category()?;
        let ledger = self.ledger(area).expect("selected area has a ledger");
        Ok(self
            .catalog
            .items_in_category(category)
            .into_iter()
            .filter(|item| !ledger.contains(item))
            .map(str::to_string)
            .collect())
    }

    /// Selects an item from the current category's available list.
    pub fn select_item(&mut self, name: &str) -> Result<()> {
        let area = self.require_area()?.to_string();
        let category = self.require_category()?.to_string();
        self.catalog.item_info(&category, name)?;
        let ledger = self.ledger(&area).expect("selected area has a ledger");
        if ledger.contains(name) {
            return Err(EstimatorError::ItemCompleted {
                area,
                item: name.to_string(),
            });
        }
        self.current_item = Some(name.to_string());
        self.add_enabled = true;
        Ok(())
    }

    /// Computes a prospective cost for the current selection.
    ///
    /// `None` means the inputs are insufficient (quantity not positive) and
    /// the caller should prompt, not fail. Overrides are clamped to zero.
    pub fn quote(&self, quantity: Option<f64>, density: Option<f64>) -> Result<Option<Quote>> {
        let area = self.catalog.area_info(self.require_area()?)?;
        let category = self.require_category()?;
        let item_name = self.require_item()?;
        let item = self.catalog.item_info(category, item_name)?;

        let quantity = quantity
            .map(|value| value.max(0.0))
            .unwrap_or_else(|| quantity_default(item, area).initial_value());
        let density = density_policy(item).resolve(density.map(|value| value.max(0.0)));

        Ok(
            estimate::estimate(quantity, density, item.cost_per_unit).map(|result| Quote {
                category: item.category.clone(),
                item: item.item.clone(),
                quantity,
                density,
                cost_per_unit: item.cost_per_unit,
                cost_unit: item.cost_unit.clone(),
                units_needed: result.units_needed,
                total_cost: result.total_cost,
            }),
        )
    }

    /// Commits the current selection into the active area's ledger.
    ///
    /// Quote and ledger mutation happen in one step so the committed cost can
    /// never drift from the presented one. Afterwards the cursor advances to
    /// the first remaining item of the category, if any.
    pub fn commit(
        &mut self,
        assumption_text: &str,
        quantity: Option<f64>,
        density: Option<f64>,
    ) -> Result<CommitReceipt> {
        if !self.add_enabled {
            return Err(EstimatorError::InvalidInput(
                "add is unavailable until an item is selected".into(),
            ));
        }
        let quote = self.quote(quantity, density)?.ok_or_else(|| {
            EstimatorError::InvalidInput("enter a positive quantity before adding".into())
        })?;

        let area = self.require_area()?.to_string();
        let ledger = self
            .ledgers
            .iter_mut()
            .find(|ledger| ledger.area == area)
            .expect("selected area has a ledger");
        let entry = ledger.add(&quote.item, assumption_text, quote.total_cost)?.clone();
        let grand_total = ledger.grand_total();
        tracing::debug!(
            area = %area,
            item = %entry.item,
            total_cost = entry.total_cost,
            "committed item"
        );

        self.current_item = None;
        self.repin_item()?;
        self.add_enabled = self.current_item.is_some();

        Ok(CommitReceipt {
            entry,
            grand_total,
            next_item: self.current_item.clone(),
        })
    }

    /// Removes a committed item from the active area and re-selects it.
    pub fn undo(&mut self, item: &str) -> Result<LedgerEntry> {
        let area = self.require_area()?.to_string();
        let ledger = self
            .ledgers
            .iter_mut()
            .find(|ledger| ledger.area == area)
            .expect("selected area has a ledger");
        let removed = ledger.undo(item)?;
        tracing::debug!(area = %area, item = %removed.item, "undid item");

        self.current_item = Some(removed.item.clone());
        if self.current_category.is_some() {
            self.repin_item()?;
        }
        self.add_enabled = true;
        Ok(removed)
    }

    /// Read model for the active area.
    pub fn summary(&self) -> Result<AreaSummary> {
        let area = self.require_area()?.to_string();
        self.summary_for(&area)
    }

    /// Read model for any visited (or merely known) area.
    pub fn summary_for(&self, area: &str) -> Result<AreaSummary> {
        let record = self.catalog.area_info(area)?;
        let (grand_total, entries) = match self.ledger(area) {
            Some(ledger) => (ledger.display_total(), ledger.entries().to_vec()),
            None => (0.0, Vec::new()),
        };
        Ok(AreaSummary {
            area: record.name.clone(),
            size_value: record.size_value,
            grand_total,
            entries,
        })
    }

    fn repin_item(&mut self) -> Result<()> {
        let available = self.available_items()?;
        let keep = self
            .current_item
            .as_ref()
            .is_some_and(|item| available.iter().any(|candidate| candidate == item));
        if !keep {
            self.current_item = available.first().cloned();
        }
        Ok(())
    }

    fn require_area(&self) -> Result<&str> {
        self.current_area
            .as_deref()
            .ok_or_else(|| EstimatorError::InvalidInput("no area selected".into()))
    }

    fn require_category(&self) -> Result<&str> {
        self.current_category
            .as_deref()
            .ok_or_else(|| EstimatorError::InvalidInput("no category selected".into()))
    }

    fn require_item(&self) -> Result<&str> {
        self.current_item
            .as_deref()
            .ok_or_else(|| EstimatorError::InvalidInput("no item selected".into()))
    }
}
