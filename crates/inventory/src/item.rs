use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpilot_core::{DomainError, DomainResult, ItemId};

use crate::status::{StockStatus, derive_status};

/// Validated registration input for a new item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub unit: String,
    pub initial_quantity: f64,
    pub reorder_threshold: f64,
}

/// A tracked inventory good.
///
/// Fields are private so the `current_quantity`/`status` pair can only change
/// through [`InventoryItem::restock`] and [`InventoryItem::consume`], both of
/// which re-derive status in the same step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    unit: String,
    current_quantity: f64,
    reorder_threshold: f64,
    status: StockStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Register a new item.
    ///
    /// Status is always derived from the initial quantities; the caller cannot
    /// pre-seed it.
    pub fn register(id: ItemId, new: NewItem, now: DateTime<Utc>) -> DomainResult<Self> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let unit = new.unit.trim();
        if unit.is_empty() {
            return Err(DomainError::validation("unit cannot be empty"));
        }
        if !new.initial_quantity.is_finite() || !new.reorder_threshold.is_finite() {
            return Err(DomainError::validation("quantities must be finite numbers"));
        }
        if new.initial_quantity < 0.0 || new.reorder_threshold < 0.0 {
            return Err(DomainError::validation("quantities cannot be negative"));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            unit: unit.to_string(),
            current_quantity: new.initial_quantity,
            reorder_threshold: new.reorder_threshold,
            status: derive_status(new.initial_quantity, new.reorder_threshold),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn current_quantity(&self) -> f64 {
        self.current_quantity
    }

    pub fn reorder_threshold(&self) -> f64 {
        self.reorder_threshold
    }

    pub fn status(&self) -> StockStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Add stock. Rejects non-positive amounts.
    pub fn restock(&mut self, added_quantity: f64, now: DateTime<Utc>) -> DomainResult<()> {
        if !added_quantity.is_finite() || added_quantity <= 0.0 {
            return Err(DomainError::validation("added quantity must be greater than 0"));
        }

        self.set_quantity(self.current_quantity + added_quantity, now);
        Ok(())
    }

    /// Remove stock for a consumption.
    ///
    /// Rejects amounts exceeding the current quantity; the error carries the
    /// available amount and unit for display.
    pub fn consume(&mut self, amount: f64, now: DateTime<Utc>) -> DomainResult<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::validation(
                "consumed amount must be a non-negative number",
            ));
        }
        if amount > self.current_quantity {
            return Err(DomainError::insufficient_stock(
                self.current_quantity,
                self.unit.clone(),
            ));
        }

        self.set_quantity(self.current_quantity - amount, now);
        Ok(())
    }

    /// The only quantity write path: quantity and derived status change as one.
    fn set_quantity(&mut self, new_quantity: f64, now: DateTime<Utc>) {
        self.current_quantity = new_quantity;
        self.status = derive_status(new_quantity, self.reorder_threshold);
        self.updated_at = now;
    }
}
