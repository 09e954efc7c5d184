//! Item registry: creation, lookup, and quantity mutation.

use chrono::Utc;

use stockpilot_core::{DomainError, DomainResult, ItemId};
use stockpilot_inventory::{InventoryItem, NewItem};

use crate::item_store::{ItemStore, StoreError};

/// Owns item records. All quantity mutations go through the store's per-item
/// atomic update, so quantity and derived status always change together.
#[derive(Debug, Clone)]
pub struct ItemRegistry<S> {
    store: S,
}

impl<S: ItemStore> ItemRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new item. Rejects duplicate names (case-insensitive).
    pub fn register(&self, new: NewItem) -> DomainResult<InventoryItem> {
        let item = InventoryItem::register(ItemId::new(), new, Utc::now())?;

        self.store.insert(item.clone()).map_err(map_store_err)?;
        tracing::info!(item_id = %item.id(), name = item.name(), "item registered");
        Ok(item)
    }

    /// Add stock to an item. Atomic with respect to concurrent mutations of
    /// the same item.
    pub fn restock(&self, item_id: ItemId, added_quantity: f64) -> DomainResult<InventoryItem> {
        let item = self
            .store
            .update(item_id, |item| {
                item.restock(added_quantity, Utc::now())?;
                Ok(item.clone())
            })
            .map_err(map_store_err)?;

        tracing::info!(
            item_id = %item_id,
            added = added_quantity,
            quantity = item.current_quantity(),
            "item restocked"
        );
        Ok(item)
    }

    /// Validate-and-decrement for a consumption.
    ///
    /// This is the only mutation path the ledger may use: the decrement and
    /// the status recomputation happen in one atomic step.
    pub fn decrement_for_consumption(
        &self,
        item_id: ItemId,
        amount: f64,
    ) -> DomainResult<InventoryItem> {
        self.decrement_for_consumption_with(item_id, amount, |_| Ok(()))
            .map(|(item, ())| item)
    }

    /// Like [`Self::decrement_for_consumption`], but runs `on_commit` inside
    /// the same per-item critical section, after the decrement succeeds.
    ///
    /// If `on_commit` fails the decrement is discarded, so callers can append
    /// dependent records with both-or-neither semantics.
    pub fn decrement_for_consumption_with<T>(
        &self,
        item_id: ItemId,
        amount: f64,
        on_commit: impl FnOnce(&InventoryItem) -> DomainResult<T>,
    ) -> DomainResult<(InventoryItem, T)> {
        self.store
            .update(item_id, |item| {
                item.consume(amount, Utc::now())?;
                let value = on_commit(item)?;
                Ok((item.clone(), value))
            })
            .map_err(map_store_err)
    }

    pub fn get(&self, item_id: ItemId) -> DomainResult<InventoryItem> {
        self.store
            .get(item_id)
            .map_err(map_store_err)?
            .ok_or(DomainError::NotFound)
    }

    /// All items, newest-first by creation time (stable order).
    pub fn list(&self) -> DomainResult<Vec<InventoryItem>> {
        self.store.list().map_err(map_store_err)
    }
}

fn map_store_err(err: StoreError) -> DomainError {
    match err {
        StoreError::DuplicateName(name) => {
            DomainError::conflict(format!("an item named '{name}' already exists"))
        }
        StoreError::NotFound => DomainError::NotFound,
        StoreError::Rejected(domain) => domain,
        StoreError::Backend(msg) => DomainError::internal(msg),
    }
}
