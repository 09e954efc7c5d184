//! Item storage boundary.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;

use stockpilot_core::{DomainError, ItemId};
use stockpilot_inventory::InventoryItem;

/// Storage-layer error.
///
/// `Rejected` carries a domain rejection raised inside an atomic update
/// closure; the services unwrap it back into a `DomainError`. `Backend` maps
/// to `DomainError::Internal` at the service boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("an item named '{0}' already exists")]
    DuplicateName(String),

    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Rejected(#[from] DomainError),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Item record storage.
///
/// `update` is the per-item atomic read-modify-write: implementations must
/// serialize concurrent updates of the same item and persist the mutated
/// record only when the closure succeeds (all-or-nothing).
pub trait ItemStore: Send + Sync {
    /// Insert a new item; fails if the name (case-insensitive) is taken.
    fn insert(&self, item: InventoryItem) -> Result<(), StoreError>;

    fn get(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError>;

    /// All items, newest-first by creation time (stable: id tiebreak).
    fn list(&self) -> Result<Vec<InventoryItem>, StoreError>;

    /// Apply `mutate` to the item under its exclusive lock.
    ///
    /// The closure sees a copy of the current record; the copy replaces the
    /// stored record only if the closure returns `Ok`, so a rejected or
    /// abandoned mutation leaves no partial state.
    fn update<T, F>(&self, id: ItemId, mutate: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut InventoryItem) -> Result<T, DomainError>;
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn insert(&self, item: InventoryItem) -> Result<(), StoreError> {
        (**self).insert(item)
    }

    fn get(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<InventoryItem>, StoreError> {
        (**self).list()
    }

    fn update<T, F>(&self, id: ItemId, mutate: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut InventoryItem) -> Result<T, DomainError>,
    {
        (**self).update(id, mutate)
    }
}

/// In-memory item store for tests/dev.
///
/// Each item lives behind its own `Mutex`; the outer `RwLock` only guards map
/// membership and the name index, so updates to different items do not
/// contend.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    inner: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    items: HashMap<ItemId, Arc<Mutex<InventoryItem>>>,
    by_name: HashMap<String, ItemId>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: ItemId) -> Result<Option<Arc<Mutex<InventoryItem>>>, StoreError> {
        let state = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(state.items.get(&id).cloned())
    }
}

impl ItemStore for InMemoryItemStore {
    fn insert(&self, item: InventoryItem) -> Result<(), StoreError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        // Name uniqueness is decided under the same write lock as the insert,
        // so two concurrent registrations cannot both pass the check.
        let key = item.name().to_lowercase();
        if state.by_name.contains_key(&key) {
            return Err(StoreError::DuplicateName(item.name().to_string()));
        }

        state.by_name.insert(key, item.id());
        state.items.insert(item.id(), Arc::new(Mutex::new(item)));
        Ok(())
    }

    fn get(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        match self.slot(id)? {
            Some(slot) => {
                let item = slot
                    .lock()
                    .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }

    fn list(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let slots: Vec<Arc<Mutex<InventoryItem>>> = {
            let state = self
                .inner
                .read()
                .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
            state.items.values().cloned().collect()
        };

        let mut items = Vec::with_capacity(slots.len());
        for slot in slots {
            let item = slot
                .lock()
                .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
            items.push(item.clone());
        }

        items.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(items)
    }

    fn update<T, F>(&self, id: ItemId, mutate: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut InventoryItem) -> Result<T, DomainError>,
    {
        let slot = self.slot(id)?.ok_or(StoreError::NotFound)?;

        let mut current = slot
            .lock()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        // Mutate a copy; commit only on success.
        let mut candidate = current.clone();
        let value = mutate(&mut candidate)?;
        *current = candidate;
        Ok(value)
    }
}
