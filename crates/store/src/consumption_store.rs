//! Consumption event storage.

use std::sync::{Arc, RwLock};

use stockpilot_core::ItemId;
use stockpilot_inventory::ConsumptionEvent;

use crate::item_store::StoreError;

/// Append-only consumption event storage.
///
/// Appends across different items need no coordination; the history is never
/// edited or compacted.
pub trait ConsumptionStore: Send + Sync {
    fn append(&self, event: ConsumptionEvent) -> Result<(), StoreError>;

    /// Events for one item, newest date first (ties: newest record first).
    fn list_by_item(&self, item_id: ItemId) -> Result<Vec<ConsumptionEvent>, StoreError>;

    /// All events across items, newest date first.
    fn list_all(&self) -> Result<Vec<ConsumptionEvent>, StoreError>;
}

impl<S> ConsumptionStore for Arc<S>
where
    S: ConsumptionStore + ?Sized,
{
    fn append(&self, event: ConsumptionEvent) -> Result<(), StoreError> {
        (**self).append(event)
    }

    fn list_by_item(&self, item_id: ItemId) -> Result<Vec<ConsumptionEvent>, StoreError> {
        (**self).list_by_item(item_id)
    }

    fn list_all(&self) -> Result<Vec<ConsumptionEvent>, StoreError> {
        (**self).list_all()
    }
}

/// In-memory append-only event store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryConsumptionStore {
    events: RwLock<Vec<ConsumptionEvent>>,
}

impl InMemoryConsumptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut events: Vec<ConsumptionEvent>) -> Vec<ConsumptionEvent> {
        events.sort_by(|a, b| {
            b.date()
                .cmp(&a.date())
                .then_with(|| b.created_at().cmp(&a.created_at()))
                .then_with(|| b.id().cmp(&a.id()))
        });
        events
    }
}

impl ConsumptionStore for InMemoryConsumptionStore {
    fn append(&self, event: ConsumptionEvent) -> Result<(), StoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        events.push(event);
        Ok(())
    }

    fn list_by_item(&self, item_id: ItemId) -> Result<Vec<ConsumptionEvent>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(Self::sorted(
            events
                .iter()
                .filter(|e| e.item_id() == item_id)
                .cloned()
                .collect(),
        ))
    }

    fn list_all(&self) -> Result<Vec<ConsumptionEvent>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(Self::sorted(events.clone()))
    }
}
