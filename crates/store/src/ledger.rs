//! Consumption ledger: the append-only history of consumption events.

use chrono::{NaiveDate, Utc};

use stockpilot_core::{ConsumptionEventId, DomainError, DomainResult, ItemId};
use stockpilot_inventory::{ConsumptionEvent, InventoryItem};

use crate::consumption_store::ConsumptionStore;
use crate::item_store::ItemStore;
use crate::registry::ItemRegistry;

/// A ledger entry joined with a snapshot of its item for display.
///
/// Items are never deleted by the core, so the snapshot is normally present;
/// it is optional to keep history listings robust against a store that was
/// populated out-of-band.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionRecord {
    pub event: ConsumptionEvent,
    pub item: Option<InventoryItem>,
}

/// Validates and records consumption events, decrementing the owning item
/// through the registry.
#[derive(Debug, Clone)]
pub struct ConsumptionLedger<IS, CS> {
    registry: ItemRegistry<IS>,
    events: CS,
}

impl<IS: ItemStore, CS: ConsumptionStore> ConsumptionLedger<IS, CS> {
    pub fn new(registry: ItemRegistry<IS>, events: CS) -> Self {
        Self { registry, events }
    }

    /// Record a consumption event.
    ///
    /// Validation happens before any mutation; the stock decrement and the
    /// event append then happen inside the item's critical section, so either
    /// exactly one event is appended and one item mutated, or neither.
    pub fn record(
        &self,
        item_id: ItemId,
        date: NaiveDate,
        quantity: f64,
    ) -> DomainResult<ConsumptionEvent> {
        let now = Utc::now();
        let event = ConsumptionEvent::record(
            ConsumptionEventId::new(),
            item_id,
            date,
            quantity,
            now.date_naive(),
            now,
        )?;

        let (item, ()) =
            self.registry
                .decrement_for_consumption_with(item_id, quantity, |_item| {
                    self.events
                        .append(event.clone())
                        .map_err(|e| DomainError::internal(e.to_string()))
                })?;

        tracing::info!(
            item_id = %item_id,
            event_id = %event.id(),
            quantity,
            remaining = item.current_quantity(),
            "consumption recorded"
        );
        Ok(event)
    }

    /// History for one item, newest date first, joined with the item snapshot.
    pub fn list_by_item(&self, item_id: ItemId) -> DomainResult<Vec<ConsumptionRecord>> {
        let events = self
            .events
            .list_by_item(item_id)
            .map_err(|e| DomainError::internal(e.to_string()))?;
        self.join_items(events)
    }

    /// Full history across items, newest date first.
    pub fn list_all(&self) -> DomainResult<Vec<ConsumptionRecord>> {
        let events = self
            .events
            .list_all()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        self.join_items(events)
    }

    fn join_items(&self, events: Vec<ConsumptionEvent>) -> DomainResult<Vec<ConsumptionRecord>> {
        events
            .into_iter()
            .map(|event| {
                let item = match self.registry.get(event.item_id()) {
                    Ok(item) => Some(item),
                    Err(DomainError::NotFound) => None,
                    Err(e) => return Err(e),
                };
                Ok(ConsumptionRecord { event, item })
            })
            .collect()
    }
}
