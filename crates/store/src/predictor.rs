//! Restock predictor: read-only scan over items and their recent consumption.

use chrono::NaiveDate;
use serde::Serialize;

use stockpilot_core::{DomainError, DomainResult, ItemId};
use stockpilot_inventory::{RestockAlert, forecast_item, rank_alerts, window_start};

use crate::consumption_store::ConsumptionStore;
use crate::item_store::ItemStore;

/// Aggregate consumption per item joined with current quantity, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionSummaryRow {
    pub item_id: ItemId,
    pub item_name: String,
    pub current_quantity: f64,
    pub total_consumption: f64,
}

/// Computes imminent-stockout alerts from registry and ledger state.
///
/// Pure read side: takes no locks beyond the stores' own reads and tolerates
/// a slightly stale snapshot.
#[derive(Debug, Clone)]
pub struct RestockPredictor<IS, CS> {
    items: IS,
    events: CS,
}

impl<IS: ItemStore, CS: ConsumptionStore> RestockPredictor<IS, CS> {
    pub fn new(items: IS, events: CS) -> Self {
        Self { items, events }
    }

    /// Alerts for items forecast to empty within the horizon, most urgent
    /// first.
    ///
    /// The consumption window is the trailing 30 days up to `today`, applied
    /// uniformly to every item.
    pub fn compute_alerts(&self, today: NaiveDate) -> DomainResult<Vec<RestockAlert>> {
        let cutoff = window_start(today);
        let items = self.items.list().map_err(internal)?;

        let mut alerts = Vec::new();
        for item in items {
            let window: Vec<_> = self
                .events
                .list_by_item(item.id())
                .map_err(internal)?
                .into_iter()
                .filter(|e| e.date() >= cutoff)
                .collect();

            if let Some(alert) = forecast_item(&item, &window) {
                alerts.push(alert);
            }
        }

        Ok(rank_alerts(alerts))
    }

    /// Total consumption per item joined with the item's current state.
    ///
    /// Items with no recorded consumption are omitted, matching the history
    /// chart this feeds.
    pub fn consumption_summary(&self) -> DomainResult<Vec<ConsumptionSummaryRow>> {
        let items = self.items.list().map_err(internal)?;

        let mut rows = Vec::new();
        for item in items {
            let events = self.events.list_by_item(item.id()).map_err(internal)?;
            if events.is_empty() {
                continue;
            }

            rows.push(ConsumptionSummaryRow {
                item_id: item.id(),
                item_name: item.name().to_string(),
                current_quantity: item.current_quantity(),
                total_consumption: events.iter().map(|e| e.quantity()).sum(),
            });
        }

        Ok(rows)
    }
}

fn internal(err: crate::item_store::StoreError) -> DomainError {
    DomainError::internal(err.to_string())
}
