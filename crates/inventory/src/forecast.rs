//! Restock forecasting.
//!
//! Pure per-item computation: the predictor service selects the window of
//! events per item and this module turns it into an alert (or not).

use chrono::{Days, NaiveDate};
use serde::Serialize;

use stockpilot_core::round2;

use crate::consumption::ConsumptionEvent;
use crate::item::InventoryItem;

/// Items forecast to run out within this many days produce an alert.
pub const ALERT_HORIZON_DAYS: f64 = 3.0;

/// Consumption events within this many days of `today` are considered.
pub const TRAILING_WINDOW_DAYS: u64 = 30;

/// First date (inclusive) of the trailing consumption window.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today - Days::new(TRAILING_WINDOW_DAYS)
}

/// A forecast that an item will reach zero quantity soon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestockAlert {
    pub item: InventoryItem,
    pub total_consumption: f64,
    pub days_with_data: usize,
    /// Rounded to 2 decimals for display.
    pub average_daily_consumption: f64,
    /// Rounded to 2 decimals for display; the horizon comparison happens at
    /// full precision before rounding.
    pub days_until_empty: f64,
}

/// Compute the alert for one item given its events inside the window.
///
/// Returns `None` when there is no usable consumption data or the item is not
/// forecast to empty within [`ALERT_HORIZON_DAYS`].
pub fn forecast_item(item: &InventoryItem, window: &[ConsumptionEvent]) -> Option<RestockAlert> {
    if window.is_empty() {
        return None;
    }

    let total_consumption: f64 = window.iter().map(|e| e.quantity()).sum();
    if total_consumption <= 0.0 {
        // Guards the division below.
        return None;
    }

    let days_with_data = window.len();
    let average_daily_consumption = total_consumption / days_with_data as f64;
    let days_until_empty = item.current_quantity() / average_daily_consumption;

    if days_until_empty > ALERT_HORIZON_DAYS {
        return None;
    }

    Some(RestockAlert {
        item: item.clone(),
        total_consumption,
        days_with_data,
        average_daily_consumption: round2(average_daily_consumption),
        days_until_empty: round2(days_until_empty),
    })
}

/// Order alerts most urgent first: ascending days-until-empty, ties broken by
/// item name for determinism.
pub fn rank_alerts(mut alerts: Vec<RestockAlert>) -> Vec<RestockAlert> {
    alerts.sort_by(|a, b| {
        a.days_until_empty
            .partial_cmp(&b.days_until_empty)
            .unwrap_or(core::cmp::Ordering::Equal)
            .then_with(|| a.item.name().cmp(b.item.name()))
    });
    alerts
}
