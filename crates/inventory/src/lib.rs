//! Inventory domain module.
//!
//! This crate contains business rules for stock tracking, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod consumption;
pub mod forecast;
pub mod item;
pub mod status;

pub use consumption::ConsumptionEvent;
pub use forecast::{ALERT_HORIZON_DAYS, RestockAlert, TRAILING_WINDOW_DAYS, forecast_item, rank_alerts, window_start};
pub use item::{InventoryItem, NewItem};
pub use status::{StockStatus, derive_status};
