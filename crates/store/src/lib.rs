//! Storage boundary and application services.
//!
//! The `ItemStore`/`ConsumptionStore` traits are the seam to the persistence
//! engine; the in-memory implementations back tests and the dev server. The
//! registry/ledger/predictor services implement the stock-ledger operations on
//! top of those traits.

pub mod consumption_store;
pub mod item_store;
pub mod ledger;
pub mod predictor;
pub mod registry;


pub use consumption_store::{ConsumptionStore, InMemoryConsumptionStore};
pub use item_store::{InMemoryItemStore, ItemStore, StoreError};
pub use ledger::{ConsumptionLedger, ConsumptionRecord};
pub use predictor::{ConsumptionSummaryRow, RestockPredictor};
pub use registry::ItemRegistry;
