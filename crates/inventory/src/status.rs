//! Stock status derivation.

use serde::{Deserialize, Serialize};

/// Derived classification of an item's stock level.
///
/// Never stored independently: always recomputed from the current quantity
/// and the reorder threshold via [`derive_status`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StockStatus::InStock => f.write_str("IN_STOCK"),
            StockStatus::LowStock => f.write_str("LOW_STOCK"),
            StockStatus::OutOfStock => f.write_str("OUT_OF_STOCK"),
        }
    }
}

/// Single source of truth for stock status.
///
/// Pure and total: every quantity mutation must go through this function;
/// no code path may set status directly.
pub fn derive_status(quantity: f64, threshold: f64) -> StockStatus {
    if quantity == 0.0 {
        StockStatus::OutOfStock
    } else if quantity <= threshold {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}
