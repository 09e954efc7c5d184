//! `stockpilot-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod rounding;

pub use error::{DomainError, DomainResult};
pub use id::{ConsumptionEventId, ItemId};
pub use rounding::round2;
