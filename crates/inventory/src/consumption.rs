use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockpilot_core::{ConsumptionEventId, DomainError, DomainResult, ItemId};

/// An immutable record of quantity used from an item on a given date.
///
/// Events are appended by the ledger and never edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionEvent {
    id: ConsumptionEventId,
    item_id: ItemId,
    date: NaiveDate,
    quantity: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ConsumptionEvent {
    /// Validate and build a new event.
    ///
    /// The date is caller-supplied (consumption may be logged after the fact)
    /// but must not be in the future relative to `today`.
    pub fn record(
        id: ConsumptionEventId,
        item_id: ItemId,
        date: NaiveDate,
        quantity: f64,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(DomainError::validation("quantity must be greater than 0"));
        }
        if date > today {
            return Err(DomainError::validation("date cannot be in the future"));
        }

        Ok(Self {
            id,
            item_id,
            date,
            quantity,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> ConsumptionEventId {
        self.id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
