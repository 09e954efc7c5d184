use serde::Deserialize;

use stockpilot_inventory::{ConsumptionEvent, InventoryItem, RestockAlert};
use stockpilot_store::{ConsumptionRecord, ConsumptionSummaryRow};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterItemRequest {
    pub name: String,
    pub unit: String,
    pub current_quantity: f64,
    pub reorder_threshold: f64,
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct RecordConsumptionRequest {
    pub item_id: String,
    pub date: String, // YYYY-MM-DD
    pub quantity: f64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn item_to_json(item: &InventoryItem) -> serde_json::Value {
    serde_json::json!({
        "id": item.id().to_string(),
        "name": item.name(),
        "unit": item.unit(),
        "current_quantity": item.current_quantity(),
        "reorder_threshold": item.reorder_threshold(),
        "status": item.status(),
        "created_at": item.created_at(),
        "updated_at": item.updated_at(),
    })
}

pub fn event_to_json(event: &ConsumptionEvent) -> serde_json::Value {
    serde_json::json!({
        "id": event.id().to_string(),
        "item_id": event.item_id().to_string(),
        "date": event.date(),
        "quantity": event.quantity(),
        "created_at": event.created_at(),
        "updated_at": event.updated_at(),
    })
}

pub fn record_to_json(record: &ConsumptionRecord) -> serde_json::Value {
    let mut json = event_to_json(&record.event);
    json["item"] = match &record.item {
        Some(item) => serde_json::json!({
            "id": item.id().to_string(),
            "name": item.name(),
            "unit": item.unit(),
            "current_quantity": item.current_quantity(),
            "status": item.status(),
        }),
        None => serde_json::Value::Null,
    };
    json
}

pub fn alert_to_json(alert: &RestockAlert) -> serde_json::Value {
    serde_json::json!({
        "item_id": alert.item.id().to_string(),
        "item_name": alert.item.name(),
        "unit": alert.item.unit(),
        "current_quantity": alert.item.current_quantity(),
        "status": alert.item.status(),
        "total_consumption": alert.total_consumption,
        "days_with_data": alert.days_with_data,
        "average_daily_consumption": alert.average_daily_consumption,
        "days_until_empty": alert.days_until_empty,
    })
}

pub fn summary_row_to_json(row: &ConsumptionSummaryRow) -> serde_json::Value {
    serde_json::json!({
        "item_id": row.item_id.to_string(),
        "item_name": row.item_name,
        "current_quantity": row.current_quantity,
        "total_consumption": row.total_consumption,
    })
}
