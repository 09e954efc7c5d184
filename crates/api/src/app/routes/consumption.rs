use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use stockpilot_auth::Permission;
use stockpilot_core::ItemId;

use crate::app::routes::common::CmdAuth;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_consumption).post(record_consumption))
        .route("/summary", get(consumption_summary))
}

pub async fn record_consumption(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<crate::context::PrincipalContext>,
    Json(body): Json<dto::RecordConsumptionRequest>,
) -> axum::response::Response {
    let cmd_auth = CmdAuth {
        inner: body,
        required: Permission::new("inventory.consumption.record"),
    };

    if let Err(e) = crate::authz::authorize_command(&principal, &cmd_auth) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let body = cmd_auth.inner;

    let item_id: ItemId = match body.item_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let date: NaiveDate = match body.date.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "date must be formatted YYYY-MM-DD",
            );
        }
    };

    match services.ledger.record(item_id, date, body.quantity) {
        Ok(event) => (StatusCode::CREATED, Json(dto::event_to_json(&event))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ListConsumptionQuery {
    pub item_id: Option<String>,
}

pub async fn list_consumption(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ListConsumptionQuery>,
) -> axum::response::Response {
    let records = match query.item_id {
        Some(raw) => {
            let item_id: ItemId = match raw.parse() {
                Ok(v) => v,
                Err(e) => return errors::domain_error_to_response(e),
            };
            services.ledger.list_by_item(item_id)
        }
        None => services.ledger.list_all(),
    };

    match records {
        Ok(records) => {
            let events: Vec<_> = records.iter().map(dto::record_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "events": events }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn consumption_summary(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.predictor.consumption_summary() {
        Ok(rows) => {
            let rows: Vec<_> = rows.iter().map(dto::summary_row_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "summary": rows }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
