use std::sync::Arc;

use axum::{Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get};
use chrono::Utc;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/restock", get(restock_alerts))
}

pub async fn restock_alerts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.predictor.compute_alerts(Utc::now().date_naive()) {
        Ok(alerts) => {
            let alerts: Vec<_> = alerts.iter().map(dto::alert_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "alerts": alerts }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
