use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use stockpilot_auth::Permission;
use stockpilot_core::ItemId;
use stockpilot_inventory::NewItem;

use crate::app::routes::common::CmdAuth;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/items", post(register_item).get(list_items))
        .route("/items/:id", get(get_item))
        .route("/items/:id/restock", post(restock_item))
}

pub async fn register_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<crate::context::PrincipalContext>,
    Json(body): Json<dto::RegisterItemRequest>,
) -> axum::response::Response {
    let cmd_auth = CmdAuth {
        inner: body,
        required: Permission::new("inventory.items.create"),
    };

    if let Err(e) = crate::authz::authorize_command(&principal, &cmd_auth) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let body = cmd_auth.inner;
    let new = NewItem {
        name: body.name,
        unit: body.unit,
        initial_quantity: body.current_quantity,
        reorder_threshold: body.reorder_threshold,
    };

    match services.registry.register(new) {
        Ok(item) => (StatusCode::CREATED, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn restock_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<crate::context::PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::RestockRequest>,
) -> axum::response::Response {
    let cmd_auth = CmdAuth {
        inner: body,
        required: Permission::new("inventory.items.restock"),
    };

    if let Err(e) = crate::authz::authorize_command(&principal, &cmd_auth) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let item_id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.registry.restock(item_id, cmd_auth.inner.quantity) {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let item_id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.registry.get(item_id) {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.registry.list() {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::item_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
