use axum::{Router, routing::get};

pub mod alerts;
pub mod common;
pub mod consumption;
pub mod items;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/inventory", items::router())
        .nest("/consumption", consumption::router())
        .nest("/alerts", alerts::router())
}
