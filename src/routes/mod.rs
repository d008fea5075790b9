use axum::{Json, Router, http::StatusCode, http::Uri, routing::get};
use serde_json::json;

use crate::state::AppState;

pub mod cart;
pub mod doc;
pub mod health;
pub mod products;
pub mod transactions;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(products::router())
        .merge(cart::router())
        .merge(transactions::router())
}

/// Full application: `/api`, `/health`, `/docs` and the 404 fallback.
/// Transport layers (tracing, limits, CORS) are added by the binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not Found", "path": uri.path() })),
    )
}
