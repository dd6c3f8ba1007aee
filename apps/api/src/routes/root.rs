use axum::Json;
use serde_json::{json, Value};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Job Search API. Use /docs to view the API documentation.";

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "job-search-api"
    }))
}
