//! API route definitions.

use axum::Json;
use axum::Router;
use serde_json::{Value, json};

use crate::AppState;

pub mod accounts;
pub mod health;
pub mod journal_entries;
pub mod periods;
pub mod reports;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(journal_entries::routes())
        .merge(periods::routes())
        .merge(reports::routes())
}

/// Builds the standard error body: `{"error": code, "message": ...}`.
#[must_use]
pub fn error_body(code: &str, message: &str) -> Json<Value> {
    Json(json!({
        "error": code,
        "message": message,
    }))
}
