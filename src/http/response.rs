//! Responses produced outside the routes handlers.

use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde_json::json;

/// Fallback for paths outside the routes endpoint.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": 404,
            "error": "Not Found",
            "message": format!("No handler for {}", uri.path()),
        })),
    )
}
