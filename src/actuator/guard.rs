use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::actuator::RoutesState;

/// Message returned by every operation while the endpoint is disabled.
pub const DISABLED_MESSAGE: &str = "This endpoint is disabled";

/// Fixed response for a disabled endpoint. Not an error.
pub fn disabled_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": DISABLED_MESSAGE })),
    )
        .into_response()
}

/// Short-circuits every routes operation while the delegate reports itself
/// disabled, so handlers never reach the delegate.
pub async fn require_enabled(
    State(state): State<RoutesState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.delegate.is_enabled() {
        tracing::debug!(path = %request.uri().path(), "Routes endpoint disabled");
        return disabled_response();
    }

    next.run(request).await
}
