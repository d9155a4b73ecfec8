//! Translation of delegate outcomes into HTTP responses.
//!
//! Handlers return `Result<_, ApiError>`; the `IntoResponse` impl below is the
//! only place status codes for failures are chosen.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

use crate::delegate::DelegateError;

/// Mutating lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    Start,
    Stop,
    Suspend,
    Resume,
}

impl RouteAction {
    /// Operation name used in logs and metric labels.
    pub fn name(self) -> &'static str {
        match self {
            RouteAction::Start => "start",
            RouteAction::Stop => "stop",
            RouteAction::Suspend => "suspend",
            RouteAction::Resume => "resume",
        }
    }
}

/// Renders the progressive form used in error messages ("starting").
impl fmt::Display for RouteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            RouteAction::Start => "starting",
            RouteAction::Stop => "stopping",
            RouteAction::Suspend => "suspending",
            RouteAction::Resume => "resuming",
        };
        f.write_str(verb)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The delegate has no route with this id.
    #[error("No such route {0}")]
    NoSuchRoute(String),

    /// A stop or suspend parameter could not be parsed.
    #[error("{0}")]
    BadRequest(String),

    /// The delegate failed a lifecycle call. The cause stays on the error
    /// for logs and is not sent to the caller.
    #[error("Error {action} route {id}")]
    Operation {
        action: RouteAction,
        id: String,
        #[source]
        source: DelegateError,
    },
}

impl ApiError {
    pub fn operation(
        action: RouteAction,
        id: impl Into<String>,
        source: impl Into<DelegateError>,
    ) -> Self {
        ApiError::Operation {
            action,
            id: id.into(),
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoSuchRoute(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Render an error followed by each of its causes, `outer: inner: root`.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        match &self {
            ApiError::NoSuchRoute(id) => {
                tracing::debug!(route_id = %id, "No such route");
            }
            ApiError::BadRequest(reason) => {
                tracing::debug!(reason = %reason, "Rejected route operation parameters");
            }
            ApiError::Operation { action, id, .. } => {
                tracing::error!(
                    route_id = %id,
                    operation = action.name(),
                    error = %error_chain(&self),
                    "Route operation failed"
                );
            }
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Unknown"),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
