//! Routes management endpoint.
//!
//! # Data Flow
//! ```text
//! HTTP request under the base path (default /camel/routes)
//!     → guard.rs (enabled check, disabled response)
//!     → handlers.rs (extract id and parameters, call delegate)
//!     → error.rs (NoSuchRoute → 404, BadRequest → 400, Operation → 500)
//!     → JSON body or empty 200
//! ```
//!
//! # Design Decisions
//! - No route state is held here; the delegate owns the lifecycle
//! - The enabled gate is one route layer in front of every handler
//! - Mutating failures are a uniform 500 whatever the cause

pub mod error;
pub mod guard;
pub mod handlers;
pub mod params;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::delegate::RoutesDelegate;
use self::guard::require_enabled;
use self::handlers::*;

pub use error::{ApiError, RouteAction};
pub use guard::{disabled_response, DISABLED_MESSAGE};
pub use params::{StopParams, SuspendParams};

/// State injected into the routes handlers.
#[derive(Clone)]
pub struct RoutesState {
    pub delegate: Arc<dyn RoutesDelegate>,
}

impl RoutesState {
    pub fn new(delegate: Arc<dyn RoutesDelegate>) -> Self {
        Self { delegate }
    }
}

/// Mount the routes operations under `base_path`.
///
/// `base_path` must start with `/` and must not be `/` itself; config
/// validation guarantees both.
pub fn setup_routes_router(state: RoutesState, base_path: &str) -> Router {
    let operations = Router::new()
        .route("/", get(list_routes))
        .route("/{id}/detail", get(route_detail))
        .route("/{id}/info", get(route_info))
        .route("/{id}/stop", post(stop_route))
        .route("/{id}/start", post(start_route))
        .route("/{id}/suspend", post(suspend_route))
        .route("/{id}/resume", post(resume_route))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_enabled))
        .with_state(state);

    Router::new().nest(base_path, operations)
}
