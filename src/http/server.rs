//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the routes endpoint mounted at its base path
//! - Wire up middleware (request ID, tracing, metrics)
//! - Bind server to listener
//! - Stop on the shutdown broadcast
//!
//! # Design Decisions
//! - No request timeout layer: the stop/suspend timeout belongs to the
//!   delegate and the adapter does not cut calls short

use axum::{middleware, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::actuator::{setup_routes_router, RoutesState};
use crate::config::ServiceConfig;
use crate::delegate::RoutesDelegate;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::http::response;
use crate::observability::metrics;

/// HTTP server exposing the routes endpoint.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server forwarding every operation to `delegate`.
    pub fn new(config: ServiceConfig, delegate: Arc<dyn RoutesDelegate>) -> Self {
        let state = RoutesState::new(delegate);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: RoutesState) -> Router {
        setup_routes_router(state, &config.endpoint.path)
            .fallback(response::not_found)
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(propagate_request_id_layer()),
            )
    }

    /// Run the server until a value (or close) arrives on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.endpoint.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
