//! HTTP management endpoint for route lifecycle operations.
//!
//! Maps `GET`/`POST` requests under a base path (default `/camel/routes`) to
//! calls on a [`delegate::RoutesDelegate`] and translates the outcome into
//! HTTP status codes.

pub mod actuator;
pub mod config;
pub mod delegate;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use delegate::{InMemoryRoutes, RoutesDelegate};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
