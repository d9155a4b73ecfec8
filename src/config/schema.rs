//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default base path of the routes endpoint.
pub const DEFAULT_ENDPOINT_PATH: &str = "/camel/routes";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Routes endpoint settings.
    pub endpoint: EndpointConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Routes known to the in-memory delegate.
    pub routes: Vec<RouteConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Routes endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Administrative switch; when false every operation answers with the
    /// disabled response.
    pub enabled: bool,

    /// Base path the operations are mounted under.
    pub path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_ENDPOINT_PATH.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level directive (trace, debug, info, warn, error or a full
    /// EnvFilter expression). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A route registered with the in-memory delegate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier.
    pub id: String,

    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Start the route when the catalog is built (default: true).
    #[serde(default = "default_auto_startup")]
    pub auto_startup: bool,
}

fn default_auto_startup() -> bool {
    true
}
