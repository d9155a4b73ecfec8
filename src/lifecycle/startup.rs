//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Build the in-memory delegate from configuration
//! - Watch the config file and apply `endpoint.enabled` on change
//! - Bind the listener and serve until a termination signal
//!
//! # Design Decisions
//! - Fail fast: exporter, watcher and bind errors abort startup
//! - Logging is installed by the caller before this runs

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::{ConfigWatcher, ServiceConfig};
use crate::delegate::InMemoryRoutes;
use crate::http::HttpServer;
use crate::lifecycle::signals::spawn_signal_handler;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("Metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("Config watcher error: {0}")]
    Watch(#[from] notify::Error),
}

/// Run the service until SIGINT/SIGTERM.
///
/// `config_path` enables hot reload of the enabled flag.
pub async fn run(config: ServiceConfig, config_path: Option<PathBuf>) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let raw = &config.observability.metrics_address;
        let addr: SocketAddr = raw
            .parse()
            .map_err(|_| StartupError::MetricsAddress(raw.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let registry = Arc::new(InMemoryRoutes::from_config(&config));
    tracing::info!(
        routes = config.routes.len(),
        enabled = config.endpoint.enabled,
        "Route catalog loaded"
    );

    // Dropping the watcher handle stops the watch, so keep it until return.
    let _watcher = match config_path {
        Some(path) => {
            let (watcher, mut updates) = ConfigWatcher::new(&path);
            let handle = watcher.run()?;
            tokio::spawn(apply_reloads(registry.clone(), updates));
            Some(handle)
        }
        None => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let _signals = spawn_signal_handler(shutdown);

    HttpServer::new(config, registry).run(listener, server_shutdown).await?;
    Ok(())
}

/// Apply `endpoint.enabled` from each reloaded config until the watcher goes away.
async fn apply_reloads(
    registry: Arc<InMemoryRoutes>,
    mut updates: mpsc::UnboundedReceiver<ServiceConfig>,
) {
    while let Some(updated) = updates.recv().await {
        registry.set_enabled(updated.endpoint.enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::RoutesDelegate;

    fn with_enabled(enabled: bool) -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.endpoint.enabled = enabled;
        config
    }

    #[tokio::test]
    async fn test_reloads_apply_the_last_enabled_flag() {
        let registry = Arc::new(InMemoryRoutes::new(true));
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(apply_reloads(registry.clone(), rx));

        tx.send(with_enabled(false)).unwrap();
        tx.send(with_enabled(true)).unwrap();
        tx.send(with_enabled(false)).unwrap();
        drop(tx);

        task.await.unwrap();
        assert!(!registry.is_enabled());
    }

    #[tokio::test]
    async fn test_reload_can_enable_a_disabled_endpoint() {
        let registry = Arc::new(InMemoryRoutes::new(false));
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(apply_reloads(registry.clone(), rx));

        tx.send(with_enabled(true)).unwrap();
        drop(tx);

        task.await.unwrap();
        assert!(registry.is_enabled());
    }
}
