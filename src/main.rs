//! Camel routes actuator.
//!
//! Serves the routes management endpoint backed by the in-memory route
//! catalog.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │               ROUTES ACTUATOR                    │
//!                        │                                                  │
//!   Client Request       │  ┌─────────┐   ┌──────────┐   ┌──────────────┐   │
//!   ─────────────────────┼─▶│  http   │──▶│ actuator │──▶│   delegate   │   │
//!                        │  │ server  │   │  guard + │   │ (routing     │   │
//!                        │  └─────────┘   │ handlers │   │   engine)    │   │
//!                        │                └────┬─────┘   └──────┬───────┘   │
//!   Client Response      │                     │  404/500       │           │
//!   ◀────────────────────┼─────────────────────┴────────────────┘           │
//!                        │                                                  │
//!                        │  config · observability · lifecycle              │
//!                        └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use camel_routes_actuator::config::{load_config, ServiceConfig};
use camel_routes_actuator::lifecycle;
use camel_routes_actuator::observability::init_logging;

#[derive(Parser)]
#[command(name = "camel-routes-actuator")]
#[command(about = "HTTP management endpoint for route lifecycle operations", long_about = None)]
struct Args {
    /// TOML configuration file; watched for changes to `endpoint.enabled`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);

    tracing::info!("camel-routes-actuator v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        path = %config.endpoint.path,
        enabled = config.endpoint.enabled,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    lifecycle::run(config, args.config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
