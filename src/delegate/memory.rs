//! In-memory reference delegate.
//!
//! # Responsibilities
//! - Hold a catalog of route ids seeded from configuration
//! - Record the lifecycle status requested by the caller
//! - Report uptime since the last start
//! - Expose a switchable enabled flag (config reload flips it)
//!
//! # Design Decisions
//! - Nothing is executed; the status is bookkeeping only
//! - Suspend only from Started, resume only from Suspended; everything
//!   else is accepted so the catalog never wedges
//! - DashMap gives per-route locking without a global mutex

use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::{RouteConfig, ServiceConfig};
use crate::delegate::types::{format_uptime, RouteDetails, RouteDetailsInfo, RouteInfo, RouteStatus};
use crate::delegate::{DelegateError, RoutesDelegate};

/// Failure raised by the in-memory delegate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Route {0} not found")]
    UnknownRoute(String),

    #[error("Cannot {action} route {id} while it is {status}")]
    InvalidTransition {
        id: String,
        action: &'static str,
        status: RouteStatus,
    },
}

#[derive(Debug)]
struct RouteEntry {
    group: Option<String>,
    description: Option<String>,
    status: RouteStatus,
    started_at: Option<Instant>,
}

impl RouteEntry {
    fn uptime(&self) -> Duration {
        match (self.status, self.started_at) {
            (RouteStatus::Started | RouteStatus::Suspended, Some(at)) => at.elapsed(),
            _ => Duration::ZERO,
        }
    }

    fn to_info(&self, id: &str) -> RouteInfo {
        let uptime = self.uptime();
        let uptime_millis = uptime.as_millis() as u64;
        RouteInfo {
            id: id.to_string(),
            group: self.group.clone(),
            description: self.description.clone(),
            uptime: self.started_at.map(|_| format_uptime(uptime_millis)),
            uptime_millis,
            status: self.status,
        }
    }
}

/// Route catalog that only records lifecycle requests.
#[derive(Debug)]
pub struct InMemoryRoutes {
    routes: DashMap<String, RouteEntry>,
    enabled: AtomicBool,
}

impl InMemoryRoutes {
    /// Create an empty catalog.
    pub fn new(enabled: bool) -> Self {
        Self {
            routes: DashMap::new(),
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Build the catalog described by the `[endpoint]` and `[[routes]]` tables.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let registry = Self::new(config.endpoint.enabled);
        for route in &config.routes {
            registry.register(route);
        }
        registry
    }

    /// Add or replace a route.
    pub fn register(&self, route: &RouteConfig) {
        let (status, started_at) = if route.auto_startup {
            (RouteStatus::Started, Some(Instant::now()))
        } else {
            (RouteStatus::Stopped, None)
        };

        self.routes.insert(
            route.id.clone(),
            RouteEntry {
                group: route.group.clone(),
                description: route.description.clone(),
                status,
                started_at,
            },
        );
    }

    /// Toggle the administrative enabled flag.
    pub fn set_enabled(&self, enabled: bool) {
        let previous = self.enabled.swap(enabled, Ordering::SeqCst);
        if previous != enabled {
            tracing::info!(enabled, "Routes endpoint enabled flag changed");
        }
    }

    /// Current status of a route, if known.
    pub fn status(&self, id: &str) -> Option<RouteStatus> {
        self.routes.get(id).map(|entry| entry.status)
    }

    fn transition<F>(&self, id: &str, apply: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut RouteEntry) -> Result<(), RegistryError>,
    {
        let mut entry = self
            .routes
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownRoute(id.to_string()))?;
        apply(entry.value_mut())
    }
}

impl RoutesDelegate for InMemoryRoutes {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn list_routes(&self) -> Vec<RouteInfo> {
        let mut routes: Vec<RouteInfo> = self
            .routes
            .iter()
            .map(|entry| entry.value().to_info(entry.key()))
            .collect();
        routes.sort_by(|a, b| a.id.cmp(&b.id));
        routes
    }

    fn route_details(&self, id: &str) -> Option<RouteDetailsInfo> {
        self.routes.get(id).map(|entry| RouteDetailsInfo {
            info: entry.to_info(id),
            details: RouteDetails::default(),
        })
    }

    fn route_info(&self, id: &str) -> Option<RouteInfo> {
        self.routes.get(id).map(|entry| entry.to_info(id))
    }

    fn stop_route(
        &self,
        id: &str,
        timeout: Option<Duration>,
        abort_after_timeout: Option<bool>,
    ) -> Result<(), DelegateError> {
        tracing::debug!(route_id = %id, ?timeout, ?abort_after_timeout, "Stopping route");
        self.transition(id, |entry| {
            entry.status = RouteStatus::Stopped;
            entry.started_at = None;
            Ok(())
        })?;
        Ok(())
    }

    fn start_route(&self, id: &str) -> Result<(), DelegateError> {
        tracing::debug!(route_id = %id, "Starting route");
        self.transition(id, |entry| {
            if entry.status != RouteStatus::Started {
                entry.status = RouteStatus::Started;
                entry.started_at = Some(Instant::now());
            }
            Ok(())
        })?;
        Ok(())
    }

    fn suspend_route(&self, id: &str, timeout: Option<Duration>) -> Result<(), DelegateError> {
        tracing::debug!(route_id = %id, ?timeout, "Suspending route");
        self.transition(id, |entry| match entry.status {
            RouteStatus::Started => {
                entry.status = RouteStatus::Suspended;
                Ok(())
            }
            status => Err(RegistryError::InvalidTransition {
                id: id.to_string(),
                action: "suspend",
                status,
            }),
        })?;
        Ok(())
    }

    fn resume_route(&self, id: &str) -> Result<(), DelegateError> {
        tracing::debug!(route_id = %id, "Resuming route");
        self.transition(id, |entry| match entry.status {
            RouteStatus::Suspended => {
                entry.status = RouteStatus::Started;
                Ok(())
            }
            status => Err(RegistryError::InvalidTransition {
                id: id.to_string(),
                action: "resume",
                status,
            }),
        })?;
        Ok(())
    }
}
