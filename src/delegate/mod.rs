//! Routing engine delegate.
//!
//! # Data Flow
//! ```text
//! actuator handler
//!     → RoutesDelegate (trait object, shared via Arc)
//!     → routing engine management object
//!     → Option<payload> / Result<(), DelegateError>
//! ```
//!
//! # Design Decisions
//! - The adapter owns no route state; everything is asked of the delegate
//! - Lookups return `Option` so "absent" stays distinct from failure
//! - Mutating calls return a boxed error so any engine fault can be wrapped

pub mod memory;
pub mod types;

use std::time::Duration;

pub use memory::{InMemoryRoutes, RegistryError};
pub use types::{RouteDetails, RouteDetailsInfo, RouteInfo, RouteStatus};

/// Failure raised by the routing engine during a lifecycle call.
pub type DelegateError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Management interface of the routing engine.
///
/// Implementations may block; mutating calls are driven from the blocking
/// pool by the actuator handlers.
pub trait RoutesDelegate: Send + Sync {
    /// Whether the management endpoint is administratively enabled.
    fn is_enabled(&self) -> bool;

    /// Summary of every route known to the engine.
    fn list_routes(&self) -> Vec<RouteInfo>;

    /// Route summary plus runtime statistics, `None` if the id is unknown.
    fn route_details(&self, id: &str) -> Option<RouteDetailsInfo>;

    /// Route summary, `None` if the id is unknown.
    fn route_info(&self, id: &str) -> Option<RouteInfo>;

    /// Stop a route. `None` arguments mean "use the engine default".
    fn stop_route(
        &self,
        id: &str,
        timeout: Option<Duration>,
        abort_after_timeout: Option<bool>,
    ) -> Result<(), DelegateError>;

    fn start_route(&self, id: &str) -> Result<(), DelegateError>;

    /// Suspend a route. `None` timeout means "use the engine default".
    fn suspend_route(&self, id: &str, timeout: Option<Duration>) -> Result<(), DelegateError>;

    fn resume_route(&self, id: &str) -> Result<(), DelegateError>;
}
