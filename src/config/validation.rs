//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the endpoint base path
//! - Detect duplicate or unusable route ids
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("endpoint.path: {0}")]
    InvalidPath(String),

    #[error("observability.log_format: unsupported format '{0}' (expected pretty or json)")]
    InvalidLogFormat(String),

    #[error("routes: route id must not be empty")]
    EmptyRouteId,

    #[error("routes: route id '{0}' must not contain '/'")]
    InvalidRouteId(String),

    #[error("routes: duplicate route id '{0}'")]
    DuplicateRouteId(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let path = &config.endpoint.path;
    if !path.starts_with('/') {
        errors.push(ValidationError::InvalidPath(format!("'{}' must start with '/'", path)));
    } else if path == "/" {
        errors.push(ValidationError::InvalidPath("cannot be mounted at the root".into()));
    } else if path.ends_with('/') {
        errors.push(ValidationError::InvalidPath(format!("'{}' must not end with '/'", path)));
    }

    if !matches!(config.observability.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::InvalidLogFormat(
            config.observability.log_format.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        if route.id.is_empty() {
            errors.push(ValidationError::EmptyRouteId);
        } else if route.id.contains('/') {
            errors.push(ValidationError::InvalidRouteId(route.id.clone()));
        } else if !seen.insert(route.id.as_str()) {
            errors.push(ValidationError::DuplicateRouteId(route.id.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(id: &str) -> RouteConfig {
        RouteConfig {
            id: id.into(),
            group: None,
            description: None,
            auto_startup: true,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidAddress {
                field: "observability.metrics_address",
                value: "nowhere".into(),
            }]
        );
    }

    #[test]
    fn test_endpoint_path_shapes() {
        let mut config = ServiceConfig::default();

        for bad in ["camel/routes", "/", "/camel/routes/"] {
            config.endpoint.path = bad.into();
            let errors = validate_config(&config).unwrap_err();
            assert_eq!(errors.len(), 1, "path {bad:?}");
            assert!(matches!(errors[0], ValidationError::InvalidPath(_)));
        }

        config.endpoint.path = "/management/routes".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "localhost".into();
        config.observability.log_format = "xml".into();
        config.routes = vec![route("orders"), route(""), route("a/b"), route("orders")];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidAddress {
                    field: "listener.bind_address",
                    value: "localhost".into(),
                },
                ValidationError::InvalidLogFormat("xml".into()),
                ValidationError::EmptyRouteId,
                ValidationError::InvalidRouteId("a/b".into()),
                ValidationError::DuplicateRouteId("orders".into()),
            ]
        );
    }
}
