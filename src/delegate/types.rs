//! Route payloads returned by the delegate and serialized as response bodies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status as reported by the routing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStatus {
    Initialized,
    Starting,
    Started,
    Stopping,
    Stopped,
    Suspending,
    Suspended,
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteStatus::Initialized => "Initialized",
            RouteStatus::Starting => "Starting",
            RouteStatus::Started => "Started",
            RouteStatus::Stopping => "Stopping",
            RouteStatus::Stopped => "Stopped",
            RouteStatus::Suspending => "Suspending",
            RouteStatus::Suspended => "Suspended",
        };
        f.write_str(name)
    }
}

/// Route summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Human readable uptime, absent when the route is not running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,

    pub uptime_millis: u64,

    pub status: RouteStatus,
}

/// Runtime statistics of a route.
///
/// Processing times are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDetails {
    pub exchanges_total: u64,
    pub exchanges_inflight: u64,
    pub failures_handled: u64,
    pub redeliveries: u64,
    pub external_redeliveries: u64,
    pub min_processing_time: u64,
    pub max_processing_time: u64,
    pub mean_processing_time: u64,
    pub last_processing_time: u64,
    pub total_processing_time: u64,
    pub delta_processing_time: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load01: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load05: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load15: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_inflight_exchange_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_inflight_duration: Option<u64>,

    pub has_route_controller: bool,
}

/// Route summary with its statistics under `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDetailsInfo {
    #[serde(flatten)]
    pub info: RouteInfo,

    pub details: RouteDetails,
}

/// Format an uptime the way operators read it, e.g. `1h 2m 3s`.
pub fn format_uptime(millis: u64) -> String {
    let secs = millis / 1000;
    let days = secs / 86_400;
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_info_serializes_camel_case_and_skips_absent_fields() {
        let info = RouteInfo {
            id: "orders".into(),
            group: None,
            description: Some("Order intake".into()),
            uptime: None,
            uptime_millis: 0,
            status: RouteStatus::Stopped,
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "orders",
                "description": "Order intake",
                "uptimeMillis": 0,
                "status": "Stopped",
            })
        );
    }

    #[test]
    fn test_details_flatten_info_fields() {
        let detail = RouteDetailsInfo {
            info: RouteInfo {
                id: "orders".into(),
                group: Some("billing".into()),
                description: None,
                uptime: Some("5s".into()),
                uptime_millis: 5_000,
                status: RouteStatus::Started,
            },
            details: RouteDetails {
                exchanges_total: 7,
                ..RouteDetails::default()
            },
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["id"], "orders");
        assert_eq!(value["group"], "billing");
        assert_eq!(value["status"], "Started");
        assert_eq!(value["details"]["exchangesTotal"], 7);
        assert_eq!(value["details"]["hasRouteController"], false);
        assert!(value["details"].get("load01").is_none());
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0s");
        assert_eq!(format_uptime(59_999), "59s");
        assert_eq!(format_uptime(3_723_000), "1h 2m 3s");
        assert_eq!(format_uptime(90_000_000), "1d 1h");
    }
}
