//! Optional request parameters of the stop and suspend operations.
//!
//! Read from the query string. Absent values stay `None` all the way to the
//! delegate so it can apply its own defaults.

use serde::Deserialize;
use std::time::Duration;

/// `POST /{id}/stop?timeout=30&abortAfterTimeout=true`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopParams {
    /// Seconds to wait for in-flight work before stopping.
    pub timeout: Option<u64>,

    #[serde(alias = "abort_after_timeout")]
    pub abort_after_timeout: Option<bool>,
}

impl StopParams {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// `POST /{id}/suspend?timeout=30`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct SuspendParams {
    /// Seconds to wait for in-flight work before suspending.
    pub timeout: Option<u64>,
}

impl SuspendParams {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
