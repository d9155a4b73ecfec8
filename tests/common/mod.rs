//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use camel_routes_actuator::config::ServiceConfig;
use camel_routes_actuator::delegate::{
    DelegateError, RouteDetails, RouteDetailsInfo, RouteInfo, RouteStatus, RoutesDelegate,
};
use camel_routes_actuator::{HttpServer, Shutdown};

/// A delegate operation as observed by [`RecordingDelegate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Details(String),
    Info(String),
    Stop {
        id: String,
        timeout: Option<Duration>,
        abort_after_timeout: Option<bool>,
    },
    Start(String),
    Suspend {
        id: String,
        timeout: Option<Duration>,
    },
    Resume(String),
}

/// How mutating calls behave.
#[derive(Debug, Clone)]
pub enum Behavior {
    Succeed,
    Fail(&'static str),
    Panic,
}

/// Delegate that records every operation call and answers from a fixed set
/// of known route ids.
pub struct RecordingDelegate {
    enabled: AtomicBool,
    known: HashSet<String>,
    behavior: Mutex<Behavior>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingDelegate {
    pub fn new(known: &[&str]) -> Self {
        Self {
            enabled: AtomicBool::new(true),
            known: known.iter().map(|id| id.to_string()).collect(),
            behavior: Mutex::new(Behavior::Succeed),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn set_behavior(&self, behavior: Behavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn info(id: &str) -> RouteInfo {
        RouteInfo {
            id: id.to_string(),
            group: Some("test".into()),
            description: None,
            uptime: Some("1s".into()),
            uptime_millis: 1_000,
            status: RouteStatus::Started,
        }
    }

    fn mutate(&self, call: Call) -> Result<(), DelegateError> {
        self.record(call);
        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail(message) => Err(message.into()),
            Behavior::Panic => panic!("delegate exploded"),
        }
    }
}

impl RoutesDelegate for RecordingDelegate {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn list_routes(&self) -> Vec<RouteInfo> {
        self.record(Call::List);
        let mut ids: Vec<&String> = self.known.iter().collect();
        ids.sort();
        ids.into_iter().map(|id| Self::info(id)).collect()
    }

    fn route_details(&self, id: &str) -> Option<RouteDetailsInfo> {
        self.record(Call::Details(id.to_string()));
        self.known.contains(id).then(|| RouteDetailsInfo {
            info: Self::info(id),
            details: RouteDetails {
                exchanges_total: 42,
                ..RouteDetails::default()
            },
        })
    }

    fn route_info(&self, id: &str) -> Option<RouteInfo> {
        self.record(Call::Info(id.to_string()));
        self.known.contains(id).then(|| Self::info(id))
    }

    fn stop_route(
        &self,
        id: &str,
        timeout: Option<Duration>,
        abort_after_timeout: Option<bool>,
    ) -> Result<(), DelegateError> {
        self.mutate(Call::Stop {
            id: id.to_string(),
            timeout,
            abort_after_timeout,
        })
    }

    fn start_route(&self, id: &str) -> Result<(), DelegateError> {
        self.mutate(Call::Start(id.to_string()))
    }

    fn suspend_route(&self, id: &str, timeout: Option<Duration>) -> Result<(), DelegateError> {
        self.mutate(Call::Suspend {
            id: id.to_string(),
            timeout,
        })
    }

    fn resume_route(&self, id: &str) -> Result<(), DelegateError> {
        self.mutate(Call::Resume(id.to_string()))
    }
}

/// A server running on an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    shutdown: Shutdown,
}

impl TestServer {
    /// URL of the routes endpoint at the default base path.
    pub fn routes_url(&self, suffix: &str) -> String {
        format!("{}/camel/routes{}", self.base_url, suffix)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the server with `config` in front of `delegate`.
pub async fn start_server(config: ServiceConfig, delegate: Arc<dyn RoutesDelegate>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, delegate);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        base_url: format!("http://{}", addr),
        shutdown,
    }
}

/// HTTP client that bypasses any proxy settings in the environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
