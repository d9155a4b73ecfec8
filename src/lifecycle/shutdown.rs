//! Shutdown coordination.

use tokio::sync::broadcast;

/// Fans one stop request out to the HTTP server and any other task that
/// subscribed before it fired.
///
/// Cloning shares the same channel, so the signal handler and the test
/// harness can each hold one.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver that resolves once [`Shutdown::trigger`] runs or every
    /// coordinator clone is dropped.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. Safe to call more than once.
    pub fn trigger(&self) {
        match self.tx.send(()) {
            Ok(listeners) => tracing::debug!(listeners, "Shutdown requested"),
            Err(_) => tracing::debug!("Shutdown requested with no listeners"),
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
