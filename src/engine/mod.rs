//! Fetch engine split into focused submodules.
//!
//! The `FetchEngine` struct and its methods are organized by concern:
//! - [`session`] - Shared HTTP client context for one pipeline run
//! - [`executor`] - Single-task execution and outcome classification
//! - [`pipeline`] - Fan-out/fan-in driver over a list of targets

mod executor;
mod pipeline;
mod session;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use session::Session;

use crate::config::Config;
use crate::error::Result;
use crate::gate::ConcurrencyGate;
use crate::transform::{CleaningTransform, PayloadTransform};
use crate::types::Event;
use std::sync::Arc;

/// Bounded fetch scheduler (cloneable - all fields are Arc-wrapped)
///
/// Owns the concurrency gate, the payload transform and the event channel. Clones share
/// the same gate, so a limit applies across every pipeline run started from any clone.
#[derive(Clone)]
pub struct FetchEngine {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Admission gate bounding in-flight requests
    pub(crate) gate: ConcurrencyGate,
    /// Transform applied to successful JSON bodies
    pub(crate) transform: Arc<dyn PayloadTransform>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl FetchEngine {
    /// Create a new engine
    ///
    /// Validates the configuration and builds the gate with `concurrency_limit` slots.
    /// The default [`CleaningTransform`] is installed; use [`FetchEngine::with_transform`]
    /// to replace it.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let gate = ConcurrencyGate::new(config.concurrency_limit);
        let (event_tx, _rx) = tokio::sync::broadcast::channel(config.event_channel_capacity);

        tracing::debug!(
            concurrency_limit = config.concurrency_limit,
            request_timeout = ?config.request_timeout,
            "fetch engine created"
        );

        Ok(Self {
            config: Arc::new(config),
            gate,
            transform: Arc::new(CleaningTransform),
            event_tx,
        })
    }

    /// Replace the payload transform
    #[must_use]
    pub fn with_transform(mut self, transform: impl PayloadTransform + 'static) -> Self {
        self.transform = Arc::new(transform);
        self
    }

    /// Subscribe to engine events
    ///
    /// Each subscriber receives every event emitted after it subscribed.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The engine's concurrency gate
    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    /// Stop admitting tasks
    ///
    /// Requests already in flight run to completion. Tasks waiting for a slot, and any task
    /// started afterwards, resolve as `FAILED`.
    pub fn shutdown(&self) {
        tracing::info!("fetch engine shutting down, closing concurrency gate");
        self.gate.close();
    }

    /// Open a session using this engine's configuration
    pub fn open_session(&self) -> Result<Session> {
        Session::open(&self.config)
    }

    pub(crate) fn emit(&self, event: Event) {
        // No subscribers is not an error
        self.event_tx.send(event).ok();
    }
}
