//! Shared HTTP client context for one pipeline run.

use crate::config::Config;
use crate::error::{Error, Result};
use std::time::Duration;

/// Shared connection context used by all tasks of a pipeline run
///
/// Wraps a pooled `reqwest::Client`. Tasks borrow the session to issue independent
/// requests; [`Session::close`] consumes it and releases every pooled connection, so a
/// closed session cannot be used by a task.
#[derive(Debug)]
pub struct Session {
    client: reqwest::Client,
    timeout: Duration,
}

impl Session {
    /// Build the HTTP client with the configured timeout and user agent
    ///
    /// # Errors
    /// Returns [`Error::Client`] if the TLS backend or resolver cannot be initialized
    pub fn open(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(Error::Client)?;

        tracing::debug!(timeout = ?config.request_timeout, "session opened");

        Ok(Self {
            client,
            timeout: config.request_timeout,
        })
    }

    /// Timeout applied to every request of this session
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Close the session, releasing all underlying connections
    pub fn close(self) {
        drop(self.client);
        tracing::debug!("session closed");
    }
}
