//! Configuration types for bounded-fetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fetch engine configuration
///
/// Every field has a default, so `Config::default()` works out of the box and a partial
/// JSON document only needs the settings it overrides.
///
/// # Example
///
/// ```
/// use bounded_fetch::Config;
///
/// let config: Config = serde_json::from_str(r#"{ "concurrency_limit": 5 }"#).unwrap();
/// assert_eq!(config.concurrency_limit, 5);
/// assert_eq!(config.request_timeout.as_secs(), 15);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of requests in flight at once (default: 10, must be at least 1)
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,

    /// Timeout applied to each request, connect through body (default: 15 seconds)
    ///
    /// Serialized as seconds; fractional values keep sub-second timeouts intact.
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Buffer size of the event broadcast channel (default: 1000)
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency_limit: default_concurrency_limit(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

impl Config {
    /// Create a configuration with the given concurrency limit and defaults elsewhere
    pub fn with_concurrency_limit(concurrency_limit: usize) -> Self {
        Self {
            concurrency_limit,
            ..Default::default()
        }
    }

    /// Check that every setting is usable
    ///
    /// A zero concurrency limit is rejected rather than clamped: a gate with no slots would
    /// never admit a task.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency_limit == 0 {
            return Err(Error::config(
                "concurrency_limit",
                "concurrency_limit must be at least 1",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::config(
                "request_timeout",
                "request_timeout must be greater than zero",
            ));
        }
        if self.event_channel_capacity == 0 {
            return Err(Error::config(
                "event_channel_capacity",
                "event_channel_capacity must be at least 1",
            ));
        }
        Ok(())
    }
}

fn default_concurrency_limit() -> usize {
    10
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_user_agent() -> String {
    concat!("bounded-fetch/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_event_channel_capacity() -> usize {
    1000
}

// Duration serialization helper: whole seconds as integers, anything finer as fractional seconds
mod duration_serde {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_nanos() == 0 {
            serializer.serialize_u64(duration.as_secs())
        } else {
            serializer.serialize_f64(duration.as_secs_f64())
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|e| D::Error::custom(format!("invalid duration {secs}: {e}")))
    }
}
