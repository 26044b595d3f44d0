//! Core types for bounded-fetch

use chrono::{DateTime, Local};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

/// Format of the completion timestamp attached to successful results
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One URL to be fetched
///
/// Targets are opaque to the engine until the request is built; an unparseable target
/// produces a `FAILED` result rather than an error.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    /// Create a new Target
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Get the URL string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Target {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}

impl From<String> for Target {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome classification of a single task
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// 200 response with a decodable JSON body
    Success,
    /// Any non-200 response; carries the status code
    HttpError(u16),
    /// Transport, timeout, decode or scheduling failure; carries the reason
    Failed(String),
}

impl TaskStatus {
    /// Status label as reported to callers: `SUCCESS`, `HTTP_<code>` or `FAILED`
    pub fn label(&self) -> String {
        match self {
            TaskStatus::Success => "SUCCESS".to_string(),
            TaskStatus::HttpError(code) => format!("HTTP_{code}"),
            TaskStatus::Failed(_) => "FAILED".to_string(),
        }
    }

    /// Failure reason, if the task failed
    pub fn reason(&self) -> Option<&str> {
        match self {
            TaskStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// Transformed payload of a successful response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Number of top-level entries in the decoded body
    pub origin_count: usize,
    /// Fixed tag identifying the transform that produced this payload
    pub engine_tag: String,
    /// ISO-8601 local time at which the payload was produced
    pub processed_at: String,
    /// Whether the payload went through cleaning
    pub cleaned: bool,
}

/// Result of one task, created exactly once per target
///
/// Serializes to `{status, url, payload?, timestamp?, error?}`, with the status rendered
/// as its label and the timestamp formatted with [`TIMESTAMP_FORMAT`].
#[derive(Clone, Debug, PartialEq)]
pub struct TaskResult {
    /// Outcome classification
    pub status: TaskStatus,
    /// The target this result belongs to
    pub target: Target,
    /// Transformed payload (successful results only)
    pub payload: Option<Payload>,
    /// Completion time (successful results only)
    pub timestamp: Option<DateTime<Local>>,
}

impl TaskResult {
    /// Successful result with payload, stamped with the current local time
    pub fn success(target: Target, payload: Payload) -> Self {
        Self {
            status: TaskStatus::Success,
            target,
            payload: Some(payload),
            timestamp: Some(Local::now()),
        }
    }

    /// Non-200 response
    pub fn http_error(target: Target, code: u16) -> Self {
        Self {
            status: TaskStatus::HttpError(code),
            target,
            payload: None,
            timestamp: None,
        }
    }

    /// Failed task with a human-readable reason
    pub fn failed(target: Target, reason: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::Failed(reason.into()),
            target,
            payload: None,
            timestamp: None,
        }
    }

    /// Whether the task succeeded
    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Success
    }

    /// Completion timestamp formatted as `YYYY-MM-DD HH:MM:SS`
    pub fn formatted_timestamp(&self) -> Option<String> {
        self.timestamp.map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
    }
}

impl Serialize for TaskResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TaskResult", 5)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("url", &self.target)?;
        match &self.payload {
            Some(payload) => state.serialize_field("payload", payload)?,
            None => state.skip_field("payload")?,
        }
        match self.formatted_timestamp() {
            Some(ts) => state.serialize_field("timestamp", &ts)?,
            None => state.skip_field("timestamp")?,
        }
        match self.status.reason() {
            Some(reason) => state.serialize_field("error", reason)?,
            None => state.skip_field("error")?,
        }
        state.end()
    }
}

/// Aggregate counts over the results of one pipeline run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Number of results
    pub total: usize,
    /// Results with status SUCCESS
    pub succeeded: usize,
    /// Results with a non-200 status code
    pub http_errors: usize,
    /// Results with status FAILED
    pub failed: usize,
}

impl PipelineStats {
    /// Count results by status
    pub fn from_results(results: &[TaskResult]) -> Self {
        results.iter().fold(
            Self {
                total: results.len(),
                ..Default::default()
            },
            |mut stats, result| {
                match result.status {
                    TaskStatus::Success => stats.succeeded += 1,
                    TaskStatus::HttpError(_) => stats.http_errors += 1,
                    TaskStatus::Failed(_) => stats.failed += 1,
                }
                stats
            },
        )
    }
}

/// Events emitted by the fetch engine
///
/// Consumers subscribe via [`FetchEngine::subscribe`](crate::FetchEngine::subscribe).
/// Events are informational; the programmatic contract is the returned result list.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A pipeline run started
    PipelineStarted {
        /// Number of targets in the run
        targets: usize,
    },

    /// A task finished (in completion order, not input order)
    TaskCompleted {
        /// Position of the target in the input sequence
        index: usize,
        /// The fetched URL
        url: Target,
        /// Outcome classification
        status: TaskStatus,
    },

    /// All tasks of a run resolved and the session was closed
    PipelineCompleted {
        /// Wall-clock duration of the run
        #[serde(with = "duration_millis")]
        elapsed: Duration,
        /// Counts by status
        stats: PipelineStats,
    },
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}
