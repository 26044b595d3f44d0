//! Payload transform applied to successful JSON responses
//!
//! The transform is a pluggable collaborator of the engine: it receives the decoded body of
//! a 200 response and produces the [`Payload`] stored in the task result. It has no side
//! effects and fails only when the body has a shape it cannot handle.

use crate::error::FetchError;
use crate::types::Payload;
use chrono::Local;
use serde_json::Value;

/// Tag stamped into payloads produced by [`CleaningTransform`]
pub const ENGINE_TAG: &str = "STF-V1-PRO";

/// Reshapes a decoded response body into a [`Payload`]
pub trait PayloadTransform: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    /// Transform a decoded JSON body
    fn transform(&self, body: &Value) -> Result<Payload, FetchError>;
}

/// Default transform: counts top-level entries and stamps the processing time
///
/// Objects count their keys, arrays their elements. Scalars and `null` have no top-level
/// entries to count and are rejected.
#[derive(Clone, Copy, Debug, Default)]
pub struct CleaningTransform;

impl PayloadTransform for CleaningTransform {
    fn name(&self) -> &'static str {
        "cleaning"
    }

    fn transform(&self, body: &Value) -> Result<Payload, FetchError> {
        let origin_count = top_level_len(body)?;

        Ok(Payload {
            origin_count,
            engine_tag: ENGINE_TAG.to_string(),
            processed_at: Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            cleaned: true,
        })
    }
}

fn top_level_len(body: &Value) -> Result<usize, FetchError> {
    match body {
        Value::Object(map) => Ok(map.len()),
        Value::Array(items) => Ok(items.len()),
        other => Err(FetchError::UnsupportedBody(format!(
            "expected a JSON object or array, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
