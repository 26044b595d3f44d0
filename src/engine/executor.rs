//! Single-task execution: admission, request, classification and transform.

use reqwest::StatusCode;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::{FetchEngine, Session};
use crate::error::FetchError;
use crate::transform::PayloadTransform;
use crate::types::{Payload, Target, TaskResult};

/// Classified response of a completed request
enum Fetched {
    /// 200 with a transformed body
    Payload(Payload),
    /// Any other status code
    Status(u16),
}

impl FetchEngine {
    /// Execute one fetch task
    ///
    /// Waits for a gate slot, issues a GET against `target` and classifies the outcome:
    /// - 200 with a JSON body: `SUCCESS` with the transformed payload and a completion timestamp
    /// - any other status: `HTTP_<code>` without payload
    /// - transport error, timeout, malformed body, invalid URL, closed gate: `FAILED` with
    ///   the reason, plus one error-level log line
    ///
    /// This never returns an error; every failure is captured in the returned result. The
    /// gate slot is released before returning on every path.
    pub async fn execute_task(&self, session: &Session, target: &Target) -> TaskResult {
        self.execute_task_with_cancel(session, target, &CancellationToken::new())
            .await
    }

    /// Execute one fetch task, resolving as `FAILED("cancelled")` if `cancel` fires first
    ///
    /// Cancellation drops the in-progress request (and with it the gate slot) immediately.
    pub async fn execute_task_with_cancel(
        &self,
        session: &Session,
        target: &Target,
        cancel: &CancellationToken,
    ) -> TaskResult {
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            outcome = self.admit_and_fetch(session, target) => outcome,
        };

        match outcome {
            Ok(Fetched::Payload(payload)) => {
                tracing::debug!(
                    url = %target,
                    transform = self.transform.name(),
                    origin_count = payload.origin_count,
                    "task succeeded"
                );
                TaskResult::success(target.clone(), payload)
            }
            Ok(Fetched::Status(code)) => {
                tracing::debug!(url = %target, status = code, "task got non-200 response");
                TaskResult::http_error(target.clone(), code)
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::error!(url = %target, error = %reason, "task execution failed");
                TaskResult::failed(target.clone(), reason)
            }
        }
    }

    async fn admit_and_fetch(
        &self,
        session: &Session,
        target: &Target,
    ) -> Result<Fetched, FetchError> {
        let url = Url::parse(target.as_str()).map_err(|source| FetchError::InvalidTarget {
            target: target.to_string(),
            source,
        })?;

        // Held until this function returns, on every path
        let _permit = self.gate.acquire().await?;

        fetch(session, url, self.transform.as_ref()).await
    }
}

async fn fetch(
    session: &Session,
    url: Url,
    transform: &dyn PayloadTransform,
) -> Result<Fetched, FetchError> {
    let timeout = session.timeout();

    let response = session
        .client()
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::from_transport(e, timeout))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Ok(Fetched::Status(status.as_u16()));
    }

    // Content-Type is ignored; a 200 body is always decoded as JSON
    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::from_transport(e, timeout))?;
    let data: Value = serde_json::from_slice(&body)?;

    Ok(Fetched::Payload(transform.transform(&data)?))
}
