//! Custom test assertions for integration tests

use bounded_fetch::{Event, TaskResult, TaskStatus};
use std::time::Duration;
use tokio::sync::broadcast::Receiver;

/// Assert that a result failed and return its reason
pub fn assert_failed(result: &TaskResult) -> &str {
    match &result.status {
        TaskStatus::Failed(reason) => {
            assert!(!reason.is_empty(), "failure reason for {} is empty", result.target);
            assert!(result.payload.is_none(), "failed result carries a payload");
            reason
        }
        other => panic!("expected FAILED for {}, got {other}", result.target),
    }
}

/// Assert that results map one-to-one onto the targets, in order
pub fn assert_input_order(results: &[TaskResult], targets: &[String]) {
    assert_eq!(
        results.len(),
        targets.len(),
        "expected one result per target"
    );
    for (i, (result, target)) in results.iter().zip(targets).enumerate() {
        assert_eq!(
            result.target.as_str(),
            target,
            "result {i} belongs to the wrong target"
        );
    }
}

/// Collect events until `PipelineCompleted` arrives or `timeout` elapses
pub async fn collect_events_until_completed(
    events: &mut Receiver<Event>,
    timeout: Duration,
) -> Vec<Event> {
    let mut collected = vec![];

    let _ = tokio::time::timeout(timeout, async {
        while let Ok(event) = events.recv().await {
            let done = matches!(event, Event::PipelineCompleted { .. });
            collected.push(event);
            if done {
                break;
            }
        }
    })
    .await;

    collected
}
