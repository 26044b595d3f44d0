//! Pipeline driver: fan out one task per target, join them in input order.

use std::time::Instant;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::FetchEngine;
use crate::error::Result;
use crate::types::{Event, PipelineStats, Target, TaskResult};

impl FetchEngine {
    /// Fetch every target and return one result per target, in input order
    ///
    /// Opens one shared [`Session`](super::Session), dispatches all tasks at once (the gate
    /// bounds how many are in flight), waits for the last one to resolve and closes the
    /// session. Individual task failures never abort the run.
    ///
    /// # Errors
    /// Fails only if the session cannot be created, before any task starts.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bounded_fetch::{Config, FetchEngine};
    ///
    /// # async fn example() -> bounded_fetch::Result<()> {
    /// let engine = FetchEngine::new(Config::with_concurrency_limit(5))?;
    /// let results = engine
    ///     .run_pipeline(["https://httpbin.org/get", "https://api.github.com"])
    ///     .await?;
    ///
    /// for result in &results {
    ///     println!("[{}] -> {}", result.status, result.target);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_pipeline<I>(&self, targets: I) -> Result<Vec<TaskResult>>
    where
        I: IntoIterator,
        I::Item: Into<Target>,
    {
        self.run_pipeline_with_cancel(targets, CancellationToken::new())
            .await
    }

    /// Like [`run_pipeline`](Self::run_pipeline), but tasks not finished when `cancel` fires
    /// resolve as `FAILED("cancelled")`
    ///
    /// The returned sequence still holds one result per target.
    pub async fn run_pipeline_with_cancel<I>(
        &self,
        targets: I,
        cancel: CancellationToken,
    ) -> Result<Vec<TaskResult>>
    where
        I: IntoIterator,
        I::Item: Into<Target>,
    {
        let targets: Vec<Target> = targets.into_iter().map(Into::into).collect();
        let span = tracing::info_span!("pipeline", targets = targets.len());

        self.drive(targets, cancel).instrument(span).await
    }

    async fn drive(
        &self,
        targets: Vec<Target>,
        cancel: CancellationToken,
    ) -> Result<Vec<TaskResult>> {
        let started = Instant::now();
        tracing::info!(targets = targets.len(), "initializing pipeline");

        let session = self.open_session()?;
        self.emit(Event::PipelineStarted {
            targets: targets.len(),
        });

        let tasks = targets.iter().enumerate().map(|(index, target)| {
            let session = &session;
            let cancel = &cancel;
            async move {
                let result = self
                    .execute_task_with_cancel(session, target, cancel)
                    .await;
                self.emit(Event::TaskCompleted {
                    index,
                    url: target.clone(),
                    status: result.status.clone(),
                });
                result
            }
        });

        // join_all yields outputs in the order the futures were supplied
        let results = join_all(tasks).await;
        session.close();

        let elapsed = started.elapsed();
        let stats = PipelineStats::from_results(&results);
        tracing::info!(
            elapsed_secs = %format!("{:.2}", elapsed.as_secs_f64()),
            succeeded = stats.succeeded,
            http_errors = stats.http_errors,
            failed = stats.failed,
            "pipeline completed"
        );
        self.emit(Event::PipelineCompleted { elapsed, stats });

        Ok(results)
    }
}
