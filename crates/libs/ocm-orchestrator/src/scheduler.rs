//! Batch scheduler.
//!
//! Jobs are cut into consecutive batches of `batch_size`. All jobs of a batch
//! are triggered and tracked concurrently on the current task; the next batch
//! only starts once every job of the current one has a terminal result. A
//! failing job never stops its siblings or the following batches.

use futures::stream::{FuturesUnordered, StreamExt};
use ocm_config::OrchestratorSettings;
use tracing::{error, info};

use crate::{clock::Clock, job::JobResult, job_control::JobControl};

/// Triggers jobs through a [`JobControl`] service and collects their results.
pub struct Orchestrator<J, C> {
    pub(crate) control: J,
    pub(crate) clock: C,
    pub(crate) settings: OrchestratorSettings,
    pub(crate) git_ref: String,
}

impl<J: JobControl, C: Clock> Orchestrator<J, C> {
    /// Creates an orchestrator dispatching jobs on `git_ref`.
    pub fn new(
        control: J,
        clock: C,
        settings: OrchestratorSettings,
        git_ref: impl Into<String>,
    ) -> Self {
        Self {
            control,
            clock,
            settings,
            git_ref: git_ref.into(),
        }
    }

    pub fn control(&self) -> &J {
        &self.control
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run every job, batch after batch, and return one result per job in
    /// completion order.
    pub async fn run(&self, jobs: &[String]) -> Vec<JobResult> {
        self.run_with(jobs, |_| {}).await
    }

    /// Like [`run`](Self::run), handing each result to `on_result` as it is
    /// recorded.
    pub async fn run_with<F>(&self, jobs: &[String], mut on_result: F) -> Vec<JobResult>
    where
        F: FnMut(&JobResult),
    {
        let total = jobs.len();
        let batch_size = self.settings.batch_size.max(1);
        let total_batches = total.div_ceil(batch_size);
        let mut results = Vec::with_capacity(total);

        info!(
            "Orchestrating {total} jobs in batches of {batch_size}, {total_batches} batches to go"
        );

        for (index, batch) in jobs.chunks(batch_size).enumerate() {
            info!("Processing batch {} of {total_batches}", index + 1);
            let mut pending: FuturesUnordered<_> =
                batch.iter().map(|job| self.track(job)).collect();
            while let Some(result) = pending.next().await {
                info!("{}/{total} done - {result}", results.len() + 1);
                on_result(&result);
                results.push(result);
            }
        }
        results
    }

    /// Trigger one job and wait for its outcome. Errors become failure results.
    async fn track(&self, job: &str) -> JobResult {
        let run_id = match self.trigger(job).await {
            Ok(run_id) => run_id,
            Err(err) => {
                error!("{err}");
                return JobResult::failed(job);
            }
        };
        let conclusion = self.wait_for_completion(run_id).await;
        JobResult::new(job, run_id, conclusion)
    }
}
