//! Seam between the orchestrator and the service that runs the jobs.

use std::future::Future;

use crate::{
    job::{RunStatus, WorkflowRun},
    prelude::*,
};

/// Remote service able to start jobs and report on their runs.
///
/// Failures are reported as errors, which callers can tell apart from a
/// successful query that simply found nothing yet.
pub trait JobControl {
    /// Start `job` on `git_ref`. The service does not return the new run.
    fn dispatch(&self, job: &str, git_ref: &str) -> impl Future<Output = Result<()>> + Send;

    /// List at most `limit` runs of `job` on `branch` with the given status,
    /// newest first.
    fn list_runs(
        &self,
        job: &str,
        branch: &str,
        status: RunStatus,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<WorkflowRun>>> + Send;

    /// Fetch one run.
    fn get_run(&self, run_id: u64) -> impl Future<Output = Result<WorkflowRun>> + Send;
}
