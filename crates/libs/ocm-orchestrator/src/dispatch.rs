//! Job dispatcher.
//!
//! Dispatching does not hand back a run identifier, so after the dispatch call
//! the newest in-progress run of the job on the branch is looked up until one
//! shows up or the lookup times out.
//!
//! Discovery assumes a single in-flight run per job: a run of the same job
//! started by someone else (a manual re-trigger) while the orchestrator is
//! looking can be picked up instead of ours.

use ocm_config::run_context::branch_from_ref;
use tracing::{info, warn};

use crate::{
    clock::Clock,
    job::RunStatus,
    job_control::JobControl,
    prelude::*,
    scheduler::Orchestrator,
};

impl<J: JobControl, C: Clock> Orchestrator<J, C> {
    /// Dispatch `job` and return the identifier of the run it started.
    pub async fn trigger(&self, job: &str) -> Result<u64> {
        info!("Triggering job {job}");
        self.control
            .dispatch(job, &self.git_ref)
            .await
            .map_err(|source| Error::Dispatch {
                job: job.to_string(),
                source: Box::new(source),
            })?;

        let run_id = self
            .find_new_run_id(job, branch_from_ref(&self.git_ref))
            .await?;
        info!("Job {job} is running as run {run_id}");
        Ok(run_id)
    }

    async fn find_new_run_id(&self, job: &str, branch: &str) -> Result<u64> {
        self.clock.sleep(self.settings.initial_run_id_delay()).await;
        let timeout = self.settings.run_id_timeout();
        let start = self.clock.now();

        while self.clock.now().duration_since(start) < timeout {
            match self
                .control
                .list_runs(job, branch, RunStatus::InProgress, 1)
                .await
            {
                Ok(runs) => {
                    if let Some(run) = runs.first() {
                        return Ok(run.id);
                    }
                }
                Err(err) => warn!("Error listing runs for job {job}: {err}"),
            }
            self.clock.sleep(self.settings.run_id_poll_interval()).await;
        }
        Err(Error::RunNotFound {
            job: job.to_string(),
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeJob, FakeJobControl, VirtualClock};
    use ocm_config::OrchestratorSettings;
    use std::time::Duration;

    fn orchestrator(control: FakeJobControl) -> Orchestrator<FakeJobControl, VirtualClock> {
        Orchestrator::new(
            control,
            VirtualClock::new(),
            OrchestratorSettings::default(),
            "refs/heads/main",
        )
    }

    #[tokio::test]
    async fn test_trigger_returns_discovered_run() {
        let mut script = FakeJob::succeeding();
        script.lists_before_visible = 2;
        let orchestrator =
            orchestrator(FakeJobControl::new().with_job("login-nc-v27.yml", script));

        let run_id = orchestrator.trigger("login-nc-v27.yml").await.unwrap();

        assert_eq!(run_id, 1);
        assert_eq!(orchestrator.control().dispatch_refs(), vec!["refs/heads/main"]);
        assert_eq!(
            orchestrator.control().list_branches(),
            vec!["main", "main", "main"]
        );
        assert_eq!(
            orchestrator.clock().sleeps(),
            vec![
                Duration::from_secs(5),
                Duration::from_secs(5),
                Duration::from_secs(5)
            ]
        );
    }

    #[tokio::test]
    async fn test_list_errors_do_not_abort_discovery() {
        let mut script = FakeJob::succeeding();
        script.list_errors = 3;
        let orchestrator =
            orchestrator(FakeJobControl::new().with_job("login-nc-v27.yml", script));

        let run_id = orchestrator.trigger("login-nc-v27.yml").await.unwrap();

        assert_eq!(run_id, 1);
        assert_eq!(orchestrator.control().list_branches().len(), 4);
    }

    #[tokio::test]
    async fn test_dispatch_error() {
        let orchestrator = orchestrator(
            FakeJobControl::new().with_job("login-nc-v27.yml", FakeJob::undispatchable()),
        );

        let result = orchestrator.trigger("login-nc-v27.yml").await;

        match result {
            Err(Error::Dispatch { job, .. }) => assert_eq!(job, "login-nc-v27.yml"),
            other => panic!("Expected Dispatch error, got {:?}", other),
        }
        assert!(orchestrator.control().list_branches().is_empty());
    }

    #[tokio::test]
    async fn test_run_not_found_after_timeout() {
        let mut script = FakeJob::succeeding();
        script.never_visible = true;
        let orchestrator =
            orchestrator(FakeJobControl::new().with_job("login-nc-v27.yml", script));

        let result = orchestrator.trigger("login-nc-v27.yml").await;

        match result {
            Err(Error::RunNotFound { job, timeout }) => {
                assert_eq!(job, "login-nc-v27.yml");
                assert_eq!(timeout, Duration::from_secs(600));
            }
            other => panic!("Expected RunNotFound error, got {:?}", other),
        }
        // One lookup every 5s over the 600s window.
        assert_eq!(orchestrator.control().list_branches().len(), 120);
        assert_eq!(orchestrator.clock().elapsed(), Duration::from_secs(605));
    }
}
