//! Completion waiter.
//!
//! Polls a run until it completes. There is no timeout and no cancellation: a
//! run that never completes is polled until the process is stopped.

use tracing::{trace, warn};

use crate::{
    clock::Clock,
    job::{Conclusion, RunStatus},
    job_control::JobControl,
    scheduler::Orchestrator,
};

impl<J: JobControl, C: Clock> Orchestrator<J, C> {
    /// Wait until `run_id` completes and return its conclusion.
    ///
    /// Query errors are logged and count as "not completed yet".
    pub async fn wait_for_completion(&self, run_id: u64) -> Conclusion {
        loop {
            match self.control.get_run(run_id).await {
                Ok(run) if run.status == RunStatus::Completed => {
                    return run.conclusion.unwrap_or(Conclusion::Unknown);
                }
                Ok(run) => trace!("Run {run_id} is {}", run.status),
                Err(err) => warn!("Error fetching run {run_id}: {err}"),
            }
            self.clock.sleep(self.settings.status_poll_interval()).await;
        }
    }
}
