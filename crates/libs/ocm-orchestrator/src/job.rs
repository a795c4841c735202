//! Job and run types shared by the orchestrator stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a run, as reported by the job control service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Waiting,
    Requested,
    Pending,
    #[serde(other)]
    Unknown,
}

/// Terminal outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    Success,
    Failure,
    Cancelled,
    Skipped,
    TimedOut,
    ActionRequired,
    Neutral,
    Stale,
    StartupFailure,
    #[serde(other)]
    Unknown,
}

/// One run of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRun {
    /// Run identifier.
    pub id: u64,
    /// Current status.
    pub status: RunStatus,
    /// Outcome, only set once the run completed.
    pub conclusion: Option<Conclusion>,
}

/// Page of runs returned by a run listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRunList {
    /// Number of runs matching the query, across all pages.
    pub total_count: u64,
    /// Runs on this page.
    pub workflow_runs: Vec<WorkflowRun>,
}

/// Outcome of one job in an orchestrator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    /// Job name, e.g. `share-with-nc-v27-oc-v10.yml`.
    pub name: String,
    /// Run identifier, 0 when the job never got a run.
    pub run_id: u64,
    /// Terminal outcome.
    pub conclusion: Conclusion,
}

impl JobResult {
    pub fn new(name: impl Into<String>, run_id: u64, conclusion: Conclusion) -> Self {
        Self {
            name: name.into(),
            run_id,
            conclusion,
        }
    }

    /// Result of a job that could not be dispatched or whose run was never found.
    pub fn failed(name: impl Into<String>) -> Self {
        Self::new(name, 0, Conclusion::Failure)
    }

    pub fn is_success(&self) -> bool {
        self.conclusion == Conclusion::Success
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Completed => "completed",
            RunStatus::Waiting => "waiting",
            RunStatus::Requested => "requested",
            RunStatus::Pending => "pending",
            RunStatus::Unknown => "unknown",
        };
        write!(f, "{status}")
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conclusion = match self {
            Conclusion::Success => "success",
            Conclusion::Failure => "failure",
            Conclusion::Cancelled => "cancelled",
            Conclusion::Skipped => "skipped",
            Conclusion::TimedOut => "timed_out",
            Conclusion::ActionRequired => "action_required",
            Conclusion::Neutral => "neutral",
            Conclusion::Stale => "stale",
            Conclusion::StartupFailure => "startup_failure",
            Conclusion::Unknown => "unknown",
        };
        write!(f, "{conclusion}")
    }
}

impl fmt::Display for JobResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (run {}): {}", self.name, self.run_id, self.conclusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_deserialization_ignores_extra_fields() {
        let run: WorkflowRun = serde_json::from_str(
            r#"{"id": 17, "name": "login", "status": "completed", "conclusion": "timed_out"}"#,
        )
        .unwrap();
        assert_eq!(run.id, 17);
        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(run.conclusion, Some(Conclusion::TimedOut));
    }

    #[test]
    fn test_unknown_values_do_not_fail() {
        let run: WorkflowRun =
            serde_json::from_str(r#"{"id": 1, "status": "brand_new", "conclusion": null}"#)
                .unwrap();
        assert_eq!(run.status, RunStatus::Unknown);
        assert_eq!(run.conclusion, None);

        let conclusion: Conclusion = serde_json::from_str(r#""exploded""#).unwrap();
        assert_eq!(conclusion, Conclusion::Unknown);
    }

    #[test]
    fn test_display_matches_wire_format() {
        assert_eq!(RunStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            serde_json::to_string(&RunStatus::InProgress).unwrap(),
            r#""in_progress""#
        );
        assert_eq!(
            JobResult::failed("login-nc-v27.yml").to_string(),
            "login-nc-v27.yml (run 0): failure"
        );
    }
}
