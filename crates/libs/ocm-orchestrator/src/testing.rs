//! In-memory job control service and virtual clock for tests.

use std::{
    collections::HashMap,
    future::Future,
    sync::Mutex,
    time::Duration,
};

use tokio::time::Instant;

use crate::{
    clock::Clock,
    job::{Conclusion, RunStatus, WorkflowRun},
    job_control::JobControl,
    prelude::*,
};

/// Scripted behaviour of one job.
#[derive(Debug, Clone)]
pub(crate) struct FakeJob {
    pub dispatch_fails: bool,
    pub list_errors: usize,
    pub lists_before_visible: usize,
    pub never_visible: bool,
    pub status_errors: usize,
    pub polls_before_completion: usize,
    pub conclusion: Option<Conclusion>,
}

impl FakeJob {
    pub fn concluding(conclusion: Conclusion) -> Self {
        Self {
            dispatch_fails: false,
            list_errors: 0,
            lists_before_visible: 0,
            never_visible: false,
            status_errors: 0,
            polls_before_completion: 0,
            conclusion: Some(conclusion),
        }
    }

    pub fn succeeding() -> Self {
        Self::concluding(Conclusion::Success)
    }

    pub fn failing() -> Self {
        Self::concluding(Conclusion::Failure)
    }

    pub fn undispatchable() -> Self {
        Self {
            dispatch_fails: true,
            ..Self::succeeding()
        }
    }
}

/// What the fake observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FakeEvent {
    Dispatched(String),
    Completed(String),
    /// Pushed by tests when the orchestrator hands over a result.
    Recorded(String),
}

#[derive(Debug)]
struct FakeJobState {
    script: FakeJob,
    run_id: Option<u64>,
    lists: usize,
    polls: usize,
    completed: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    jobs: HashMap<String, FakeJobState>,
    runs: HashMap<u64, String>,
    next_run_id: u64,
    events: Vec<FakeEvent>,
    dispatch_refs: Vec<String>,
    list_branches: Vec<String>,
}

fn service_error(method: &str, url: impl Into<String>) -> Error {
    Error::Request(ocm_requests::error::Error::Status {
        method: method.to_string(),
        url: url.into(),
        status: 502,
        body: "Bad Gateway".to_string(),
    })
}

/// Job control service answering from per-job scripts. Jobs without a script
/// succeed immediately.
#[derive(Debug, Default)]
pub(crate) struct FakeJobControl {
    state: Mutex<FakeState>,
}

impl FakeJobControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_job(self, name: &str, script: FakeJob) -> Self {
        self.state.lock().unwrap().jobs.insert(
            name.to_string(),
            FakeJobState {
                script,
                run_id: None,
                lists: 0,
                polls: 0,
                completed: false,
            },
        );
        self
    }

    pub fn record(&self, event: FakeEvent) {
        self.state.lock().unwrap().events.push(event);
    }

    pub fn events(&self) -> Vec<FakeEvent> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn dispatch_refs(&self) -> Vec<String> {
        self.state.lock().unwrap().dispatch_refs.clone()
    }

    pub fn list_branches(&self) -> Vec<String> {
        self.state.lock().unwrap().list_branches.clone()
    }

    pub fn status_polls(&self, job: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .jobs
            .get(job)
            .map_or(0, |job| job.polls)
    }
}

impl JobControl for FakeJobControl {
    async fn dispatch(&self, job: &str, git_ref: &str) -> Result<()> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.dispatch_refs.push(git_ref.to_string());
        let run_id = state.next_run_id + 1;
        let entry = state
            .jobs
            .entry(job.to_string())
            .or_insert_with(|| FakeJobState {
                script: FakeJob::succeeding(),
                run_id: None,
                lists: 0,
                polls: 0,
                completed: false,
            });
        if entry.script.dispatch_fails {
            return Err(service_error("POST", format!("workflows/{job}/dispatches")));
        }
        entry.run_id = Some(run_id);
        state.next_run_id = run_id;
        state.runs.insert(run_id, job.to_string());
        state.events.push(FakeEvent::Dispatched(job.to_string()));
        Ok(())
    }

    async fn list_runs(
        &self,
        job: &str,
        branch: &str,
        status: RunStatus,
        limit: u32,
    ) -> Result<Vec<WorkflowRun>> {
        assert_eq!(status, RunStatus::InProgress);
        assert_eq!(limit, 1);
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.list_branches.push(branch.to_string());
        let Some(entry) = state.jobs.get_mut(job) else {
            return Ok(Vec::new());
        };
        let Some(run_id) = entry.run_id else {
            return Ok(Vec::new());
        };
        if entry.script.list_errors > 0 {
            entry.script.list_errors -= 1;
            return Err(service_error("GET", format!("workflows/{job}/runs")));
        }
        if entry.script.never_visible || entry.lists < entry.script.lists_before_visible {
            entry.lists += 1;
            return Ok(Vec::new());
        }
        Ok(vec![WorkflowRun {
            id: run_id,
            status: RunStatus::InProgress,
            conclusion: None,
        }])
    }

    async fn get_run(&self, run_id: u64) -> Result<WorkflowRun> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        let Some(job) = state.runs.get(&run_id).cloned() else {
            return Err(service_error("GET", format!("runs/{run_id}")));
        };
        let Some(entry) = state.jobs.get_mut(&job) else {
            return Err(service_error("GET", format!("runs/{run_id}")));
        };
        if entry.script.status_errors > 0 {
            entry.script.status_errors -= 1;
            return Err(service_error("GET", format!("runs/{run_id}")));
        }
        entry.polls += 1;
        if entry.polls <= entry.script.polls_before_completion {
            return Ok(WorkflowRun {
                id: run_id,
                status: RunStatus::InProgress,
                conclusion: None,
            });
        }
        let conclusion = entry.script.conclusion;
        let first_completion = !entry.completed;
        entry.completed = true;
        if first_completion {
            state.events.push(FakeEvent::Completed(job));
        }
        Ok(WorkflowRun {
            id: run_id,
            status: RunStatus::Completed,
            conclusion,
        })
    }
}

/// Clock whose sleeps return at once after moving virtual time forward.
#[derive(Debug)]
pub(crate) struct VirtualClock {
    start: Instant,
    elapsed: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap()
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        *self.elapsed.lock().unwrap() += duration;
        self.sleeps.lock().unwrap().push(duration);
        tokio::task::yield_now()
    }
}
