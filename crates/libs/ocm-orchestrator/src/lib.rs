//! Orchestrator for the OCM interoperability test suite.
//!
//! Triggers the suite's CI jobs in bounded batches, tracks each run to
//! completion and renders the results as a compatibility matrix.
//!
//! - [`scheduler::Orchestrator`] runs the jobs through a [`job_control::JobControl`]
//!   service, [`github::GithubJobControl`] in production.
//! - [`group::group_results`] parses job names into test type, sender and
//!   receiver and groups the results.
//! - [`report::render_report`] renders the matrix into a [`summary::Summary`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use ocm_config::{OcmConfig, OcmUserConfig, RunContext};
//! use ocm_orchestrator::{clock::TokioClock, github::GithubJobControl, scheduler::Orchestrator};
//!
//! # async fn example() -> ocm_orchestrator::prelude::Result<()> {
//! let config = OcmConfig::from_user_config(OcmUserConfig::default(), "login-nc-v27.yml")?;
//! let context = RunContext::from_env()?;
//! let control = GithubJobControl::from_context(&context, "token")?;
//! let orchestrator = Orchestrator::new(control, TokioClock, config.orchestrator, &context.git_ref);
//! let results = orchestrator.run(config.selection.jobs()).await;
//! # Ok(())
//! # }
//! ```

pub mod clock;
mod dispatch;
pub mod error;
pub mod github;
pub mod group;
pub mod job;
pub mod job_control;
pub mod name;
pub mod prelude;
pub mod report;
pub mod scheduler;
pub mod summary;
mod wait;

#[cfg(test)]
pub(crate) mod testing;

pub use job::{Conclusion, JobResult, RunStatus, WorkflowRun};
pub use scheduler::Orchestrator;
