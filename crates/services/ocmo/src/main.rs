//! OCM matrix orchestrator (ocmo)
//!
//! Runs from a GitHub Actions job of the OCM interoperability test suite:
//!
//! - **Run**: dispatch every selected workflow in batches, wait for the runs
//!   to complete and publish the compatibility matrix to the step summary and
//!   a snapshot file
//! - **Parse**: check that every workflow name maps onto the matrix
//!
//! The workflow list comes from `WORKFLOWS_CSV` unless the configuration file
//! sets an override list. The repository, ref and commit are read from the
//! GitHub Actions environment.

mod cli;
mod commands;
mod error;
mod prelude;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{handle_parse, handle_run, load_config, read_snapshot_jobs};
use crate::prelude::*;

/// Main entry point for the OCM matrix orchestrator.
///
/// Exits with a failure status when a workflow failed without being allowed to.
///
/// # Examples
///
/// ```bash
/// # Run the whole matrix
/// WORKFLOWS_CSV=login-nc-v27.yml,share-with-nc-v27-oc-v10.yml ocmo run
///
/// # Check the job names of a previous run
/// ocmo parse --from-snapshot compatibility-matrix.md
/// ```
#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ocmo=info,ocm_orchestrator=info,ocm_config=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let config = load_config(cli.config.as_deref(), &cli.workflows)?;
            if handle_run(config, args).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Parse { from_snapshot } => {
            let jobs = match from_snapshot {
                Some(path) => read_snapshot_jobs(&path).await?,
                None => load_config(cli.config.as_deref(), &cli.workflows)?
                    .selection
                    .jobs()
                    .to_vec(),
            };
            handle_parse(&jobs)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
