//! Command handlers for the OCM matrix orchestrator.
//!
//! - `run`: dispatch every selected workflow, then publish the matrix
//! - `parse`: display how the workflow names map onto the matrix

use std::path::Path;

use chrono::Utc;
use ocm_config::{OcmConfig, OcmUserConfig, RunContext};
use ocm_orchestrator::{
    JobResult, Orchestrator,
    clock::TokioClock,
    github::GithubJobControl,
    group::group_results,
    report::{ReportContext, all_succeeded, jobs_from_snapshot, render_report},
    summary::{write_outputs, write_snapshot},
};
use tracing::{info, warn};

use crate::{cli::RunArgs, prelude::*};

const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y, %H:%M:%S UTC";

/// Load the user configuration, from `path` when given.
pub fn load_config(path: Option<&Path>, workflows: &str) -> Result<OcmConfig> {
    let user_config = match path {
        Some(path) => OcmUserConfig::from_file(path)?,
        None => OcmUserConfig::default(),
    };
    Ok(OcmConfig::from_user_config(user_config, workflows)?)
}

/// Handles the run command.
///
/// Returns whether every workflow passed or was allowed to fail.
pub async fn handle_run(mut config: OcmConfig, args: RunArgs) -> Result<bool> {
    if let Some(batch_size) = args.batch_size {
        if batch_size == 0 {
            return Err(ocm_config::error::Error::InvalidBatchSize.into());
        }
        config.orchestrator.batch_size = batch_size;
    }
    let token = args.token.as_deref().ok_or(Error::TokenMissing)?;
    let context = RunContext::from_env()?;
    info!(
        "Running {} on {}/{} at {}",
        config.selection,
        context.owner,
        context.repo,
        context.git_ref
    );

    let control = GithubJobControl::from_context(&context, token)?;
    let orchestrator = Orchestrator::new(
        control,
        TokioClock,
        config.orchestrator.clone(),
        &context.git_ref,
    );
    let results = orchestrator.run(config.selection.jobs()).await;

    publish(&results, &config, &context, &args).await
}

/// Render the matrix and write it to every configured sink.
async fn publish(
    results: &[JobResult],
    config: &OcmConfig,
    context: &RunContext,
    args: &RunArgs,
) -> Result<bool> {
    let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
    let report_context = ReportContext {
        run: context,
        timestamp: &timestamp,
        expected_failures: &config.expected_failures,
        platforms: &config.platforms,
    };
    let mut summary = render_report(results, &report_context)?;
    let snapshot = summary.stringify().to_string();

    match &args.summary {
        Some(path) => summary.write(path).await?,
        None => warn!("GITHUB_STEP_SUMMARY is not set, skipping the step summary"),
    }
    write_snapshot(&args.output, &snapshot).await?;

    let succeeded = all_succeeded(results, &config.expected_failures);
    if let Some(path) = &args.github_output {
        write_outputs(
            path,
            &[
                ("matrix_file", args.output.display().to_string()),
                ("all_succeeded", succeeded.to_string()),
            ],
        )
        .await?;
    }

    if succeeded {
        info!("All {} workflows passed", results.len());
    } else {
        warn!("One or more workflows failed");
    }
    Ok(succeeded)
}

/// Read the job list embedded in a matrix snapshot.
pub async fn read_snapshot_jobs(path: &Path) -> Result<Vec<String>> {
    let snapshot = tokio::fs::read_to_string(path).await?;
    jobs_from_snapshot(&snapshot).ok_or_else(|| Error::SnapshotWithoutJobs(path.to_path_buf()))
}

/// Handles the parse command to display the matrix layout of `jobs`.
pub fn handle_parse(jobs: &[String]) -> Result<()> {
    let results: Vec<JobResult> = jobs.iter().map(JobResult::failed).collect();
    let groups = group_results(&results)?;

    println!("Workflows parsed successfully");
    println!("Number of workflows: {}", jobs.len());
    println!("Number of test types: {}", groups.len());
    for (test_type, group) in &groups {
        println!("\nTest type: {test_type}");
        println!("  Entries: {}", group.entries.len());
        println!("  Senders: {:?}", group.senders);
        println!("  Receivers: {:?}", group.receivers);
        for entry in &group.entries {
            println!("    {}: {} -> {}", entry.name, entry.sender, entry.receiver);
        }
    }
    Ok(())
}
