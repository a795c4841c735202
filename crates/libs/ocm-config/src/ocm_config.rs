//! Core configuration types for the orchestrator.

use crate::{
    expected_failures::ExpectedFailures, job_selection::JobSelection, platforms::PlatformNames,
    prelude::*,
};
use std::{collections::BTreeMap, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::info;

/// Polling and batching settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorSettings {
    /// Jobs triggered and tracked concurrently per batch.
    pub batch_size: usize,
    /// Seconds between two status checks of a running job.
    pub status_poll_interval_secs: u64,
    /// Seconds between two lookups of a freshly dispatched run.
    pub run_id_poll_interval_secs: u64,
    /// Seconds to wait for a dispatched run to show up.
    pub run_id_timeout_secs: u64,
    /// Seconds to wait after dispatch before the first run lookup.
    pub initial_run_id_delay_secs: u64,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            batch_size: 10,
            status_poll_interval_secs: 30,
            run_id_poll_interval_secs: 5,
            run_id_timeout_secs: 600,
            initial_run_id_delay_secs: 5,
        }
    }
}

impl OrchestratorSettings {
    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_secs(self.status_poll_interval_secs)
    }

    pub fn run_id_poll_interval(&self) -> Duration {
        Duration::from_secs(self.run_id_poll_interval_secs)
    }

    pub fn run_id_timeout(&self) -> Duration {
        Duration::from_secs(self.run_id_timeout_secs)
    }

    pub fn initial_run_id_delay(&self) -> Duration {
        Duration::from_secs(self.initial_run_id_delay_secs)
    }
}

/// Job list settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsSettings {
    /// Debug list that replaces the full matrix when non-empty.
    #[serde(rename = "override")]
    pub override_jobs: Vec<String>,
    /// Jobs allowed to fail. Replaces the built-in list when present.
    pub expected_failures: Option<Vec<String>>,
}

/// User-provided configuration from TOML files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcmUserConfig {
    /// Polling and batching settings.
    pub orchestrator: OrchestratorSettings,
    /// Job list settings.
    pub jobs: JobsSettings,
    /// Extra or replacement platform display names, keyed by abbreviation.
    pub platforms: BTreeMap<String, String>,
}

/// Resolved configuration for one orchestrator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcmConfig {
    /// Polling and batching settings.
    pub orchestrator: OrchestratorSettings,
    /// Jobs to run.
    pub selection: JobSelection,
    /// Jobs allowed to fail.
    pub expected_failures: ExpectedFailures,
    /// Platform display names.
    pub platforms: PlatformNames,
}

impl OcmConfig {
    /// Resolve the user configuration against the full job matrix.
    ///
    /// `workflows_csv` is the comma separated matrix, usually taken from
    /// `WORKFLOWS_CSV`.
    pub fn from_user_config(config: OcmUserConfig, workflows_csv: &str) -> Result<Self> {
        if config.orchestrator.batch_size == 0 {
            return Err(Error::InvalidBatchSize);
        }
        let selection =
            JobSelection::resolve(config.jobs.override_jobs, JobSelection::parse_csv(workflows_csv))?;
        let expected_failures = match config.jobs.expected_failures {
            Some(names) => ExpectedFailures::new(names),
            None => ExpectedFailures::default(),
        };
        let mut platforms = PlatformNames::default();
        platforms.extend(config.platforms);

        info!(
            "Resolved {} job(s) from the {} list, {} expected failure(s)",
            selection.jobs().len(),
            selection.source(),
            expected_failures.len()
        );

        Ok(Self {
            orchestrator: config.orchestrator,
            selection,
            expected_failures,
            platforms,
        })
    }
}

impl OcmUserConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file_path)?;
        Self::from_toml(&contents)
    }
    /// Parse configuration from TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        Ok(toml::from_str(value)?)
    }
}
