use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ocm_config::error::Error),

    #[error(transparent)]
    Orchestrator(#[from] ocm_orchestrator::error::Error),

    #[error("GitHub token is missing. Set GITHUB_TOKEN environment variable or use --token cli argument")]
    TokenMissing,

    #[error("No job list found in snapshot {0:?}")]
    SnapshotWithoutJobs(PathBuf),
}
