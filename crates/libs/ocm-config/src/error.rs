//! Configuration error types.

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error(transparent)]
    IO(#[from] std::io::Error),

    /// TOML deserialization failed.
    #[error(transparent)]
    Deserialization(#[from] toml::de::Error),

    /// The job selection resolved to an empty list.
    #[error("No workflows to run: check WORKFLOWS_CSV")]
    NoJobs,

    /// Batches must hold at least one job.
    #[error("Batch size must be greater than zero")]
    InvalidBatchSize,

    /// A required environment variable is not set.
    #[error("Environment variable '{0}' missing")]
    MissingEnv(&'static str),

    /// `GITHUB_REPOSITORY` is not of the form `owner/repo`.
    #[error("Invalid repository '{0}', expected 'owner/repo'")]
    InvalidRepository(String),

    /// `GITHUB_RUN_ID` is not a number.
    #[error("Invalid run id '{0}'")]
    InvalidRunId(String),
}
