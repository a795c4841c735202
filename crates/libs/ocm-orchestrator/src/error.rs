//! Orchestrator error types.

use std::{fmt, time::Duration};

/// Orchestrator errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The job control trigger call failed. Not retried.
    #[error("Failed to dispatch job {job}: {source}")]
    Dispatch { job: String, source: Box<Error> },

    /// No in-progress run showed up for a dispatched job in time. Not retried.
    #[error("Timeout: no in-progress run found for job {job} within {timeout:?}")]
    RunNotFound { job: String, timeout: Duration },

    /// A job name does not encode test type, sender and receiver.
    #[error("Malformed job name {name}: {reason}")]
    MalformedJobName {
        name: String,
        reason: MalformedJobNameReason,
    },

    /// A job control request failed.
    #[error(transparent)]
    Request(#[from] ocm_requests::error::Error),

    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ocm_config::error::Error),

    /// I/O operation failed.
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Why a job name could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedJobNameReason {
    /// Fewer than two tokens to form the test type.
    MissingTestType,
    /// The `login` platform segment has no version token.
    MissingPlatformVersion,
    /// The sender segment has no version token.
    MissingSenderVersion,
    /// The receiver segment has no version token.
    MissingReceiverVersion,
    /// Tokens left over after the last version token.
    TrailingTokens,
}

impl fmt::Display for MalformedJobNameReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTestType => write!(f, "cannot find test type"),
            Self::MissingPlatformVersion => write!(f, "cannot find platform version"),
            Self::MissingSenderVersion => write!(f, "cannot find sender version"),
            Self::MissingReceiverVersion => write!(f, "cannot find receiver version"),
            Self::TrailingTokens => write!(f, "unexpected tokens after the last version"),
        }
    }
}
