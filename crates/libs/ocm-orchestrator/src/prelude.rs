//! Common types and utilities.

/// Orchestrator error type.
pub use crate::error::Error;

/// Orchestrator result type.
pub type Result<T> = core::result::Result<T, Error>;
