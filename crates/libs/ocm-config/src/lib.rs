//! Configuration management for the OCM compatibility matrix orchestrator.
//!
//! Settings come from three places, resolved once at start-up:
//!
//! - an optional TOML file (timings, batch size, job lists, platform names),
//! - the `WORKFLOWS_CSV` environment variable holding the full job matrix,
//! - the GitHub Actions run context variables.
//!
//! # Usage
//!
//! ```rust
//! use ocm_config::{OcmConfig, OcmUserConfig};
//!
//! let user_config = OcmUserConfig::from_toml("[orchestrator]\nbatch_size = 4").unwrap();
//! let config = OcmConfig::from_user_config(user_config, "login-nc-v27.yml").unwrap();
//! assert_eq!(config.orchestrator.batch_size, 4);
//! ```

pub mod error;
pub mod expected_failures;
pub mod job_selection;
pub mod ocm_config;
pub mod platforms;
pub mod prelude;
pub mod run_context;

pub use expected_failures::ExpectedFailures;
pub use job_selection::JobSelection;
pub use ocm_config::{OcmConfig, OcmUserConfig, OrchestratorSettings};
pub use platforms::PlatformNames;
pub use run_context::RunContext;
