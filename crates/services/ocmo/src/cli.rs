//! Command-line interface for the OCM matrix orchestrator.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for the OCM matrix orchestrator.
#[derive(Parser)]
#[command(name = "ocmo")]
#[command(about = "Run the OCM interoperability workflows and render the compatibility matrix")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Comma separated list of every workflow in the matrix
    #[arg(long, env = "WORKFLOWS_CSV", default_value = "")]
    pub workflows: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Dispatch every workflow, wait for the results and publish the matrix
    Run(RunArgs),
    /// Parse the workflow names and display the matrix layout
    Parse {
        /// Read the workflow list from a previously written matrix snapshot
        #[arg(long)]
        from_snapshot: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Workflows run concurrently per batch, overrides the configuration file
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Where to write the matrix snapshot
    #[arg(short, long, default_value = "compatibility-matrix.md")]
    pub output: PathBuf,

    /// Step summary file the report is appended to
    #[arg(long, env = "GITHUB_STEP_SUMMARY")]
    pub summary: Option<PathBuf>,

    /// Step outputs file receiving `matrix_file` and `all_succeeded`
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,

    /// GitHub token used to dispatch and query workflows
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_arguments() {
        let cli = Cli::try_parse_from([
            "ocmo",
            "--workflows",
            "login-nc-v27.yml,login-oc-v10.yml",
            "run",
            "--batch-size",
            "4",
            "--token",
            "secret",
        ])
        .unwrap();
        assert_eq!(cli.workflows, "login-nc-v27.yml,login-oc-v10.yml");
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.batch_size, Some(4));
                assert_eq!(args.output, PathBuf::from("compatibility-matrix.md"));
                assert_eq!(args.token.as_deref(), Some("secret"));
            }
            Commands::Parse { .. } => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_parse_from_snapshot() {
        let cli = Cli::try_parse_from(["ocmo", "parse", "--from-snapshot", "matrix.md"]).unwrap();
        match cli.command {
            Commands::Parse { from_snapshot } => {
                assert_eq!(from_snapshot, Some(PathBuf::from("matrix.md")))
            }
            Commands::Run(_) => panic!("Expected parse command"),
        }
    }
}
