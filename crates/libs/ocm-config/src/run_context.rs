//! Read-only metadata about the CI run hosting the orchestrator.

use crate::prelude::*;

const DEFAULT_SERVER_URL: &str = "https://github.com";
const DEFAULT_API_URL: &str = "https://api.github.com";

/// Branch name of a git ref (`refs/heads/main` -> `main`). Other refs are
/// returned unchanged.
pub fn branch_from_ref(git_ref: &str) -> &str {
    git_ref.strip_prefix("refs/heads/").unwrap_or(git_ref)
}

/// Repository coordinates and run metadata, read from the GitHub Actions
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Git ref the jobs are dispatched on, e.g. `refs/heads/main`.
    pub git_ref: String,
    /// Commit SHA of the run.
    pub sha: String,
    /// Identifier of the orchestrating run itself.
    pub run_id: u64,
    /// Web server base URL.
    pub server_url: String,
    /// REST API base URL.
    pub api_url: String,
}

impl RunContext {
    /// Read the context from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    /// Read the context through `lookup`, which maps a variable name to its value.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |var: &'static str| lookup(var).ok_or(Error::MissingEnv(var));

        let repository = require("GITHUB_REPOSITORY")?;
        let (owner, repo) = match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
                (owner.to_string(), repo.to_string())
            }
            _ => return Err(Error::InvalidRepository(repository)),
        };
        let run_id = require("GITHUB_RUN_ID")?;
        let run_id = run_id
            .parse()
            .map_err(|_| Error::InvalidRunId(run_id.clone()))?;

        Ok(Self {
            owner,
            repo,
            git_ref: require("GITHUB_REF")?,
            sha: require("GITHUB_SHA")?,
            run_id,
            server_url: lookup("GITHUB_SERVER_URL")
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            api_url: lookup("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }

    /// Branch name derived from the ref (`refs/heads/main` -> `main`).
    pub fn branch(&self) -> &str {
        branch_from_ref(&self.git_ref)
    }

    /// Web URL of any run in this repository.
    pub fn run_url_for(&self, run_id: u64) -> String {
        format!(
            "{}/{}/{}/actions/runs/{run_id}",
            self.server_url, self.owner, self.repo
        )
    }

    /// Web URL of the orchestrating run.
    pub fn run_url(&self) -> String {
        self.run_url_for(self.run_id)
    }

    /// Web URL of the commit tree.
    pub fn commit_url(&self) -> String {
        format!(
            "{}/{}/{}/tree/{}",
            self.server_url, self.owner, self.repo, self.sha
        )
    }

    /// First seven characters of the commit SHA.
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn github_vars() -> HashMap<String, String> {
        vars(&[
            ("GITHUB_REPOSITORY", "cs3org/ocm-test-suite"),
            ("GITHUB_REF", "refs/heads/main"),
            ("GITHUB_SHA", "0123456789abcdef"),
            ("GITHUB_RUN_ID", "42"),
        ])
    }

    #[test]
    fn test_from_vars() {
        let env = github_vars();
        let context = RunContext::from_vars(|var| env.get(var).cloned()).unwrap();

        assert_eq!(context.owner, "cs3org");
        assert_eq!(context.repo, "ocm-test-suite");
        assert_eq!(context.branch(), "main");
        assert_eq!(context.short_sha(), "0123456");
        assert_eq!(context.api_url, "https://api.github.com");
        assert_eq!(
            context.run_url(),
            "https://github.com/cs3org/ocm-test-suite/actions/runs/42"
        );
        assert_eq!(
            context.commit_url(),
            "https://github.com/cs3org/ocm-test-suite/tree/0123456789abcdef"
        );
    }

    #[test]
    fn test_tag_ref_is_kept_as_branch() {
        let mut env = github_vars();
        env.insert("GITHUB_REF".to_string(), "refs/tags/v1".to_string());
        let context = RunContext::from_vars(|var| env.get(var).cloned()).unwrap();
        assert_eq!(context.branch(), "refs/tags/v1");
    }

    #[test]
    fn test_branch_from_ref() {
        assert_eq!(branch_from_ref("refs/heads/feature/ocm"), "feature/ocm");
        assert_eq!(branch_from_ref("main"), "main");
    }

    #[test]
    fn test_missing_variable() {
        let mut env = github_vars();
        env.remove("GITHUB_SHA");
        let result = RunContext::from_vars(|var| env.get(var).cloned());
        assert!(matches!(result, Err(Error::MissingEnv("GITHUB_SHA"))));
    }

    #[test]
    fn test_invalid_repository() {
        let mut env = github_vars();
        env.insert("GITHUB_REPOSITORY".to_string(), "no-slash".to_string());
        let result = RunContext::from_vars(|var| env.get(var).cloned());
        assert!(matches!(result, Err(Error::InvalidRepository(_))));
    }
}
