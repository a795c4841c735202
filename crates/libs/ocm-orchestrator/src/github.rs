//! GitHub Actions implementation of [`JobControl`].
//!
//! Jobs are workflow files (`share-with-nc-v27-oc-v10.yml`), dispatched
//! through `workflow_dispatch` and tracked through the workflow runs API.

use ocm_config::RunContext;
use ocm_requests::ApiClient;
use serde::Serialize;
use tracing::debug;

use crate::{
    job::{RunStatus, WorkflowRun, WorkflowRunList},
    job_control::JobControl,
    prelude::*,
};

const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Serialize)]
struct DispatchRequest<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
}

/// Workflow control through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubJobControl {
    client: ApiClient,
    owner: String,
    repo: String,
}

impl GithubJobControl {
    /// Creates a client for `owner/repo` on the API at `api_url`.
    pub fn new(
        api_url: &str,
        token: &str,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Result<Self> {
        let client = ApiClient::new(
            api_url,
            &[
                ("accept", "application/vnd.github+json".to_string()),
                ("authorization", format!("Bearer {token}")),
                ("x-github-api-version", API_VERSION.to_string()),
                ("user-agent", format!("ocmo/{}", env!("CARGO_PKG_VERSION"))),
            ],
        )?;
        Ok(Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        })
    }

    /// Creates a client for the repository hosting the current run.
    pub fn from_context(context: &RunContext, token: &str) -> Result<Self> {
        Self::new(&context.api_url, token, &context.owner, &context.repo)
    }

    fn repo_path(&self, path: &str) -> String {
        format!("repos/{}/{}/actions/{path}", self.owner, self.repo)
    }
}

impl JobControl for GithubJobControl {
    async fn dispatch(&self, job: &str, git_ref: &str) -> Result<()> {
        debug!("Dispatching workflow {job} on {git_ref}");
        self.client
            .post(
                &self.repo_path(&format!("workflows/{job}/dispatches")),
                &DispatchRequest { git_ref },
            )
            .await?;
        Ok(())
    }

    async fn list_runs(
        &self,
        job: &str,
        branch: &str,
        status: RunStatus,
        limit: u32,
    ) -> Result<Vec<WorkflowRun>> {
        let runs: WorkflowRunList = self
            .client
            .get_with_query(
                &self.repo_path(&format!("workflows/{job}/runs")),
                &[
                    ("branch", branch.to_string()),
                    ("status", status.to_string()),
                    ("per_page", limit.to_string()),
                ],
            )
            .await?;
        if runs.total_count == 0 {
            return Ok(Vec::new());
        }
        Ok(runs.workflow_runs)
    }

    async fn get_run(&self, run_id: u64) -> Result<WorkflowRun> {
        Ok(self
            .client
            .get(&self.repo_path(&format!("runs/{run_id}")))
            .await?)
    }
}
