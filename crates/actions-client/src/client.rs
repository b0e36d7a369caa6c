//! HTTP client for the workflow endpoints
//!
//! Wraps the three calls the release tooling needs: dispatching a
//! workflow, listing recent runs of a repository, and fetching a single
//! run by id.

use crate::config::{ActionsConfig, ACCEPT_HEADER};
use crate::error::ActionsError;
use crate::model::{DispatchRequest, ListRunsQuery, WorkflowRun, WorkflowRunsPage};
use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use tracing::debug;

/// Workflow API client
#[derive(Clone)]
pub struct ActionsClient {
    config: ActionsConfig,
    http_client: reqwest::Client,
}

impl ActionsClient {
    /// Create a new client. A bearer token is mandatory.
    pub fn new(config: ActionsConfig) -> Result<Self> {
        let token = config.token.as_deref().ok_or(ActionsError::MissingToken)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ActionsError::Config(format!("token is not a valid header: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(ActionsClient {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ActionsConfig {
        &self.config
    }

    /// Ask the platform to start `workflow_file` in `owner/repo`.
    ///
    /// The endpoint answers `204 No Content` on success.
    pub async fn dispatch_workflow(
        &self,
        owner: &str,
        repo: &str,
        workflow_file: &str,
        request: &DispatchRequest,
    ) -> Result<()> {
        let url = self.config.repo_url(
            owner,
            repo,
            &format!("actions/workflows/{}/dispatches", workflow_file),
        );
        debug!(%url, git_ref = %request.git_ref, "dispatching workflow");

        let builder = self.http_client.post(&url).json(request);
        send(builder, "POST", &url).await?;
        Ok(())
    }

    /// List the most recent runs of `owner/repo` matching `query`.
    pub async fn list_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
        query: &ListRunsQuery,
    ) -> Result<WorkflowRunsPage> {
        let url = self.config.repo_url(owner, repo, "actions/runs");
        debug!(%url, ?query, "listing workflow runs");

        let builder = self.http_client.get(&url).query(&query.to_pairs());
        let response = send(builder, "GET", &url).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch a single run by id.
    pub async fn get_workflow_run(&self, owner: &str, repo: &str, run_id: u64) -> Result<WorkflowRun> {
        let url = self
            .config
            .repo_url(owner, repo, &format!("actions/runs/{}", run_id));
        debug!(%url, "fetching workflow run");

        let response = send(self.http_client.get(&url), "GET", &url).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Send a request and turn non-success statuses into [`ActionsError::Status`].
async fn send(builder: RequestBuilder, method: &'static str, url: &str) -> Result<Response> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ActionsError::Status {
        method,
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}
