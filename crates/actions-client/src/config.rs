//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Upper bound on a single request, connect to last body byte.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Media type requested on every call.
pub const ACCEPT_HEADER: &str = "application/vnd.github+json";

/// Workflow API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ActionsConfig {
    /// API base URL, without a trailing slash
    pub api_url: String,
    /// Bearer token
    pub token: Option<String>,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ActionsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionsConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ActionsConfig {
    /// Create config for a specific API endpoint
    pub fn new(api_url: &str) -> Self {
        ActionsConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: None,
            user_agent: format!("chart-release/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set authentication token
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Build the URL for a repository-scoped path such as `actions/runs`.
    pub fn repo_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, owner, repo, path)
    }
}
