//! Wire types for the workflow endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle status of a workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Requested,
    Waiting,
    Pending,
    Queued,
    InProgress,
    Completed,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Requested => "requested",
            RunStatus::Waiting => "waiting",
            RunStatus::Pending => "pending",
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Completed => "completed",
            RunStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One execution of a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    /// Workflow file path, e.g. `.github/workflows/staging-release.yaml`.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub status: Option<RunStatus>,
    #[serde(default)]
    pub conclusion: Option<String>,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub workflow_id: u64,
}

impl WorkflowRun {
    /// `true` once the run has reached a terminal state.
    pub fn is_completed(&self) -> bool {
        self.status == Some(RunStatus::Completed)
    }

    /// `true` when the run completed with a `success` conclusion.
    pub fn succeeded(&self) -> bool {
        self.is_completed() && self.conclusion.as_deref() == Some("success")
    }

    /// Status for display; a missing status renders as `unknown`.
    pub fn status_label(&self) -> &'static str {
        self.status.map(|s| s.as_str()).unwrap_or("unknown")
    }
}

/// Response body of the run listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowRunsPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

/// Filters accepted by the run listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRunsQuery {
    /// Triggering event, e.g. `push`.
    pub event: Option<String>,
    pub per_page: Option<u32>,
}

impl ListRunsQuery {
    /// Latest `per_page` runs triggered by `event`.
    pub fn recent(event: &str, per_page: u32) -> Self {
        Self {
            event: Some(event.to_string()),
            per_page: Some(per_page),
        }
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(event) = &self.event {
            pairs.push(("event", event.clone()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }
}

/// Body of a `workflow_dispatch` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    /// Git reference (branch or tag) the workflow runs on.
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, String>,
}

impl DispatchRequest {
    /// Dispatch on `branch`, passing the branch name as the `branch` input.
    pub fn for_branch(branch: &str) -> Self {
        let mut inputs = BTreeMap::new();
        inputs.insert("branch".to_string(), branch.to_string());
        Self {
            git_ref: branch.to_string(),
            inputs,
        }
    }
}
