//! Awaiting release workflow runs across repositories.
//!
//! [`ReleaseMonitor`] polls each merged repository independently: first
//! until a run of the release workflow created after the merge shows up,
//! then until that run completes. Every repository shares the same
//! deadline budget ([`MonitorSettings::max_wait`]).

use std::sync::Arc;

use actions_client::{ListRunsQuery, WorkflowRun};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tokio::time::{sleep, timeout_at, Instant};
use tracing::{error, info, warn};

use crate::config::MonitorSettings;
use crate::error::{ReleaseError, ReleaseResult};
use crate::merged::MergedRepo;
use crate::summary::MonitorSummary;

/// Read access to a repository's workflow runs.
#[async_trait]
pub trait WorkflowRunSource: Send + Sync {
    /// Most recent runs of `repo` matching `query`, newest first.
    async fn recent_runs(
        &self,
        repo: &str,
        query: &ListRunsQuery,
    ) -> actions_client::Result<Vec<WorkflowRun>>;

    /// Current state of one run.
    async fn run(&self, repo: &str, run_id: u64) -> actions_client::Result<WorkflowRun>;
}

/// Final classification of a monitored repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Pending,
    Success,
    Failure,
    TimedOut,
}

impl RunOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunOutcome::Pending => "pending",
            RunOutcome::Success => "success",
            RunOutcome::Failure => "failure",
            RunOutcome::TimedOut => "timed_out",
        }
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is known about one repository's release run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryStatus {
    pub repo: String,
    pub outcome: RunOutcome,
    pub run_id: Option<u64>,
    pub url: Option<String>,
    /// Conclusion reported by the platform for completed runs.
    pub conclusion: Option<String>,
}

impl RepositoryStatus {
    pub fn pending(repo: &str) -> Self {
        Self {
            repo: repo.to_string(),
            outcome: RunOutcome::Pending,
            run_id: None,
            url: None,
            conclusion: None,
        }
    }

    fn tracking(repo: &str, run: &WorkflowRun) -> Self {
        Self {
            run_id: Some(run.id),
            url: Some(run.html_url.clone()),
            ..Self::pending(repo)
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == RunOutcome::Success
    }
}

/// First run of `workflow_path` created at or after `merge_time`.
pub fn select_run<'a>(
    runs: &'a [WorkflowRun],
    workflow_path: &str,
    merge_time: DateTime<Utc>,
) -> Option<&'a WorkflowRun> {
    runs.iter()
        .find(|run| run.path == workflow_path && run.created_at >= merge_time)
}

/// Polls workflow runs until each merged repository's release settles.
#[derive(Clone)]
pub struct ReleaseMonitor {
    source: Arc<dyn WorkflowRunSource>,
    settings: Arc<MonitorSettings>,
}

impl ReleaseMonitor {
    pub fn new(source: Arc<dyn WorkflowRunSource>, settings: MonitorSettings) -> Self {
        Self {
            source,
            settings: Arc::new(settings),
        }
    }

    /// Look for the release run triggered by the merge.
    ///
    /// Listing errors are logged and reported as "not found" so the caller
    /// simply polls again.
    pub async fn find_recent_run(
        &self,
        repo: &str,
        merge_time: DateTime<Utc>,
    ) -> Option<WorkflowRun> {
        let query = ListRunsQuery::recent(&self.settings.event, self.settings.per_page);
        let runs = match self.source.recent_runs(repo, &query).await {
            Ok(runs) => runs,
            Err(e) => {
                error!("🔍 Error finding workflows for {}: {}", repo, e);
                return None;
            }
        };

        let found = select_run(&runs, &self.settings.workflow_path, merge_time).cloned();
        if found.is_none() {
            info!(
                "No workflow run found for {} after merge time {}.",
                repo,
                merge_time.to_rfc3339()
            );
        }
        found
    }

    /// Await the release run of a single repository.
    ///
    /// Source calls are bounded by the same deadline as the polling loop,
    /// so a request that never answers still ends in `timed_out`.
    pub async fn monitor_repository(
        &self,
        repo: &str,
        merge_time: DateTime<Utc>,
    ) -> RepositoryStatus {
        let deadline = Instant::now() + self.settings.max_wait;

        while Instant::now() < deadline {
            let found = match timeout_at(deadline, self.find_recent_run(repo, merge_time)).await {
                Ok(found) => found,
                Err(_) => break,
            };
            if let Some(run) = found {
                info!("🔍 Found {} release workflow: {}", repo, run.html_url);
                return self.monitor_existing_run(repo, &run, deadline).await;
            }
            sleep(self.settings.poll_interval).await;
        }

        warn!("⏰ Timed out waiting for a {} release workflow", repo);
        RepositoryStatus {
            outcome: RunOutcome::TimedOut,
            ..RepositoryStatus::pending(repo)
        }
    }

    /// Poll a known run until it completes or `deadline` passes.
    pub async fn monitor_existing_run(
        &self,
        repo: &str,
        run: &WorkflowRun,
        deadline: Instant,
    ) -> RepositoryStatus {
        let mut status = RepositoryStatus::tracking(repo, run);

        loop {
            match timeout_at(deadline, self.source.run(repo, run.id)).await {
                Ok(Ok(current)) => {
                    info!(
                        "{} status: {} [{}]",
                        repo,
                        current.status_label(),
                        current.html_url
                    );
                    if current.is_completed() {
                        status.outcome = if current.succeeded() {
                            RunOutcome::Success
                        } else {
                            RunOutcome::Failure
                        };
                        status.conclusion = current.conclusion;
                        return status;
                    }
                }
                Ok(Err(e)) => warn!("Error fetching {} run {}: {}", repo, run.id, e),
                Err(_) => warn!(
                    "Fetching {} run {} did not answer before the deadline",
                    repo, run.id
                ),
            }

            if Instant::now() >= deadline {
                warn!("⏰ Timed out waiting for {} run {} to complete", repo, run.id);
                status.outcome = RunOutcome::TimedOut;
                return status;
            }
            sleep(self.settings.poll_interval).await;
        }
    }

    /// Monitor every repository concurrently; results keep input order.
    pub async fn monitor_all(&self, repos: &[MergedRepo]) -> ReleaseResult<MonitorSummary> {
        let mut join_set = JoinSet::new();
        for (idx, merged) in repos.iter().cloned().enumerate() {
            let monitor = self.clone();
            join_set.spawn(async move {
                let status = monitor
                    .monitor_repository(&merged.repo, merged.merge_time)
                    .await;
                (idx, status)
            });
        }

        let mut ordered: Vec<Option<RepositoryStatus>> = vec![None; repos.len()];
        while let Some(joined) = join_set.join_next().await {
            let (idx, status) =
                joined.map_err(|e| ReleaseError::MonitorTask(format!("join error: {e}")))?;
            ordered[idx] = Some(status);
        }

        let results = repos
            .iter()
            .zip(ordered)
            .map(|(merged, slot)| {
                slot.ok_or_else(|| {
                    ReleaseError::MonitorTask(format!("missing result for {}", merged.repo))
                })
            })
            .collect::<ReleaseResult<Vec<_>>>()?;

        Ok(MonitorSummary::new(results))
    }
}
