//! Release dispatch: resolve changed charts to repositories and start the
//! release workflow in each one.

use actions_client::{ActionsError, DispatchRequest};
use async_trait::async_trait;
use tracing::info;

use crate::charts::ChartMap;
use crate::config::TriggerSettings;
use crate::error::{ReleaseError, ReleaseResult};

/// Backend that starts a workflow in a repository.
///
/// Implemented by [`crate::OrgActions`] for the real API, and by stubs in tests.
#[async_trait]
pub trait WorkflowDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        repo: &str,
        workflow_file: &str,
        request: &DispatchRequest,
    ) -> actions_client::Result<()>;
}

/// Charts found on disk and the repositories they resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerPlan {
    pub charts: Vec<String>,
    pub repos: Vec<String>,
}

/// Resolve `charts` through `map` and apply the optional target filter.
///
/// A target that matches nothing is an error rather than an empty plan.
pub fn plan_trigger(
    map: &ChartMap,
    charts: Vec<String>,
    target: Option<&str>,
) -> ReleaseResult<TriggerPlan> {
    let mut repos = map.resolve_repos(&charts);

    if let Some(target) = target.map(str::trim).filter(|t| !t.is_empty()) {
        repos = map.filter_for_target(&repos, Some(target));
        if repos.is_empty() {
            return Err(ReleaseError::TargetNotFound {
                target: target.to_string(),
            });
        }
    }

    Ok(TriggerPlan { charts, repos })
}

/// Dispatch the release workflow to every repo, in order.
///
/// Stops at the first rejected dispatch.
pub async fn trigger_releases(
    dispatcher: &dyn WorkflowDispatcher,
    settings: &TriggerSettings,
    repos: &[String],
) -> ReleaseResult<Vec<String>> {
    info!("🔗 Workflows to trigger: {}", repos.join(", "));

    let request = DispatchRequest::for_branch(&settings.branch);
    let mut triggered = Vec::with_capacity(repos.len());

    for repo in repos {
        info!("🚀 Dispatching workflow to {}", repo);
        dispatcher
            .dispatch(repo, &settings.workflow_file, &request)
            .await
            .map_err(|e| ReleaseError::DispatchFailed {
                repo: repo.clone(),
                detail: dispatch_detail(e),
            })?;

        info!("✅ Triggered workflow for {}", repo);
        triggered.push(repo.clone());
    }

    Ok(triggered)
}

/// Prefer the API's response body, which carries the platform's reason.
fn dispatch_detail(err: ActionsError) -> String {
    match err {
        ActionsError::Status { body, .. } if !body.is_empty() => body,
        other => other.to_string(),
    }
}
