//! Chart directory → dispatch requests, end to end with a stub backend.

use std::path::Path;
use std::sync::Mutex;

use actions_client::DispatchRequest;
use async_trait::async_trait;
use release_core::{
    discover_charts, plan_trigger, services_dir, trigger_releases, ChartMap, ReleaseError,
    TriggerSettings, WorkflowDispatcher,
};
use tempfile::TempDir;

#[derive(Default)]
struct StubDispatcher {
    calls: Mutex<Vec<(String, String, DispatchRequest)>>,
}

#[async_trait]
impl WorkflowDispatcher for StubDispatcher {
    async fn dispatch(
        &self,
        repo: &str,
        workflow_file: &str,
        request: &DispatchRequest,
    ) -> actions_client::Result<()> {
        self.calls.lock().unwrap().push((
            repo.to_string(),
            workflow_file.to_string(),
            request.clone(),
        ));
        Ok(())
    }
}

fn checkout_with_charts(charts: &[&str]) -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let services = services_dir(root.path());
    for chart in charts {
        std::fs::create_dir_all(services.join(chart)).unwrap();
        std::fs::write(services.join(chart).join("Chart.yaml"), b"apiVersion: v2\n").unwrap();
    }
    std::fs::write(services.join("values-common.yaml"), b"replicas: 1\n").unwrap();
    root
}

fn plan_for(root: &Path, target: Option<&str>) -> Result<Vec<String>, ReleaseError> {
    let charts = discover_charts(root)?;
    Ok(plan_trigger(&ChartMap::default(), charts, target)?.repos)
}

#[tokio::test]
async fn every_mapped_chart_dispatches_once() {
    let root = checkout_with_charts(&["occasio", "ask-occasio", "graphql", "redis", "fdw"]);
    let repos = plan_for(root.path(), None).unwrap();
    // Sorted chart order: ask-occasio, fdw, graphql, occasio, redis.
    assert_eq!(repos, vec!["occasio-apps", "fdw", "graphql_api"]);

    let dispatcher = StubDispatcher::default();
    let settings = TriggerSettings::new("release/2026-10");
    let triggered = trigger_releases(&dispatcher, &settings, &repos).await.unwrap();
    assert_eq!(triggered, repos);

    let calls = dispatcher.calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    for (_, workflow, request) in calls.iter() {
        assert_eq!(workflow, "rc-next-release.yaml");
        assert_eq!(request.git_ref, "release/2026-10");
        assert_eq!(
            request.inputs.get("branch").map(String::as_str),
            Some("release/2026-10")
        );
    }
}

#[tokio::test]
async fn chart_name_target_dispatches_only_its_repo() {
    let root = checkout_with_charts(&["graphql", "reports"]);
    let settings = TriggerSettings::new("main").with_target(Some("graphql"));
    let repos = plan_for(root.path(), settings.target.as_deref()).unwrap();
    assert_eq!(repos, vec!["graphql_api"]);

    let dispatcher = StubDispatcher::default();
    trigger_releases(&dispatcher, &settings, &repos).await.unwrap();
    let calls = dispatcher.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "graphql_api");
}

#[test]
fn target_outside_changed_charts_is_rejected() {
    let root = checkout_with_charts(&["fdw"]);
    let err = plan_for(root.path(), Some("reports")).unwrap_err();
    assert!(matches!(err, ReleaseError::TargetNotFound { .. }));
}

#[test]
fn checkout_without_charts_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let err = plan_for(root.path(), None).unwrap_err();
    assert!(matches!(err, ReleaseError::ChartsDir { .. }));
}
