//! [`WorkflowDispatcher`] and [`WorkflowRunSource`] over the real API.

use actions_client::{ActionsClient, DispatchRequest, ListRunsQuery, WorkflowRun};
use async_trait::async_trait;

use crate::monitor::WorkflowRunSource;
use crate::trigger::WorkflowDispatcher;

/// An [`ActionsClient`] scoped to one organization.
#[derive(Clone)]
pub struct OrgActions {
    client: ActionsClient,
    owner: String,
}

impl OrgActions {
    pub fn new(client: ActionsClient, owner: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
        }
    }
}

#[async_trait]
impl WorkflowDispatcher for OrgActions {
    async fn dispatch(
        &self,
        repo: &str,
        workflow_file: &str,
        request: &DispatchRequest,
    ) -> actions_client::Result<()> {
        self.client
            .dispatch_workflow(&self.owner, repo, workflow_file, request)
            .await
    }
}

#[async_trait]
impl WorkflowRunSource for OrgActions {
    async fn recent_runs(
        &self,
        repo: &str,
        query: &ListRunsQuery,
    ) -> actions_client::Result<Vec<WorkflowRun>> {
        let page = self
            .client
            .list_workflow_runs(&self.owner, repo, query)
            .await?;
        Ok(page.workflow_runs)
    }

    async fn run(&self, repo: &str, run_id: u64) -> actions_client::Result<WorkflowRun> {
        self.client
            .get_workflow_run(&self.owner, repo, run_id)
            .await
    }
}
