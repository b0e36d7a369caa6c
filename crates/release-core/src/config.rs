//! Fixed release configuration and per-command settings.

use std::time::Duration;

/// Organization that owns the downstream service repositories.
pub const TRIGGER_ORG: &str = "occasio-technology-solutions";

/// Workflow file dispatched in each downstream repository.
pub const TRIGGER_WORKFLOW_FILE: &str = "rc-next-release.yaml";

/// Organization whose staging releases are monitored.
pub const MONITOR_ORG: &str = "Alaffia-Technology-Solutions";

/// Path of the workflow whose runs are awaited.
pub const MONITOR_WORKFLOW_PATH: &str = ".github/workflows/staging-release.yaml";

/// Delay between two polls of the same repository.
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Upper bound on how long a single repository is awaited.
pub const MAX_WAIT: Duration = Duration::from_secs(60 * 60);

/// Event that produces the monitored runs.
pub const RUN_EVENT: &str = "push";

/// Number of recent runs inspected per poll.
pub const RECENT_RUNS_PER_PAGE: u32 = 5;

/// Settings for one `trigger` invocation.
#[derive(Debug, Clone)]
pub struct TriggerSettings {
    pub owner: String,
    pub workflow_file: String,
    /// Branch the workflow runs on; also passed as the `branch` input.
    pub branch: String,
    /// Restrict dispatch to a single repo (or chart name).
    pub target: Option<String>,
}

impl TriggerSettings {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            owner: TRIGGER_ORG.to_string(),
            workflow_file: TRIGGER_WORKFLOW_FILE.to_string(),
            branch: branch.into(),
            target: None,
        }
    }

    /// Set the target filter. Empty or blank values mean "no target".
    pub fn with_target(mut self, target: Option<&str>) -> Self {
        self.target = target
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }
}

/// Settings for one `monitor` invocation.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub owner: String,
    pub workflow_path: String,
    pub event: String,
    pub per_page: u32,
    pub poll_interval: Duration,
    pub max_wait: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            owner: MONITOR_ORG.to_string(),
            workflow_path: MONITOR_WORKFLOW_PATH.to_string(),
            event: RUN_EVENT.to_string(),
            per_page: RECENT_RUNS_PER_PAGE,
            poll_interval: POLL_INTERVAL,
            max_wait: MAX_WAIT,
        }
    }
}
