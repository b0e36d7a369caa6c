//! Release Core
//!
//! Two jobs of the release pipeline:
//!
//! - **trigger**: turn the changed service charts into the set of
//!   repositories that own them and dispatch their release workflow
//!   ([`charts`], [`trigger`]).
//! - **monitor**: wait for the staging release runs started by merged
//!   repositories and report pass/fail ([`merged`], [`monitor`], [`summary`]).
//!
//! API access goes through the [`WorkflowDispatcher`] and
//! [`WorkflowRunSource`] traits; [`OrgActions`] implements both on top of
//! `actions-client`.

pub mod actions;
pub mod charts;
pub mod config;
pub mod error;
pub mod merged;
pub mod monitor;
pub mod summary;
pub mod telemetry;
pub mod trigger;

pub use actions::OrgActions;
pub use charts::{discover_charts, services_dir, ChartMap};
pub use config::{
    MonitorSettings, TriggerSettings, MAX_WAIT, MONITOR_ORG, MONITOR_WORKFLOW_PATH,
    POLL_INTERVAL, TRIGGER_ORG, TRIGGER_WORKFLOW_FILE,
};
pub use error::{ReleaseError, ReleaseResult};
pub use merged::{load_merged_repos, merged_repos_path, parse_merged_repos, MergedRepo};
pub use monitor::{select_run, ReleaseMonitor, RepositoryStatus, RunOutcome, WorkflowRunSource};
pub use summary::MonitorSummary;
pub use telemetry::init_tracing;
pub use trigger::{plan_trigger, trigger_releases, TriggerPlan, WorkflowDispatcher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
