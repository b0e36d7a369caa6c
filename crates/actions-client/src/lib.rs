//! Actions-Client: workflow dispatch and workflow run API access
//!
//! This crate is the HTTP layer of chart-release. It knows how to
//! start a workflow on a branch and how to read back the runs a
//! repository has produced; deciding *which* repositories to touch and
//! how long to wait lives in `release-core`.

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::ActionsClient;
pub use config::{ActionsConfig, ACCEPT_HEADER, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT};
pub use error::ActionsError;
pub use model::{DispatchRequest, ListRunsQuery, RunStatus, WorkflowRun, WorkflowRunsPage};

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, ActionsError>;
