//! Error types for release dispatch and monitoring.

use std::path::PathBuf;

use actions_client::ActionsError;
use thiserror::Error;

/// Errors produced by the release layer.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The chart services directory could not be listed.
    #[error("cannot read charts directory {path:?}: {source}")]
    ChartsDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A target was requested but matches neither a resolved repo nor a chart.
    #[error("Target repository '{target}' not found or does not have a matching workflow")]
    TargetNotFound { target: String },

    /// The dispatch call for a repo was rejected.
    #[error("Failed to trigger workflow for {repo}: {detail}")]
    DispatchFailed { repo: String, detail: String },

    /// One or more monitored repos did not finish successfully.
    #[error("{failed} release workflows failed")]
    ReleasesFailed { failed: usize },

    /// A monitoring task panicked or was cancelled.
    #[error("monitor task error: {0}")]
    MonitorTask(String),

    /// Bubbled-up API error.
    #[error(transparent)]
    Actions(#[from] ActionsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias.
pub type ReleaseResult<T> = std::result::Result<T, ReleaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_not_found_names_target() {
        let err = ReleaseError::TargetNotFound {
            target: "billing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Target repository 'billing' not found or does not have a matching workflow"
        );
    }

    #[test]
    fn test_dispatch_failed_displays_repo_and_detail() {
        let err = ReleaseError::DispatchFailed {
            repo: "graphql_api".to_string(),
            detail: "Not Found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("graphql_api"));
        assert!(msg.contains("Not Found"));
    }

    #[test]
    fn test_releases_failed_counts() {
        let err = ReleaseError::ReleasesFailed { failed: 2 };
        assert_eq!(err.to_string(), "2 release workflows failed");
    }
}
