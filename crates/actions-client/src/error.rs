//! Error types for actions-client

use thiserror::Error;

/// Errors that can occur while talking to the workflow API
#[derive(Error, Debug)]
pub enum ActionsError {
    /// No API token was supplied
    #[error("API token is not configured")]
    MissingToken,

    /// The client could not be configured
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The API answered with a non-success status
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ActionsError {
    fn from(err: reqwest::Error) -> Self {
        ActionsError::Http(err.to_string())
    }
}

impl ActionsError {
    /// Response body of a rejected request, if any.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            ActionsError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_displays_url_and_body() {
        let err = ActionsError::Status {
            method: "POST",
            url: "https://api.github.com/repos/org/fdw/actions/workflows/x.yaml/dispatches"
                .to_string(),
            status: 422,
            body: "Workflow does not have 'workflow_dispatch' trigger".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("POST"));
        assert!(msg.contains("422"));
        assert!(msg.contains("workflow_dispatch"));
        assert_eq!(
            err.response_body(),
            Some("Workflow does not have 'workflow_dispatch' trigger")
        );
    }

    #[test]
    fn test_http_error_has_no_body() {
        let err = ActionsError::Http("connection refused".to_string());
        assert!(err.response_body().is_none());
    }
}
