//! Pipeline failure taxonomy.

use dockcheck_core::{CheckHandle, LaunchError, RemoteApiError};

/// A failed attempt to close a check run, and the outcome of the neutral
/// re-close attempted afterwards.
#[derive(Debug, thiserror::Error)]
#[error("{source}{}", compensation_suffix(.compensation))]
pub struct CloseFailure {
    #[source]
    pub source: RemoteApiError,

    /// `Some` when marking the check neutral failed as well.
    pub compensation: Option<RemoteApiError>,
}

fn compensation_suffix(compensation: &Option<RemoteApiError>) -> String {
    match compensation {
        Some(err) => format!(" (marking the check neutral also failed: {err})"),
        None => String::new(),
    }
}

/// Why a run did not produce a reported result.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The check run could not be created; nothing else was attempted.
    #[error("failed to create check run: {0}")]
    Open(#[source] RemoteApiError),

    /// The container runtime could not be invoked. The check was closed as
    /// `failure` unless `close` says otherwise.
    #[error("failed to launch container: {source}{}", launch_close_suffix(.close))]
    Launch {
        #[source]
        source: LaunchError,
        close: Option<CloseFailure>,
    },

    /// The command ran but its result could not be recorded on the check.
    #[error("failed to update check run {check}: {failure}")]
    Close {
        check: CheckHandle,
        #[source]
        failure: CloseFailure,
    },
}

fn launch_close_suffix(close: &Option<CloseFailure>) -> String {
    match close {
        Some(failure) => format!("; updating the check also failed: {failure}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(msg: &str) -> RemoteApiError {
        RemoteApiError::Transport(msg.to_string())
    }

    #[test]
    fn close_failure_without_compensation_error() {
        let failure = CloseFailure {
            source: transport("connection reset"),
            compensation: None,
        };
        assert_eq!(
            failure.to_string(),
            "request to GitHub API failed: connection reset"
        );
    }

    #[test]
    fn close_failure_reports_compensation_error() {
        let failure = CloseFailure {
            source: transport("connection reset"),
            compensation: Some(transport("timed out")),
        };
        assert!(failure
            .to_string()
            .ends_with("(marking the check neutral also failed: request to GitHub API failed: timed out)"));
    }

    #[test]
    fn close_error_names_check() {
        let err = PipelineError::Close {
            check: CheckHandle(12),
            failure: CloseFailure {
                source: transport("reset"),
                compensation: None,
            },
        };
        assert_eq!(
            err.to_string(),
            "failed to update check run 12: request to GitHub API failed: reset"
        );
    }
}
