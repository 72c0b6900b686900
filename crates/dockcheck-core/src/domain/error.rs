//! Error taxonomy for dockcheck.
//!
//! A non-zero command exit code is not an error: it travels as data inside
//! [`ExecResult`](crate::domain::exec::ExecResult).

/// The Checks API rejected a request or could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteApiError {
    #[error("GitHub API authentication failed: {message}")]
    Unauthorized { message: String },

    #[error("GitHub API rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("GitHub API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request to GitHub API failed: {0}")]
    Transport(String),

    #[error("unexpected GitHub API response: {0}")]
    Decode(String),
}

impl RemoteApiError {
    /// HTTP status code, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteApiError::Unauthorized { .. } => Some(401),
            RemoteApiError::Status { status, .. } => Some(*status),
            RemoteApiError::RateLimited { .. }
            | RemoteApiError::Transport(_)
            | RemoteApiError::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for RemoteApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteApiError::Decode(err.to_string())
        } else {
            RemoteApiError::Transport(err.to_string())
        }
    }
}

/// The container runtime could not be invoked.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("invalid container {field}: {message}")]
    InvalidArguments {
        field: &'static str,
        message: String,
    },

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to collect output from {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Malformed user-supplied coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid repository {0:?}: expected \"owner/repo\"")]
    InvalidRepository(String),

    #[error("invalid commit SHA {0:?}: expected 40 hex characters")]
    InvalidCommitSha(String),

    #[error("input {0:?} is required and must not be empty")]
    MissingInput(&'static str),
}

/// Failure resolving the commit of the current checkout.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("failed to run git: {0}")]
    Spawn(std::io::Error),

    #[error("git rev-parse HEAD failed: {0}")]
    RevParse(String),

    #[error(transparent)]
    InvalidSha(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_status_codes() {
        let unauthorized = RemoteApiError::Unauthorized {
            message: "Bad credentials".to_string(),
        };
        assert_eq!(unauthorized.status(), Some(401));

        let rejected = RemoteApiError::Status {
            status: 422,
            message: "No commit found for SHA".to_string(),
        };
        assert_eq!(rejected.status(), Some(422));

        assert_eq!(RemoteApiError::Transport("reset".into()).status(), None);
    }

    #[test]
    fn remote_error_messages_are_short() {
        let err = RemoteApiError::RateLimited {
            retry_after_secs: 30,
        };
        assert_eq!(
            err.to_string(),
            "GitHub API rate limit exceeded, retry after 30s"
        );
    }

    #[test]
    fn launch_error_names_program() {
        let err = LaunchError::Spawn {
            program: "docker".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("failed to launch docker"));
    }
}
