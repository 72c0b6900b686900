//! dockcheck core library
//!
//! Domain types, report rendering and the check run lifecycle for running a
//! containerized command as a GitHub check:
//! - `domain`: check handles, conclusions, exec results, error taxonomy
//! - `checks` / `github`: Checks API seam and its REST client
//! - `lifecycle`: open a check in `in_progress`, close it with a report
//! - `fakes`: in-memory Checks API for tests

pub mod checks;
pub mod domain;
pub mod fakes;
pub mod git;
pub mod github;
pub mod lifecycle;
pub mod report;
pub mod telemetry;
pub mod workflow;

pub use checks::{ApiResult, CheckCompletion, ChecksApi, NewCheckRun};
pub use domain::{
    CheckHandle, CheckStatus, CommitSha, Conclusion, ConfigError, ExecResult, GitError,
    LaunchError, RemoteApiError, RepoCoordinates,
};
pub use git::capture_head_sha;
pub use github::{GitHubChecksClient, DEFAULT_API_URL};
pub use lifecycle::CheckLifecycle;
pub use report::{CheckOutput, CheckReport};
pub use telemetry::{init_tracing, TracingConfig};
