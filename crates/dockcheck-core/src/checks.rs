//! Checks API abstraction.
//!
//! `ChecksApi` is the seam between the lifecycle manager and the hosting
//! platform. [`GitHubChecksClient`](crate::github::GitHubChecksClient) talks
//! to the real REST API; [`MemoryCheckApi`](crate::fakes::MemoryCheckApi)
//! records calls for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::check::{CheckHandle, CommitSha, Conclusion, RepoCoordinates};
use crate::domain::error::RemoteApiError;
use crate::report::CheckOutput;

/// Result type for Checks API calls.
pub type ApiResult<T> = std::result::Result<T, RemoteApiError>;

/// Parameters for opening a check run in `in_progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCheckRun {
    pub repo: RepoCoordinates,
    pub name: String,
    pub head_sha: CommitSha,
    pub started_at: DateTime<Utc>,
}

/// Parameters for moving a check run to `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckCompletion {
    pub conclusion: Conclusion,
    pub completed_at: DateTime<Utc>,
    pub output: CheckOutput,
}

/// Remote check run operations.
#[async_trait]
pub trait ChecksApi: Send + Sync {
    /// Create a check run with status `in_progress` and return its id.
    async fn create_check_run(&self, check: &NewCheckRun) -> ApiResult<CheckHandle>;

    /// Mark a check run `completed` with a conclusion and output.
    async fn complete_check_run(
        &self,
        repo: &RepoCoordinates,
        handle: CheckHandle,
        completion: &CheckCompletion,
    ) -> ApiResult<()>;
}
