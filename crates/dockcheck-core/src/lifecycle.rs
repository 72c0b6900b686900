//! Check run lifecycle: open in `in_progress`, close with a conclusion.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::checks::{ApiResult, CheckCompletion, ChecksApi, NewCheckRun};
use crate::domain::check::{CheckHandle, CommitSha, Conclusion, RepoCoordinates};
use crate::domain::error::{LaunchError, RemoteApiError};
use crate::domain::exec::ExecResult;
use crate::report::{CheckOutput, CheckReport};

/// Opens and closes the single check run owned by one invocation.
pub struct CheckLifecycle {
    api: Arc<dyn ChecksApi>,
    repo: RepoCoordinates,
}

impl CheckLifecycle {
    pub fn new(api: Arc<dyn ChecksApi>, repo: RepoCoordinates) -> Self {
        Self { api, repo }
    }

    /// Create the check run in `in_progress` against `head_sha`.
    pub async fn open(&self, head_sha: &CommitSha, name: &str) -> ApiResult<CheckHandle> {
        let check = NewCheckRun {
            repo: self.repo.clone(),
            name: name.to_string(),
            head_sha: head_sha.clone(),
            started_at: Utc::now(),
        };
        let handle = self.api.create_check_run(&check).await?;
        info!(check_id = %handle, repo = %self.repo, sha = %head_sha.short(), "Opened check run");
        Ok(handle)
    }

    /// Complete the check run with an explicit conclusion and output.
    pub async fn close(
        &self,
        handle: CheckHandle,
        conclusion: Conclusion,
        output: CheckOutput,
    ) -> ApiResult<()> {
        debug!(check_id = %handle, conclusion = %conclusion, "Updating check run");
        let completion = CheckCompletion {
            conclusion,
            completed_at: Utc::now(),
            output,
        };
        self.api
            .complete_check_run(&self.repo, handle, &completion)
            .await?;
        info!(check_id = %handle, conclusion = %conclusion, "Closed check run");
        Ok(())
    }

    /// Close with the conclusion and report derived from a command result.
    pub async fn close_with_result(&self, handle: CheckHandle, result: &ExecResult) -> ApiResult<()> {
        self.close(handle, result.conclusion(), CheckReport::for_result(result))
            .await
    }

    /// Close as `failure` because the container runtime never started.
    pub async fn close_with_launch_error(
        &self,
        handle: CheckHandle,
        err: &LaunchError,
    ) -> ApiResult<()> {
        self.close(handle, Conclusion::Failure, CheckReport::launch_failure(err))
            .await
    }

    /// Best-effort compensation after a failed close: mark the check
    /// `neutral` with a diagnostic so it does not stay `in_progress`.
    pub async fn mark_neutral(&self, handle: CheckHandle, cause: &RemoteApiError) -> ApiResult<()> {
        self.close(handle, Conclusion::Neutral, CheckReport::close_failure(cause))
            .await
    }
}
