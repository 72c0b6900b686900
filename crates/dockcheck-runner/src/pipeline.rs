//! Check run orchestration: open → run → close.

use std::sync::Arc;

use dockcheck_core::{
    CheckHandle, CheckLifecycle, CheckOutput, CheckReport, CommitSha, Conclusion, ExecResult,
    RemoteApiError,
};
use tracing::{debug, error, info, warn};

use crate::error::{CloseFailure, PipelineError};
use crate::invocation::ContainerSpec;
use crate::runner::CommandRunner;

/// Everything one invocation needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    /// Check run display name.
    pub name: String,

    /// Commit the check is attached to.
    pub head_sha: CommitSha,

    /// Container to run.
    pub container: ContainerSpec,
}

/// Outcome of a run whose result was recorded on the check.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub check: CheckHandle,
    pub conclusion: Conclusion,
    pub result: ExecResult,
}

impl RunOutcome {
    /// Whether the command exited with code 0.
    pub fn passed(&self) -> bool {
        self.result.passed()
    }

    /// Short message for the step's failure signal, `None` on success.
    /// Never includes command output; that goes to the check report only.
    pub fn failure_message(&self) -> Option<String> {
        (!self.passed()).then(|| format!("Command failed with exit code {}", self.result.exit_code))
    }
}

/// Sequences the check lifecycle around one command run.
pub struct CheckPipeline {
    lifecycle: CheckLifecycle,
    runner: Arc<dyn CommandRunner>,
}

impl CheckPipeline {
    pub fn new(lifecycle: CheckLifecycle, runner: Arc<dyn CommandRunner>) -> Self {
        Self { lifecycle, runner }
    }

    /// Open the check, run the container and close the check with the result.
    ///
    /// - open fails: returned immediately, nothing runs and nothing is closed
    /// - launch fails: check closed as `failure` with the launch error
    /// - close fails: check re-closed as `neutral` with a diagnostic, and
    ///   the close error returned
    pub async fn run(&self, request: &CheckRequest) -> Result<RunOutcome, PipelineError> {
        let check = self
            .lifecycle
            .open(&request.head_sha, &request.name)
            .await
            .map_err(PipelineError::Open)?;
        debug!(check_id = %check, "Check ID");

        let result = match self.runner.run(&request.container).await {
            Ok(result) => result,
            Err(source) => {
                error!(check_id = %check, error = %source, "Container launch failed");
                let output = CheckReport::launch_failure(&source);
                let close = self
                    .close_or_compensate(check, Conclusion::Failure, output)
                    .await
                    .err();
                return Err(PipelineError::Launch { source, close });
            }
        };

        let conclusion = Conclusion::from_exit_code(result.exit_code);
        info!(check_id = %check, exit_code = result.exit_code, conclusion = %conclusion, "Command completed");

        let output = CheckReport::for_result(&result);
        self.close_or_compensate(check, conclusion, output)
            .await
            .map_err(|failure| PipelineError::Close { check, failure })?;

        Ok(RunOutcome {
            check,
            conclusion,
            result,
        })
    }

    /// Close the check; on failure attempt one neutral re-close and report
    /// both outcomes.
    async fn close_or_compensate(
        &self,
        check: CheckHandle,
        conclusion: Conclusion,
        output: CheckOutput,
    ) -> Result<(), CloseFailure> {
        let source = match self.lifecycle.close(check, conclusion, output).await {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };

        warn!(check_id = %check, error = %source, "Updating check failed, marking it neutral");
        let compensation = self.mark_neutral(check, &source).await.err();
        Err(CloseFailure {
            source,
            compensation,
        })
    }

    async fn mark_neutral(&self, check: CheckHandle, cause: &RemoteApiError) -> Result<(), RemoteApiError> {
        self.lifecycle.mark_neutral(check, cause).await.map_err(|err| {
            warn!(check_id = %check, error = %err, "Marking check neutral failed");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(exit_code: i32) -> RunOutcome {
        RunOutcome {
            check: CheckHandle(1),
            conclusion: Conclusion::from_exit_code(exit_code),
            result: ExecResult::new("stdout text", "stderr text", exit_code),
        }
    }

    #[test]
    fn passing_outcome_has_no_failure_message() {
        assert!(outcome(0).passed());
        assert_eq!(outcome(0).failure_message(), None);
    }

    #[test]
    fn failing_outcome_message_excludes_output() {
        let message = outcome(3).failure_message().unwrap();
        assert_eq!(message, "Command failed with exit code 3");
        assert!(!message.contains("stdout text"));
    }
}
