//! Captured result of one container invocation.

use serde::{Deserialize, Serialize};

use crate::domain::check::Conclusion;

/// Output and exit code of a finished command.
///
/// A non-zero `exit_code` is an ordinary value, not a failure of the
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
    /// Captured stdout.
    pub stdout: String,

    /// Captured stderr.
    pub stderr: String,

    /// Exit code (0 = success, -1 when the process was killed by a signal).
    pub exit_code: i32,
}

impl ExecResult {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Whether the command exited with code 0.
    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }

    pub fn conclusion(&self) -> Conclusion {
        Conclusion::from_exit_code(self.exit_code)
    }
}
