//! Git integration for resolving the commit a check is attached to.

use std::path::Path;
use std::process::Command;

use crate::domain::check::CommitSha;
use crate::domain::error::GitError;

/// Capture the full HEAD commit SHA of the checkout at `repo_dir`.
///
/// Runs `git rev-parse HEAD`. Fails if git is missing, the directory is not
/// inside a work tree, or the output is not a full SHA.
pub fn capture_head_sha(repo_dir: &Path) -> Result<CommitSha, GitError> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(repo_dir)
        .output()
        .map_err(GitError::Spawn)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::RevParse(stderr.trim().to_string()));
    }

    let sha = String::from_utf8_lossy(&output.stdout);
    Ok(CommitSha::parse(sha.trim())?)
}
