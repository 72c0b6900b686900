//! Check run identity, status and conclusion types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::error::ConfigError;

/// Opaque identifier of a check run, as returned by the creation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckHandle(pub u64);

impl std::fmt::Display for CheckHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    InProgress,
    Completed,
}

/// Terminal outcome of a check run.
///
/// Only `Success`, `Failure` and `Neutral` are produced by dockcheck; the
/// rest are accepted by the API and kept for completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    ActionRequired,
    Cancelled,
    Failure,
    Neutral,
    Success,
    Skipped,
    Stale,
    TimedOut,
}

impl Conclusion {
    /// Map a command exit code to a conclusion.
    ///
    /// `Neutral` is never derived from a command; it is reserved for the
    /// case where reporting the result itself failed.
    pub fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            Conclusion::Success
        } else {
            Conclusion::Failure
        }
    }

    /// Wire name of the conclusion.
    pub fn as_str(&self) -> &'static str {
        match self {
            Conclusion::ActionRequired => "action_required",
            Conclusion::Cancelled => "cancelled",
            Conclusion::Failure => "failure",
            Conclusion::Neutral => "neutral",
            Conclusion::Success => "success",
            Conclusion::Skipped => "skipped",
            Conclusion::Stale => "stale",
            Conclusion::TimedOut => "timed_out",
        }
    }
}

impl std::fmt::Display for Conclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `owner/repo` pair addressing a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoCoordinates {
    pub owner: String,
    pub repo: String,
}

impl RepoCoordinates {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl FromStr for RepoCoordinates {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRepository(s.to_string());
        let (owner, repo) = s.trim().split_once('/').ok_or_else(invalid)?;
        let valid = |part: &str| {
            !part.is_empty() && !part.contains('/') && !part.chars().any(char::is_whitespace)
        };
        if !valid(owner) || !valid(repo) {
            return Err(invalid());
        }
        Ok(Self::new(owner, repo))
    }
}

impl std::fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Full 40-character commit SHA, normalised to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitSha(String);

impl CommitSha {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let trimmed = s.trim();
        if trimmed.len() != 40 || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidCommitSha(s.to_string()));
        }
        Ok(CommitSha(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form (first 7 hex chars).
    pub fn short(&self) -> &str {
        &self.0[..7]
    }
}

impl TryFrom<String> for CommitSha {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        CommitSha::parse(&s)
    }
}

impl From<CommitSha> for String {
    fn from(sha: CommitSha) -> Self {
        sha.0
    }
}

impl std::fmt::Display for CommitSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA: &str = "4e1243bd22c66e76c2ba9eddc1f91394e57f9f83";

    #[test]
    fn zero_exit_code_is_success() {
        assert_eq!(Conclusion::from_exit_code(0), Conclusion::Success);
    }

    #[test]
    fn any_non_zero_exit_code_is_failure() {
        for code in [1, 2, 3, 125, 127, 137, 255, -1, i32::MIN, i32::MAX] {
            assert_eq!(
                Conclusion::from_exit_code(code),
                Conclusion::Failure,
                "exit code {code}"
            );
        }
    }

    #[test]
    fn conclusion_wire_names() {
        let json = serde_json::to_string(&Conclusion::TimedOut).unwrap();
        assert_eq!(json, "\"timed_out\"");
        assert_eq!(Conclusion::ActionRequired.as_str(), "action_required");
        assert_eq!(Conclusion::Neutral.to_string(), "neutral");
    }

    #[test]
    fn check_status_serializes_snake_case() {
        let json = serde_json::to_string(&CheckStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn repo_coordinates_parse() {
        let repo: RepoCoordinates = "octo-org/hello-world".parse().unwrap();
        assert_eq!(repo.owner, "octo-org");
        assert_eq!(repo.repo, "hello-world");
        assert_eq!(repo.to_string(), "octo-org/hello-world");
    }

    #[test]
    fn repo_coordinates_reject_malformed() {
        for bad in ["", "octo", "/repo", "owner/", "a/b/c", "own er/repo"] {
            assert!(
                bad.parse::<RepoCoordinates>().is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn commit_sha_normalises_case() {
        let sha = CommitSha::parse(&SHA.to_uppercase()).unwrap();
        assert_eq!(sha.as_str(), SHA);
        assert_eq!(sha.short(), "4e1243b");
    }

    #[test]
    fn commit_sha_rejects_short_or_non_hex() {
        assert!(CommitSha::parse("4e1243b").is_err());
        assert!(CommitSha::parse(&"z".repeat(40)).is_err());
    }

    #[test]
    fn commit_sha_deserialize_validates() {
        let ok: Result<CommitSha, _> = serde_json::from_str(&format!("\"{SHA}\""));
        assert!(ok.is_ok());
        let bad: Result<CommitSha, _> = serde_json::from_str("\"main\"");
        assert!(bad.is_err());
    }
}
