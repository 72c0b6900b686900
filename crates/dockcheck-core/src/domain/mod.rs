//! Domain model: check runs, command results and the error taxonomy.

pub mod check;
pub mod error;
pub mod exec;

pub use check::{CheckHandle, CheckStatus, CommitSha, Conclusion, RepoCoordinates};
pub use error::{ConfigError, GitError, LaunchError, RemoteApiError};
pub use exec::ExecResult;
