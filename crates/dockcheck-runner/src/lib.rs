//! dockcheck runner - run a container and report it as a check run
//!
//! Provides:
//! - `ContainerSpec`: the `docker run --rm {options} {image} {command}` inputs
//! - `DockerRunner`: executes the container, capturing output and exit code
//! - `CheckPipeline`: opens the check, runs the container, closes the check

pub mod capture;
pub mod error;
pub mod fakes;
pub mod invocation;
pub mod pipeline;
pub mod runner;

// Re-export key types
pub use error::{CloseFailure, PipelineError};
pub use invocation::ContainerSpec;
pub use pipeline::{CheckPipeline, CheckRequest, RunOutcome};
pub use runner::{CommandRunner, DockerConfig, DockerRunner};
