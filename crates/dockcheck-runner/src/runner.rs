//! Command runner trait and the docker CLI implementation.

use async_trait::async_trait;
use dockcheck_core::{ExecResult, LaunchError};
use tracing::info;

use crate::capture::run_captured;
use crate::invocation::ContainerSpec;

/// Runs one containerized command to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute `spec` and return its captured result. Only a failure to
    /// invoke the runtime is an error; non-zero exits are results.
    async fn run(&self, spec: &ContainerSpec) -> Result<ExecResult, LaunchError>;
}

/// Configuration for the docker CLI runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerConfig {
    /// Path or name of the runtime binary.
    pub binary_path: String,

    /// Echo container output to the step log while capturing it.
    pub echo_output: bool,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            binary_path: "docker".to_string(),
            echo_output: true,
        }
    }
}

impl DockerConfig {
    /// Use a different runtime binary (e.g. `podman`).
    pub fn with_binary(mut self, binary_path: &str) -> Self {
        self.binary_path = binary_path.to_string();
        self
    }

    pub fn quiet(mut self) -> Self {
        self.echo_output = false;
        self
    }
}

/// Runs `docker run --rm {options} {image} {command}`.
#[derive(Debug, Clone, Default)]
pub struct DockerRunner {
    config: DockerConfig,
}

impl DockerRunner {
    pub fn new(config: DockerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CommandRunner for DockerRunner {
    async fn run(&self, spec: &ContainerSpec) -> Result<ExecResult, LaunchError> {
        let args = spec.run_args()?;
        info!(invocation = %spec, "Running container");

        let result = run_captured(&self.config.binary_path, &args, self.config.echo_output).await?;

        info!(
            exit_code = result.exit_code,
            stdout_bytes = result.stdout.len(),
            stderr_bytes = result.stderr.len(),
            "Container finished"
        );
        Ok(result)
    }
}
