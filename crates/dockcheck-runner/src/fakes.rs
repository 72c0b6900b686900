//! Scripted command runner (testing only)

use std::sync::Mutex;

use async_trait::async_trait;
use dockcheck_core::{ExecResult, LaunchError};

use crate::invocation::ContainerSpec;
use crate::runner::CommandRunner;

#[derive(Debug, Clone)]
enum Script {
    Exit(ExecResult),
    LaunchFailure(String),
}

/// Returns a fixed result for every run and records the specs it was given.
#[derive(Debug)]
pub struct ScriptedRunner {
    script: Script,
    invocations: Mutex<Vec<ContainerSpec>>,
}

impl ScriptedRunner {
    /// Every run exits with `result`.
    pub fn exiting(result: ExecResult) -> Self {
        Self {
            script: Script::Exit(result),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Every run fails to spawn the runtime with `message`.
    pub fn failing_launch(message: &str) -> Self {
        Self {
            script: Script::LaunchFailure(message.to_string()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn invocations(&self) -> Vec<ContainerSpec> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &ContainerSpec) -> Result<ExecResult, LaunchError> {
        self.invocations.lock().unwrap().push(spec.clone());
        match &self.script {
            Script::Exit(result) => Ok(result.clone()),
            Script::LaunchFailure(message) => Err(LaunchError::Spawn {
                program: "docker".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, message.clone()),
            }),
        }
    }
}
