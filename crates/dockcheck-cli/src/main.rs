//! dockcheck - run a containerized command as a GitHub check run
//!
//! Opens a check run on the current commit, runs
//! `docker run --rm {options} {image} {command}`, then completes the check
//! with `success` or `failure` and the captured output.
//!
//! Inputs come from flags or the GitHub Actions `INPUT_*` variables, so the
//! binary can be used directly as an action entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dockcheck_core::{
    capture_head_sha, init_tracing, workflow, CheckLifecycle, CommitSha, ConfigError,
    GitHubChecksClient, RepoCoordinates, TracingConfig, DEFAULT_API_URL,
};
use dockcheck_runner::{
    CheckPipeline, CheckRequest, ContainerSpec, DockerConfig, DockerRunner, RunOutcome,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "dockcheck")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Run a containerized command and report it as a GitHub check run",
    long_about = None
)]
struct Cli {
    /// Token used to call the Checks API
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: String,

    /// Check run display name
    #[arg(long, env = "INPUT_NAME")]
    name: String,

    /// Image to run
    #[arg(long, env = "INPUT_IMAGE")]
    image: String,

    /// Command run inside the container (shell quoting applies)
    #[arg(long, env = "INPUT_COMMAND", default_value = "", allow_hyphen_values = true)]
    command: String,

    /// Extra `docker run` options (shell quoting applies)
    #[arg(long, env = "INPUT_OPTIONS", default_value = "", allow_hyphen_values = true)]
    options: String,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Commit SHA to attach the check to (default: HEAD of --workdir)
    #[arg(long)]
    sha: Option<String>,

    /// Checks API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Container runtime binary
    #[arg(long, env = "DOCKER_BINARY", default_value = "docker")]
    docker: String,

    /// Checkout used to resolve the commit SHA
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    workdir: PathBuf,

    /// Do not echo container output to the log
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(TracingConfig::from_env(cli.json, cli.verbose));

    let (pipeline, request) = match setup(&cli) {
        Ok(setup) => setup,
        Err(err) => return fail(&format!("{err:#}")),
    };

    match pipeline.run(&request).await {
        Ok(outcome) => report(&outcome),
        Err(err) => fail(&err.to_string()),
    }
}

/// Resolve inputs and wire the pipeline's collaborators.
fn setup(cli: &Cli) -> Result<(CheckPipeline, CheckRequest)> {
    let repo: RepoCoordinates = cli.repository.parse()?;
    let request = build_request(cli)?;

    let token = required("token", &cli.token)?;
    let client = GitHubChecksClient::new(&cli.api_url, token)
        .context("Failed to build GitHub API client")?;
    let lifecycle = CheckLifecycle::new(Arc::new(client), repo);

    let mut config = DockerConfig::default().with_binary(&cli.docker);
    if cli.quiet {
        config = config.quiet();
    }
    let runner = Arc::new(DockerRunner::new(config));

    Ok((CheckPipeline::new(lifecycle, runner), request))
}

fn build_request(cli: &Cli) -> Result<CheckRequest> {
    let name = required("name", &cli.name)?.to_string();
    let head_sha = match cli.sha.as_deref() {
        Some(sha) => CommitSha::parse(sha)?,
        None => capture_head_sha(&cli.workdir)
            .with_context(|| format!("Failed to resolve commit of {:?}", cli.workdir))?,
    };

    Ok(CheckRequest {
        name,
        head_sha,
        container: ContainerSpec::new(&cli.image, &cli.command, &cli.options),
    })
}

fn required<'a>(input: &'static str, value: &'a str) -> Result<&'a str, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingInput(input));
    }
    Ok(trimmed)
}

fn report(outcome: &RunOutcome) -> ExitCode {
    match outcome.failure_message() {
        None => {
            info!(check_id = %outcome.check, "Check succeeded");
            ExitCode::SUCCESS
        }
        Some(message) => fail(&message),
    }
}

fn fail(message: &str) -> ExitCode {
    error!("{message}");
    workflow::set_failed(message);
    ExitCode::FAILURE
}
