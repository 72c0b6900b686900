//! DockerRunner against real processes.
//!
//! The `echo` stand-in prints the exact argument vector the runtime would
//! receive. Tests marked `#[ignore]` need a working docker daemon:
//! `cargo test -p dockcheck-runner -- --ignored`.

use dockcheck_core::LaunchError;
use dockcheck_runner::{CommandRunner, ContainerSpec, DockerConfig, DockerRunner};

fn echo_runner() -> DockerRunner {
    DockerRunner::new(DockerConfig::default().with_binary("echo").quiet())
}

#[tokio::test]
async fn runtime_receives_run_rm_options_image_command() {
    let spec = ContainerSpec::new("alpine", "ls -la", "--network none");
    let result = echo_runner().run(&spec).await.expect("run failed");

    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "run --rm --network none alpine ls -la\n");
    assert_eq!(result.stderr, "");
}

#[tokio::test]
async fn missing_runtime_is_launch_error() {
    let runner = DockerRunner::new(
        DockerConfig::default()
            .with_binary("dockcheck-missing-runtime")
            .quiet(),
    );
    let err = runner
        .run(&ContainerSpec::new("alpine", "true", ""))
        .await
        .unwrap_err();

    match err {
        LaunchError::Spawn { program, .. } => assert_eq!(program, "dockcheck-missing-runtime"),
        other => panic!("expected Spawn, got {other:?}"),
    }
}

#[tokio::test]
async fn non_zero_runtime_exit_is_a_result() {
    // `false` ignores its arguments and exits 1, like a failing container
    let runner = DockerRunner::new(DockerConfig::default().with_binary("false").quiet());
    let result = runner
        .run(&ContainerSpec::new("alpine", "true", ""))
        .await
        .expect("non-zero exit must not be an error");

    assert_eq!(result.exit_code, 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn alpine_true_succeeds_silently() {
    let runner = DockerRunner::new(DockerConfig::default().quiet());
    let result = runner
        .run(&ContainerSpec::new("alpine", "true", ""))
        .await
        .expect("run failed");

    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn alpine_script_reports_streams_and_exit_code() {
    let runner = DockerRunner::new(DockerConfig::default().quiet());
    let spec = ContainerSpec::new("alpine", r#"sh -c "echo out; echo err 1>&2; exit 3""#, "");
    let result = runner.run(&spec).await.expect("run failed");

    assert_eq!(result.exit_code, 3);
    assert!(result.stdout.contains("out"));
    assert!(result.stderr.contains("err"));
}
