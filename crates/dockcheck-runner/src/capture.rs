//! Child process execution with full output capture.
//!
//! Both pipes are drained concurrently into one growable buffer each; order
//! is preserved within a stream but not across the two. Optionally every
//! chunk is echoed to this process's own stdout/stderr as it arrives, so the
//! step log shows output live.

use std::process::Stdio;

use dockcheck_core::{ExecResult, LaunchError};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tracing::debug;

const CHUNK_SIZE: usize = 8 * 1024;

/// Run `program args...` to completion, capturing stdout, stderr and the exit
/// code. A non-zero exit is returned as data.
pub async fn run_captured(
    program: &str,
    args: &[String],
    echo: bool,
) -> Result<ExecResult, LaunchError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            program: program.to_string(),
            source,
        })?;

    debug!(program = %program, pid = ?child.id(), "spawned");

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (stdout, stderr, status) = tokio::try_join!(
        drain(stdout, echo.then(tokio::io::stdout)),
        drain(stderr, echo.then(tokio::io::stderr)),
        child.wait(),
    )
    .map_err(|source| LaunchError::Io {
        program: program.to_string(),
        source,
    })?;

    let exit_code = status.code().unwrap_or(-1);
    debug!(program = %program, exit_code, "exited");

    Ok(ExecResult {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        exit_code,
    })
}

/// Append every chunk from `reader` to a buffer, teeing to `echo` if set.
async fn drain<R, W>(reader: Option<R>, mut echo: Option<W>) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = Vec::new();
    let Some(mut reader) = reader else {
        return Ok(buffer);
    };

    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);

        if let Some(out) = echo.as_mut() {
            // a closed log stream must not abort the capture
            if out.write_all(&chunk[..n]).await.is_err() || out.flush().await.is_err() {
                echo = None;
            }
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn captures_both_streams_and_exit_code() {
        let result = run_captured("sh", &sh("echo out; echo err 1>&2; exit 3"), false)
            .await
            .expect("run failed");
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
    }

    #[tokio::test]
    async fn silent_success_yields_empty_streams() {
        let result = run_captured("true", &[], false).await.expect("run failed");
        assert_eq!(result, ExecResult::new("", "", 0));
    }

    #[tokio::test]
    async fn large_output_is_not_truncated() {
        // larger than a pipe buffer on both streams at once
        let script = "head -c 300000 /dev/zero | tr '\\0' a; head -c 200000 /dev/zero | tr '\\0' b 1>&2";
        let result = run_captured("sh", &sh(script), false)
            .await
            .expect("run failed");
        assert_eq!(result.stdout.len(), 300_000);
        assert_eq!(result.stderr.len(), 200_000);
        assert!(result.stdout.chars().all(|c| c == 'a'));
    }

    #[tokio::test]
    async fn missing_binary_is_launch_error() {
        let err = run_captured("dockcheck-no-such-binary", &[], false)
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[tokio::test]
    async fn drain_tees_to_echo() {
        let input: &[u8] = b"line one\nline two\n";
        let mut echoed = Vec::new();
        let captured = drain(Some(input), Some(&mut echoed)).await.unwrap();
        assert_eq!(captured, input);
        assert_eq!(echoed, input);
    }
}
