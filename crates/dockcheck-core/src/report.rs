//! Check run report rendering.
//!
//! The body layout is consumed by downstream renderers and must stay
//! byte-for-byte stable. Each fence grows past the longest backtick run in
//! its stream, so plain output always gets three backticks:
//!
//! ~~~text
//! # Command output
//!
//! ## stdout
//!
//! ```
//! <stdout>
//! ```
//!
//! ## stderr
//!
//! ```
//! <stderr>
//! ```
//! ~~~

use serde::{Deserialize, Serialize};

use crate::domain::error::{LaunchError, RemoteApiError};
use crate::domain::exec::ExecResult;

const MIN_FENCE_LEN: usize = 3;

/// `output` object of a check run update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutput {
    pub title: String,
    pub summary: String,
    pub text: String,
}

/// Builders for every report dockcheck attaches to a check run.
pub struct CheckReport;

impl CheckReport {
    /// Report for a command that ran to completion.
    pub fn for_result(result: &ExecResult) -> CheckOutput {
        CheckOutput {
            title: Self::title(result.exit_code),
            summary: format!("Command exited with code {}", result.exit_code),
            text: Self::render_body(&result.stdout, &result.stderr),
        }
    }

    /// Report for a container runtime that could not be invoked.
    pub fn launch_failure(err: &LaunchError) -> CheckOutput {
        CheckOutput {
            title: "Failed to launch container".to_string(),
            summary: "The container runtime could not be invoked.".to_string(),
            text: fenced_section("# Launch error", &err.to_string()),
        }
    }

    /// Diagnostic report used when recording the real result failed.
    pub fn close_failure(err: &RemoteApiError) -> CheckOutput {
        CheckOutput {
            title: "Unable to report command result".to_string(),
            summary: "Updating this check with the command result failed; see the workflow log."
                .to_string(),
            text: fenced_section("# Update error", &err.to_string()),
        }
    }

    pub fn title(exit_code: i32) -> String {
        if exit_code == 0 {
            "Succeeded".to_string()
        } else {
            format!("Failed with exit code {exit_code}")
        }
    }

    /// Render the Markdown body holding both captured streams verbatim.
    pub fn render_body(stdout: &str, stderr: &str) -> String {
        let mut md = String::with_capacity(stdout.len() + stderr.len() + 64);
        md.push_str("# Command output\n\n");
        push_stream(&mut md, "## stdout", stdout);
        md.push('\n');
        push_stream(&mut md, "## stderr", stderr);
        md
    }
}

fn push_stream(md: &mut String, heading: &str, content: &str) {
    let fence = fence_for(content);
    md.push_str(heading);
    md.push_str("\n\n");
    md.push_str(&fence);
    md.push('\n');
    md.push_str(content);
    md.push('\n');
    md.push_str(&fence);
    md.push('\n');
}

/// Backtick fence longer than any backtick run inside `content`, so output
/// that prints its own fences cannot close the block early.
fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(MIN_FENCE_LEN.max(longest + 1))
}

fn fenced_section(heading: &str, content: &str) -> String {
    let mut md = String::new();
    push_stream(&mut md, heading, content);
    md
}
