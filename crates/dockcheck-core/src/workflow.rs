//! GitHub Actions workflow commands.
//!
//! The runner scans stdout for `::command::message` lines; a step is marked
//! failed with `::error::` plus a non-zero exit status.

use std::io::Write;

/// Escape a workflow command message (`%`, `\r`, `\n`).
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format an `::error::` command line.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Report a failure message to the runner on stdout.
pub fn set_failed(message: &str) {
    let mut stdout = std::io::stdout().lock();
    // the exit status still signals failure if stdout is gone
    let _ = writeln!(stdout, "{}", error_command(message));
    let _ = stdout.flush();
}
