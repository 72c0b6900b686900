//! Tracing setup for the dockcheck binary.
//!
//! Logs go to stderr so they stay apart from the container output echoed on
//! stdout and from the `::error::` workflow commands.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// How the process logs, resolved from flags and the runner environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingConfig {
    /// Newline-delimited JSON instead of human-readable lines.
    pub json: bool,
    /// Level used when `RUST_LOG` is not set.
    pub level: Level,
    /// Colour escape codes in human-readable output.
    pub ansi: bool,
}

impl TracingConfig {
    /// Resolve from the command-line flags and the process environment.
    ///
    /// Step debug logging (`RUNNER_DEBUG=1`) raises the level to `DEBUG`
    /// like `--verbose` does; `NO_COLOR` turns colours off.
    pub fn from_env(json: bool, verbose: bool) -> Self {
        Self::resolve(
            json,
            verbose,
            std::env::var("RUNNER_DEBUG").ok().as_deref(),
            std::env::var_os("NO_COLOR").is_some(),
        )
    }

    fn resolve(json: bool, verbose: bool, runner_debug: Option<&str>, no_color: bool) -> Self {
        let level = if verbose || runner_debug == Some("1") {
            Level::DEBUG
        } else {
            Level::INFO
        };
        Self {
            json,
            level,
            ansi: !json && !no_color,
        }
    }
}

/// Install the global subscriber. Only the first call takes effect.
pub fn init_tracing(config: TracingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let json_layer = config.json.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
    });
    let text_layer = (!config.json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_ansi(config.ansi)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_forces_debug() {
        let config = TracingConfig::resolve(false, true, None, false);
        assert_eq!(config.level, Level::DEBUG);
    }

    #[test]
    fn runner_debug_forces_debug() {
        assert_eq!(
            TracingConfig::resolve(false, false, Some("1"), false).level,
            Level::DEBUG
        );
        assert_eq!(
            TracingConfig::resolve(false, false, Some("0"), false).level,
            Level::INFO
        );
    }

    #[test]
    fn colour_only_for_plain_text() {
        assert!(TracingConfig::resolve(false, false, None, false).ansi);
        assert!(!TracingConfig::resolve(false, false, None, true).ansi);
        assert!(!TracingConfig::resolve(true, false, None, false).ansi);
    }

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing(TracingConfig::resolve(false, false, None, true));
        init_tracing(TracingConfig::resolve(true, true, None, false));
    }
}
