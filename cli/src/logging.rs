//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so stdout carries only the response.
//!
//! # Log Levels
//!
//! - `error`: failed requests (HTTP status, transport, unparseable body)
//! - `warn`: default threshold
//! - `debug`: request dispatch and delivery
//! - `trace`: indicator toggles
//!
//! `RUST_LOG`, when set, overrides the level chosen by `-v` / `-q`.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// - `-q`: logging off
    /// - none: warn
    /// - `-v`: debug
    /// - `-vv`: trace
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        let level = match (quiet, verbose) {
            (true, _) => LevelFilter::OFF,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(config.with_ansi)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
