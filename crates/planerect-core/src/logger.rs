//! Logging setup for the `planerect` tools.
//!
//! The `planerect*` crates log at the configured level and everything else
//! at `others`; `RUST_LOG`, when set, takes precedence. Records go to stderr
//! through `env_logger`, or through a `tracing-subscriber` (optionally JSON)
//! with the `tracing` feature.

use std::sync::OnceLock;

use log::LevelFilter;

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Log targets owned by this workspace.
pub const WORKSPACE_TARGETS: [&str; 3] = ["planerect", "planerect_core", "planerect_plane"];

#[derive(thiserror::Error, Debug)]
pub enum LoggerError {
    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),
    #[error("JSON log output needs the `tracing` feature")]
    JsonUnavailable,
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Level for the workspace's own targets.
    pub level: LevelFilter,
    /// Level for dependencies.
    pub others: LevelFilter,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            others: LevelFilter::Warn,
            json: false,
        }
    }
}

impl LogConfig {
    pub fn with_level(level: LevelFilter) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Filter string understood by both `env_logger` and `EnvFilter`, e.g.
    /// `warn,planerect=debug,planerect_core=debug,planerect_plane=debug`.
    pub fn directives(&self) -> String {
        let own = level_name(self.level);
        std::iter::once(level_name(self.others).to_string())
            .chain(WORKSPACE_TARGETS.iter().map(|t| format!("{t}={own}")))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn level_name(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}

static INSTALLED: OnceLock<LogConfig> = OnceLock::new();

/// The configuration installed by the first successful [`init_logging`].
pub fn installed() -> Option<&'static LogConfig> {
    INSTALLED.get()
}

/// Install the process-wide logger.
///
/// Later calls are no-ops once a logger is installed. JSON output without the
/// `tracing` feature is an error regardless.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggerError> {
    if config.json && !cfg!(feature = "tracing") {
        return Err(LoggerError::JsonUnavailable);
    }
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    install(config)?;
    let _ = INSTALLED.set(config.clone());
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn install(config: &LogConfig) -> Result<(), LoggerError> {
    env_logger::Builder::new()
        .parse_filters(&config.directives())
        .parse_env(env_logger::Env::default())
        .format_timestamp_millis()
        .format_target(true)
        .try_init()?;
    Ok(())
}

/// Span close events are emitted so instrumented functions report timing;
/// `log` records are bridged by the subscriber.
#[cfg(feature = "tracing")]
fn install(config: &LogConfig) -> Result<(), LoggerError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directives()));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let installed = if config.json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.with_timer(fmt::time::Uptime::default()).try_init()
    };
    installed.map_err(|e| LoggerError::Subscriber(e.to_string()))
}
