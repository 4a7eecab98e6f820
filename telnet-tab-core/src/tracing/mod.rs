//! Structured logging for `telnet-tab`
//!
//! The library only emits `tracing` events and spans; binaries call
//! [`init_tracing`] once to install a subscriber. A tab that owns the
//! terminal should log to a file, since anything written to stderr would
//! land in the middle of the remote output.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Target prefix of every event emitted by this crate
pub const LOG_TARGET: &str = "telnet_tab_core";

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Logging setup failures
#[derive(Debug, Error)]
pub enum TracingError {
    /// The subscriber or its filter was rejected
    #[error("Cannot set up logging: {0}")]
    InitializationFailed(String),

    /// A subscriber is installed already
    #[error("Logging is already set up")]
    AlreadyInitialized,

    /// The log file cannot be opened
    #[error("Cannot open log file '{path}': {reason}")]
    FileCreationFailed {
        /// Log file path
        path: PathBuf,
        /// OS message
        reason: String,
    },

    /// A level name that is none of `error`, `warn`, `info`, `debug`, `trace`
    #[error("Unknown log level '{0}'")]
    UnknownLevel(String),
}

/// Result alias for logging setup
pub type TracingResult<T> = Result<T, TracingError>;

/// Verbosity of this crate's events, quietest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingLevel {
    /// Failures the user should see
    Error,
    /// Unexpected but recoverable conditions
    #[default]
    #[serde(alias = "warning")]
    Warn,
    /// Session lifecycle
    Info,
    /// Handler wiring and policy decisions
    Debug,
    /// Everything
    Trace,
}

impl TracingLevel {
    const ALL: [Self; 5] = [Self::Error, Self::Warn, Self::Info, Self::Debug, Self::Trace];

    /// Name used in settings files and filter directives
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// `steps` levels louder, saturating at `trace`
    #[must_use]
    pub fn raised_by(self, steps: u8) -> Self {
        let index = Self::ALL
            .iter()
            .position(|level| *level == self)
            .unwrap_or_default();
        Self::ALL[(index + usize::from(steps)).min(Self::ALL.len() - 1)]
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name == "warning" {
            return Ok(Self::Warn);
        }
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == name)
            .ok_or_else(|| TracingError::UnknownLevel(s.to_string()))
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Standard error, colored
    #[default]
    Stderr,
    /// Appended to a file, plain text
    File(PathBuf),
}

/// What [`init_tracing`] installs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TracingConfig {
    /// Level for this crate and the extra targets
    pub level: TracingLevel,
    /// Destination
    pub output: TracingOutput,
    /// Raw `EnvFilter` directives replacing the level-derived ones
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Warn level on stderr
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Replaces the level-derived directives
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Filter directives derived from the configuration.
    ///
    /// `extra_targets` get the same level as this crate, e.g. the binary's
    /// own target.
    #[must_use]
    pub fn directives(&self, extra_targets: &[&str]) -> String {
        if let Some(filter) = &self.filter {
            return filter.clone();
        }
        std::iter::once(LOG_TARGET)
            .chain(extra_targets.iter().copied())
            .map(|target| format!("{target}={}", self.level.as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Installs the global subscriber. Only the first call succeeds.
///
/// # Errors
///
/// `AlreadyInitialized` on repeated calls, `InitializationFailed` for bad
/// filter directives, `FileCreationFailed` when the log file cannot be opened
pub fn init_tracing(config: &TracingConfig, extra_targets: &[&str]) -> TracingResult<()> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Err(TracingError::AlreadyInitialized);
    }

    let filter = EnvFilter::try_new(config.directives(extra_targets))
        .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    let (writer, ansi) = match &config.output {
        TracingOutput::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        TracingOutput::File(path) => {
            let file = open_log_file(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing::info!(level = %config.level, "Logging started");
    Ok(())
}

fn open_log_file(path: &Path) -> TracingResult<File> {
    let failed = |e: std::io::Error| TracingError::FileCreationFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(failed)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(failed)
}

/// Whether [`init_tracing`] has been called
#[must_use]
pub fn is_tracing_initialized() -> bool {
    INSTALLED.load(Ordering::SeqCst)
}

/// Standard span names
pub mod span_names {
    /// Creating and starting a session
    pub const SESSION_START: &str = "session.start";
    /// Tearing a session down
    pub const SESSION_END: &str = "session.end";
    /// Replacing a session with a fresh one
    pub const SESSION_RECONNECT: &str = "session.reconnect";
    /// Configuration load
    pub const CONFIG_LOAD: &str = "config.load";
    /// Configuration save
    pub const CONFIG_SAVE: &str = "config.save";
}
