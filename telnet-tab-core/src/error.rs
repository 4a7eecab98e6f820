//! Error types for `telnet-tab`
//!
//! Each concern has its own error enum; [`TelnetTabError`] unifies them for
//! callers that do not care which layer failed.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a session or its transport
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The session could not be started (connection refused, client missing, ...)
    #[error("{0}")]
    StartFailed(String),

    /// The session is not open
    #[error("Session is not open")]
    NotOpen,

    /// Writing to the session failed
    #[error("Failed to write to session: {0}")]
    WriteFailed(String),

    /// The session was already started once
    #[error("Session was already started")]
    AlreadyStarted,
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors raised while validating a profile for the Telnet protocol
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The profile carries an invalid value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors raised while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration directory could not be determined
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// Reading or writing a file failed
    #[error("Failed to access '{path}': {source}")]
    Io {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be parsed
    #[error("Failed to parse '{path}': {reason}")]
    Parse {
        /// File that could not be parsed
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Serialization to TOML failed
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// No profile matched the requested name or id
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading a recovery token
#[derive(Debug, Error)]
pub enum RecoveryTokenError {
    /// The token was produced by a different kind of tab
    #[error("Unsupported recovery token type '{0}'")]
    UnsupportedType(String),

    /// The token is not valid JSON or misses required fields
    #[error("Malformed recovery token: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Top-level error type for the library
#[derive(Debug, Error)]
pub enum TelnetTabError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Protocol validation error
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Session error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Recovery token error
    #[error(transparent)]
    RecoveryToken(#[from] RecoveryTokenError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
