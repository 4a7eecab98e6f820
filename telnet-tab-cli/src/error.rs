//! CLI error types and exit codes.

use telnet_tab_core::error::{ConfigError, RecoveryTokenError, TelnetTabError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, validation, or other non-connection errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Connection failure - the profile does not exist or the session could
    /// not be established
    pub const CONNECTION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Profile not found
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// Recovery token error
    #[error("Recovery token error: {0}")]
    Token(String),

    /// Protocol error
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Terminal setup error
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound(query) => Self::ProfileNotFound(query),
            other => Self::Config(other.to_string()),
        }
    }
}

impl From<RecoveryTokenError> for CliError {
    fn from(err: RecoveryTokenError) -> Self {
        Self::Token(err.to_string())
    }
}

impl From<TelnetTabError> for CliError {
    fn from(err: TelnetTabError) -> Self {
        match err {
            TelnetTabError::Config(e) => e.into(),
            TelnetTabError::Protocol(e) => Self::Protocol(e.to_string()),
            TelnetTabError::Session(e) => Self::Connection(e.to_string()),
            TelnetTabError::RecoveryToken(e) => e.into(),
            TelnetTabError::Io(e) => Self::Io(e),
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ProfileNotFound(_) | Self::Connection(_) => exit_codes::CONNECTION_FAILURE,
            Self::Config(_)
            | Self::Token(_)
            | Self::Protocol(_)
            | Self::Terminal(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
