//! Telnet connection profiles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::keys::{TelnetBackspaceSends, TelnetDeleteSends};

/// Default Telnet port
pub const DEFAULT_TELNET_PORT: u16 = 23;

/// Default timeout for the pre-connect port check in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u32 = 10;

/// What a tab does when its session ends without the tab being closed
///
/// Unrecognized values coming from configuration or tokens map to
/// [`BehaviorOnSessionEnd::Unspecified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorOnSessionEnd {
    /// Reconnect immediately
    Reconnect,
    /// Keep the tab open and offer a reconnect on the next key press
    Keep,
    /// Offer a reconnect unless the user ended the session explicitly
    #[default]
    Auto,
    /// Do nothing
    #[serde(other)]
    Unspecified,
}

impl BehaviorOnSessionEnd {
    /// Returns all variants
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Reconnect, Self::Keep, Self::Auto, Self::Unspecified]
    }

    /// Returns the configuration keyword for this behaviour
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reconnect => "reconnect",
            Self::Keep => "keep",
            Self::Auto => "auto",
            Self::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for BehaviorOnSessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BehaviorOnSessionEnd {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "reconnect" => Self::Reconnect,
            "keep" => Self::Keep,
            "auto" => Self::Auto,
            _ => Self::Unspecified,
        })
    }
}

/// Connection options of a Telnet profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelnetOptions {
    /// Remote host name or address
    pub host: String,
    /// Remote TCP port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Custom command-line arguments for the telnet client
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_args: Vec<String>,
    /// What the Backspace key sends
    #[serde(default)]
    pub backspace_sends: TelnetBackspaceSends,
    /// What the Delete key sends
    #[serde(default)]
    pub delete_sends: TelnetDeleteSends,
    /// Timeout for the pre-connect port check, 0 disables the check
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u32,
}

const fn default_port() -> u16 {
    DEFAULT_TELNET_PORT
}

const fn default_connect_timeout() -> u32 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl TelnetOptions {
    /// Creates options for a host and port with default keyboard behaviour
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            custom_args: Vec::new(),
            backspace_sends: TelnetBackspaceSends::default(),
            delete_sends: TelnetDeleteSends::default(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// A saved Telnet connection
///
/// Profiles are owned by the host application and are read-only to the
/// session controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelnetProfile {
    /// Unique identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Connection options
    pub options: TelnetOptions,
    /// What to do when the session ends
    #[serde(default)]
    pub behavior_on_session_end: BehaviorOnSessionEnd,
}

impl TelnetProfile {
    /// Creates a profile with a fresh id and the default end-of-session behaviour
    #[must_use]
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            options: TelnetOptions::new(host, port),
            behavior_on_session_end: BehaviorOnSessionEnd::default(),
        }
    }

    /// Sets the end-of-session behaviour
    #[must_use]
    pub const fn with_behavior(mut self, behavior: BehaviorOnSessionEnd) -> Self {
        self.behavior_on_session_end = behavior;
        self
    }

    /// Sets custom client arguments
    #[must_use]
    pub fn with_custom_args(mut self, args: Vec<String>) -> Self {
        self.options.custom_args = args;
        self
    }

    /// Sets the pre-connect check timeout
    #[must_use]
    pub const fn with_connect_timeout(mut self, secs: u32) -> Self {
        self.options.connect_timeout_secs = secs;
        self
    }

    /// Returns `host:port`
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.options.host, self.options.port)
    }
}
