//! Application settings
//!
//! Stored as `settings.toml`; every section and field has a default so a
//! partial or missing file is valid.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::keybindings::KeybindingSettings;
use crate::i18n::CatalogTranslator;
use crate::protocol::TELNET_CLIENT;
use crate::session::{
    DEFAULT_RECENT_INPUT_CAPACITY, DEFAULT_TERMINATION_COMMANDS, ProcessSessionFactory,
    RecentInputTracker, TerminationMatcher,
};
use crate::tracing::{TracingConfig, TracingLevel, TracingOutput};

/// All user settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Logging
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Terminal tab behaviour
    #[serde(default)]
    pub terminal: TerminalSettings,
    /// Hotkey overrides
    #[serde(default)]
    pub keybindings: KeybindingSettings,
    /// User-facing string overrides, keyed by message id
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub translations: HashMap<String, String>,
}

impl AppSettings {
    /// Translator built from the `translations` table
    #[must_use]
    pub fn translator(&self) -> CatalogTranslator {
        CatalogTranslator::new(self.translations.clone())
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Base log level, `warn` unless configured
    #[serde(default)]
    pub level: TracingLevel,
    /// Log file; stderr when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    /// Tracing configuration with the level raised by `verbosity` steps
    #[must_use]
    pub fn tracing_config(&self, verbosity: u8) -> TracingConfig {
        let output = self
            .file
            .clone()
            .map_or(TracingOutput::Stderr, TracingOutput::File);
        TracingConfig::new()
            .with_level(self.level.raised_by(verbosity))
            .with_output(output)
    }
}

/// Terminal tab settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// External client program, looked up on `PATH` unless absolute
    pub client: PathBuf,
    /// Number of trailing input bytes kept for explicit-termination detection
    pub recent_input_capacity: usize,
    /// Typed commands that mean the user ended the session on purpose
    pub termination_commands: Vec<String>,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            client: PathBuf::from(TELNET_CLIENT),
            recent_input_capacity: DEFAULT_RECENT_INPUT_CAPACITY,
            termination_commands: DEFAULT_TERMINATION_COMMANDS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl TerminalSettings {
    /// Factory launching the configured client
    #[must_use]
    pub fn session_factory(&self) -> ProcessSessionFactory {
        ProcessSessionFactory::new().with_client(&self.client)
    }

    /// Matcher for the configured termination commands
    #[must_use]
    pub fn termination_matcher(&self) -> TerminationMatcher {
        TerminationMatcher::new(&self.termination_commands)
    }

    /// Tracker large enough to hold the longest termination command
    #[must_use]
    pub fn recent_input_tracker(&self) -> RecentInputTracker {
        let longest = self.termination_matcher().longest_command();
        RecentInputTracker::with_capacity(self.recent_input_capacity.max(longest))
    }
}
