//! Shared utility functions used across command modules.

use std::path::Path;

use telnet_tab_core::config::{ConfigManager, find_in};
use telnet_tab_core::models::DEFAULT_TELNET_PORT;
use telnet_tab_core::{BehaviorOnSessionEnd, TelnetProfile};

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path)),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Resolves a `connect` target: a saved profile by id or name, otherwise an
/// ad-hoc profile for the target as host name.
///
/// `port` and `on_end` override the saved values.
pub fn resolve_target(
    profiles: &[TelnetProfile],
    target: &str,
    port: Option<u16>,
    on_end: Option<BehaviorOnSessionEnd>,
) -> TelnetProfile {
    let mut profile = find_in(profiles, target).cloned().unwrap_or_else(|| {
        tracing::debug!(host = target, "No saved profile, connecting to host directly");
        TelnetProfile::new(target, target, DEFAULT_TELNET_PORT)
    });
    if let Some(port) = port {
        profile.options.port = port;
    }
    if let Some(behavior) = on_end {
        profile.behavior_on_session_end = behavior;
    }
    profile
}
