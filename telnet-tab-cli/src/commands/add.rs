//! Add profile command.

use std::path::Path;

use telnet_tab_core::protocol::TelnetProtocol;
use telnet_tab_core::{BehaviorOnSessionEnd, TelnetProfile};

use crate::error::CliError;
use crate::util::create_config_manager;

/// Parameters for the `add` command
pub struct AddParams<'a> {
    pub name: &'a str,
    pub host: &'a str,
    pub port: u16,
    pub on_end: BehaviorOnSessionEnd,
    pub args: Vec<String>,
    pub timeout: Option<u32>,
}

/// Add profile command handler
///
/// A saved profile with the same name is replaced and keeps its id.
pub fn cmd_add(config_path: Option<&Path>, params: AddParams<'_>) -> Result<(), CliError> {
    let profile = build_profile(params)?;

    let config_manager = create_config_manager(config_path)?;
    let existing = config_manager.load_profiles()?;
    let profile = match telnet_tab_core::config::find_in(&existing, &profile.name) {
        Some(saved) => TelnetProfile {
            id: saved.id,
            ..profile
        },
        None => profile,
    };

    let name = profile.name.clone();
    let address = profile.address();
    config_manager.upsert_profile(profile)?;

    println!("Saved profile '{name}' ({address})");
    Ok(())
}

/// Builds and validates a profile from command-line values
fn build_profile(params: AddParams<'_>) -> Result<TelnetProfile, CliError> {
    let mut profile = TelnetProfile::new(params.name, params.host, params.port)
        .with_behavior(params.on_end)
        .with_custom_args(params.args);
    if let Some(timeout) = params.timeout {
        profile = profile.with_connect_timeout(timeout);
    }

    TelnetProtocol::new()
        .validate_profile(&profile)
        .map_err(|e| CliError::Protocol(e.to_string()))?;
    Ok(profile)
}
