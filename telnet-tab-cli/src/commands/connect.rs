//! Connect command: open a tab for a saved profile or a host.

use std::path::Path;

use telnet_tab_core::protocol::TelnetProtocol;
use telnet_tab_core::{AppSettings, BehaviorOnSessionEnd, TelnetProfile};

use crate::error::CliError;
use crate::tab::{TabSource, run_tab};
use crate::util::{create_config_manager, resolve_target};

/// Parameters for the `connect` command
pub struct ConnectParams<'a> {
    pub target: &'a str,
    pub port: Option<u16>,
    pub on_end: Option<BehaviorOnSessionEnd>,
    pub save_token: Option<&'a Path>,
    pub dry_run: bool,
}

/// Connect command handler
pub async fn cmd_connect(
    config_path: Option<&Path>,
    settings: &AppSettings,
    params: ConnectParams<'_>,
) -> Result<(), CliError> {
    let config_manager = create_config_manager(config_path)?;
    let profiles = config_manager.load_profiles()?;
    let profile = resolve_target(&profiles, params.target, params.port, params.on_end);

    if params.dry_run {
        println!("{}", command_line(&profile, &settings.terminal.client)?);
        return Ok(());
    }

    run_tab(TabSource::Profile(profile), settings, params.save_token).await
}

/// Command line `client` would be run with for a profile, validated first
pub fn command_line(profile: &TelnetProfile, client: &Path) -> Result<String, CliError> {
    let protocol = TelnetProtocol::new();
    protocol
        .validate_profile(profile)
        .map_err(|e| CliError::Protocol(e.to_string()))?;
    let command = protocol.build_command(profile);
    let args = command.get(1..).unwrap_or_default();
    Ok(std::iter::once(client.display().to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" "))
}
