//! List profiles command.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use telnet_tab_core::TelnetProfile;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::create_config_manager;

/// List profiles command handler
pub fn cmd_list(config_path: Option<&Path>, format: OutputFormat) -> Result<(), CliError> {
    let config_manager = create_config_manager(config_path)?;
    let profiles = config_manager.load_profiles()?;

    match format {
        OutputFormat::Table => println!("{}", format_table(&profiles)),
        OutputFormat::Json => println!("{}", format_json(&profiles)?),
    }
    Ok(())
}

/// Format profiles as a table string
#[must_use]
pub fn format_table(profiles: &[TelnetProfile]) -> String {
    if profiles.is_empty() {
        return "No profiles found.".to_string();
    }

    let mut output = String::new();

    let name_width = profiles
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let host_width = profiles
        .iter()
        .map(|p| p.options.host.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let port_width = 5;

    let _ = writeln!(
        output,
        "{:<name_width$}  {:<host_width$}  {:<port_width$}  ON END",
        "NAME", "HOST", "PORT"
    );
    let _ = writeln!(
        output,
        "{:-<name_width$}  {:-<host_width$}  {:-<port_width$}  {:-<11}",
        "", "", "", ""
    );

    for profile in profiles {
        let _ = writeln!(
            output,
            "{:<name_width$}  {:<host_width$}  {:<port_width$}  {}",
            profile.name,
            profile.options.host,
            profile.options.port,
            profile.behavior_on_session_end
        );
    }

    output.trim_end().to_string()
}

/// Simplified profile output for CLI
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOutput<'a> {
    pub id: String,
    pub name: &'a str,
    pub host: &'a str,
    pub port: u16,
    pub behavior_on_session_end: &'static str,
}

impl<'a> From<&'a TelnetProfile> for ProfileOutput<'a> {
    fn from(profile: &'a TelnetProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: &profile.name,
            host: &profile.options.host,
            port: profile.options.port,
            behavior_on_session_end: profile.behavior_on_session_end.as_str(),
        }
    }
}

/// Format profiles as JSON string
///
/// # Errors
///
/// Returns `CliError::Config` if JSON serialization fails.
pub fn format_json(profiles: &[TelnetProfile]) -> Result<String, CliError> {
    let output: Vec<ProfileOutput<'_>> = profiles.iter().map(Into::into).collect();
    serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::Config(format!("Failed to serialize to JSON: {e}")))
}
