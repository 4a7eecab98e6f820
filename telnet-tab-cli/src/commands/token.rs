//! Token command: write a recovery token for a saved profile.

use std::path::Path;

use telnet_tab_core::RecoveryToken;

use crate::error::CliError;
use crate::tab::write_token;
use crate::util::create_config_manager;

/// Token command handler
pub fn cmd_token(
    config_path: Option<&Path>,
    name: &str,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let config_manager = create_config_manager(config_path)?;
    let profile = config_manager.find_profile(name)?;
    let token = RecoveryToken::new(profile);

    match output {
        Some(path) => {
            write_token(path, &token)?;
            println!("Token written to {}", path.display());
        }
        None => println!(
            "{}",
            token
                .to_json()
                .map_err(|e| CliError::Token(format!("Failed to serialize token: {e}")))?
        ),
    }
    Ok(())
}
