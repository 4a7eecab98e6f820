//! Restore command: reopen a tab from a recovery token.

use std::path::Path;

use telnet_tab_core::AppSettings;

use crate::error::CliError;
use crate::tab::{TabSource, read_token, run_tab};

/// Restore command handler
///
/// The token is rewritten in place when the restored tab closes.
pub async fn cmd_restore(
    settings: &AppSettings,
    token_path: &Path,
    dry_run: bool,
) -> Result<(), CliError> {
    let token = read_token(token_path)?;

    if dry_run {
        let profile = &token.profile;
        println!(
            "{} ({}) on end: {}",
            profile.name,
            profile.address(),
            profile.behavior_on_session_end
        );
        if let Some(state) = &token.saved_state {
            println!("saved state: {state}");
        }
        return Ok(());
    }

    run_tab(TabSource::Token(token), settings, Some(token_path)).await
}
