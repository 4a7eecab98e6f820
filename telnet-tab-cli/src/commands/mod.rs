//! Command handler modules for the CLI.

mod add;
mod connect;
mod list;
mod restore;
mod token;

use std::path::Path;

use telnet_tab_core::AppSettings;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub async fn dispatch(
    config_path: Option<&Path>,
    settings: &AppSettings,
    command: Commands,
) -> Result<(), CliError> {
    match command {
        Commands::List { format } => list::cmd_list(config_path, format),
        Commands::Add {
            name,
            host,
            port,
            on_end,
            args,
            timeout,
        } => add::cmd_add(
            config_path,
            add::AddParams {
                name: &name,
                host: &host,
                port,
                on_end: on_end.into(),
                args,
                timeout,
            },
        ),
        Commands::Connect {
            target,
            port,
            on_end,
            save_token,
            dry_run,
        } => {
            connect::cmd_connect(
                config_path,
                settings,
                connect::ConnectParams {
                    target: &target,
                    port,
                    on_end: on_end.map(Into::into),
                    save_token: save_token.as_deref(),
                    dry_run,
                },
            )
            .await
        }
        Commands::Restore { token, dry_run } => {
            restore::cmd_restore(settings, &token, dry_run).await
        }
        Commands::Token { name, output } => {
            token::cmd_token(config_path, &name, output.as_deref())
        }
    }
}
