//! `telnet-tab` - Telnet terminal tab with reconnect handling
//!
//! Opens a Telnet session in the current terminal and reacts to the session
//! ending according to the profile: reconnect, offer a reconnect on the next
//! key press, or stay closed. Also manages saved profiles and recovery tokens.

mod cli;
mod commands;
mod error;
mod tab;
mod terminal;
mod util;

use std::path::PathBuf;

use clap::Parser;
use cli::Cli;
use error::CliError;
use telnet_tab_core::config::LoggingSettings;
use telnet_tab_core::{AppSettings, TracingConfig, TracingLevel, TracingOutput, init_tracing};

/// Log target of this binary, enabled alongside the core library's
const LOG_TARGET: &str = "telnet_tab";

const LOG_FILE_NAME: &str = "telnet-tab.log";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        crossterm::style::force_color_output(false);
    }

    let result = run(&cli).await;

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();
    let settings = load_settings(cli)?;

    let tracing_config = tracing_config(&settings.logging, cli);
    if let Err(e) = init_tracing(&tracing_config, &[LOG_TARGET]) {
        if !cli.quiet {
            eprintln!("Warning: logging disabled: {e}");
        }
    }

    commands::dispatch(config_path, &settings, cli.command.clone()).await
}

fn load_settings(cli: &Cli) -> Result<AppSettings, CliError> {
    let config_manager = util::create_config_manager(cli.config.as_deref())?;
    Ok(config_manager.load_settings()?)
}

/// Tracing setup for this invocation.
///
/// A tab owns the terminal, so interactive commands log to a file unless the
/// settings already name one.
fn tracing_config(logging: &LoggingSettings, cli: &Cli) -> TracingConfig {
    let mut config = logging.tracing_config(cli.verbose);
    if cli.quiet {
        config = config.with_level(TracingLevel::Error);
    }
    if cli.command.is_interactive() && logging.file.is_none() {
        if let Some(path) = default_log_file() {
            config = config.with_output(TracingOutput::File(path));
        }
    }
    config
}

fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| {
        dir.join(telnet_tab_core::config::CONFIG_DIR_NAME)
            .join(LOG_FILE_NAME)
    })
}
