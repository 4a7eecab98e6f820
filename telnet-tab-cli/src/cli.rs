//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use telnet_tab_core::BehaviorOnSessionEnd;

/// Telnet terminal tab with reconnect handling
#[derive(Parser)]
#[command(name = "telnet-tab")]
#[command(author, version, about = "Telnet terminal tab with reconnect handling")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = "TELNET_TAB_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output; any `NO_COLOR` value except 0/false/no/off counts
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Clone, Subcommand)]
pub enum Commands {
    /// List saved profiles
    #[command(about = "List saved Telnet profiles")]
    List {
        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Save a profile
    #[command(about = "Add or replace a saved Telnet profile")]
    Add {
        /// Profile name
        #[arg(short, long)]
        name: String,

        /// Host name or address
        #[arg(short = 'H', long)]
        host: String,

        /// TCP port
        #[arg(short, long, default_value_t = telnet_tab_core::models::DEFAULT_TELNET_PORT)]
        port: u16,

        /// What to do when the session ends
        #[arg(long, value_enum, default_value = "auto")]
        on_end: OnEndArg,

        /// Extra argument for the telnet client (repeatable)
        #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
        args: Vec<String>,

        /// Pre-connect port check timeout in seconds, 0 disables the check
        #[arg(long, value_name = "SECS")]
        timeout: Option<u32>,
    },

    /// Open a tab for a profile or host
    #[command(about = "Open a Telnet tab for a saved profile or a host")]
    Connect {
        /// Profile name, profile id, or host name
        target: String,

        /// Port when connecting to a host directly
        #[arg(short, long)]
        port: Option<u16>,

        /// Override what happens when the session ends
        #[arg(long, value_enum)]
        on_end: Option<OnEndArg>,

        /// Write a recovery token to this file when the tab closes
        #[arg(long, value_name = "FILE")]
        save_token: Option<PathBuf>,

        /// Show the client command that would be executed without running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Reopen a tab from a recovery token
    #[command(about = "Reopen a Telnet tab from a recovery token file")]
    Restore {
        /// Recovery token file
        token: PathBuf,

        /// Show the restored profile without connecting
        #[arg(long)]
        dry_run: bool,
    },

    /// Print a recovery token for a saved profile
    #[command(about = "Write a recovery token for a saved profile")]
    Token {
        /// Profile name or id
        name: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Whether the command takes over the terminal
    pub const fn is_interactive(&self) -> bool {
        matches!(
            self,
            Self::Connect { dry_run: false, .. } | Self::Restore { dry_run: false, .. }
        )
    }
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    Table,
    /// JSON array
    Json,
}

/// End-of-session behaviour as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnEndArg {
    /// Reconnect immediately
    Reconnect,
    /// Offer a reconnect on the next key press
    Keep,
    /// Offer a reconnect unless the session was ended on purpose
    Auto,
    /// Do nothing
    None,
}

impl From<OnEndArg> for BehaviorOnSessionEnd {
    fn from(arg: OnEndArg) -> Self {
        match arg {
            OnEndArg::Reconnect => Self::Reconnect,
            OnEndArg::Keep => Self::Keep,
            OnEndArg::Auto => Self::Auto,
            OnEndArg::None => Self::Unspecified,
        }
    }
}
