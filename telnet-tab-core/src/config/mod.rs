//! Configuration management for `telnet-tab`
//!
//! [`ConfigManager`] loads and saves profiles and settings as TOML files.

pub mod keybindings;
mod manager;
pub mod settings;

pub use keybindings::{KeybindingDef, KeybindingSettings, default_keybindings, parse_accelerator};
pub use manager::{CONFIG_DIR_NAME, ConfigManager, find_in};
pub use settings::{AppSettings, LoggingSettings, TerminalSettings};
