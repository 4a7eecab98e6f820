//! `telnet-tab` Core Library
//!
//! Session lifecycle and reconnection engine for Telnet terminal tabs.
//!
//! # Crate Structure
//!
//! - [`session`] - Session capability, lifecycle controller, reconnect policy,
//!   recent input tracking, recovery tokens and the process-backed transport
//! - [`host`] - Services a tab needs from its host (rendering, dialogs, spinner)
//! - [`models`] - Telnet profiles and keyboard options
//! - [`protocol`] - Telnet profile validation and client command lines
//! - [`connection`] - Pre-connect port check
//! - [`config`] - Settings, keybindings and profile persistence
//! - [`hotkeys`] - Tab hotkeys and their keymap
//! - [`i18n`] - User-facing strings and translators
//! - [`style`] - ANSI-styled status lines
//! - [`tracing`] - Structured logging setup

#![warn(missing_docs)]

pub mod config;
pub mod connection;
pub mod error;
pub mod hotkeys;
pub mod host;
pub mod i18n;
pub mod models;
pub mod protocol;
pub mod session;
pub mod style;
pub mod tracing;

pub use config::{AppSettings, ConfigManager, KeybindingSettings};
pub use error::{
    ConfigError, ConfigResult, ProtocolError, ProtocolResult, RecoveryTokenError, SessionError,
    SessionResult, TelnetTabError,
};
pub use hotkeys::{Hotkey, Keymap};
pub use host::{
    DialogService, HostBridge, MessageBoxResult, MessageBoxSpec, MessageBoxType, RenderSink,
    StatusIndicator, TerminalSize,
};
pub use i18n::{CatalogTranslator, IdentityTranslator, Translator};
pub use models::{BehaviorOnSessionEnd, TelnetOptions, TelnetProfile};
pub use session::{
    LifecycleEvent, LifecycleState, ProcessSessionFactory, ProcessTelnetSession,
    RecentInputTracker, ReconnectDecision, RecoveryToken, RecoveryTokenOptions, Session,
    SessionEvent, SessionFactory, SessionLifecycleController, TerminationMatcher,
};
pub use tracing::{TracingConfig, TracingLevel, TracingOutput, init_tracing};
