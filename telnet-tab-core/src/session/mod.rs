//! Session lifecycle for Telnet tabs
//!
//! The [`SessionLifecycleController`] owns one tab's [`Session`], applies the
//! reconnect policy when it ends and produces [`RecoveryToken`]s.
//! [`ProcessTelnetSession`] is the bundled transport.

mod controller;
mod input;
mod policy;
mod process;
mod restore;
#[allow(clippy::module_inception)]
mod session;

pub use controller::{LifecycleEvent, LifecycleState, SessionLifecycleController};
pub use input::{
    DEFAULT_RECENT_INPUT_CAPACITY, DEFAULT_TERMINATION_COMMANDS, RecentInputTracker,
    TerminationMatcher,
};
pub use policy::{ReconnectDecision, decide};
pub use process::{ProcessSessionFactory, ProcessTelnetSession};
pub use restore::{RecoveryToken, RecoveryTokenOptions, TELNET_TAB_TOKEN_TYPE};
pub use session::{SESSION_EVENT_CAPACITY, Session, SessionEvent, SessionFactory};
