//! The session capability
//!
//! A [`Session`] is one connection attempt. The controller treats it as
//! opaque: it starts it, writes to it, resizes it, destroys it and listens to
//! its [`SessionEvent`]s.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::SessionResult;
use crate::models::TelnetProfile;

/// Capacity of a session's event stream
///
/// A full stream makes the session wait; events are never dropped.
pub const SESSION_EVENT_CAPACITY: usize = 256;

/// Events emitted by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Bytes received from the remote end
    Output(Vec<u8>),
    /// Out-of-band status text from the transport or client
    ServiceMessage(String),
    /// The session has terminated; emitted exactly once
    Destroyed,
}

/// A live or recently-live Telnet connection
#[async_trait]
pub trait Session: Send + Sync {
    /// Profile this session was created from
    fn profile(&self) -> &TelnetProfile;

    /// Hands over the session's event stream; `None` after the first call.
    ///
    /// Events are delivered in order and without loss. Whoever holds the
    /// stream must keep draining it or drop it, otherwise the session stalls.
    fn take_events(&mut self) -> Option<mpsc::Receiver<SessionEvent>>;

    /// Opens the connection
    ///
    /// # Errors
    /// Returns `SessionError::StartFailed` carrying the transport's message
    async fn start(&mut self) -> SessionResult<()>;

    /// Tears the session down and resolves once `Destroyed` has been emitted.
    ///
    /// Calling it on a session that already ended is a no-op.
    async fn destroy(&mut self);

    /// Forwards new terminal geometry
    fn resize(&self, columns: u16, rows: u16);

    /// Sends user input to the remote end
    ///
    /// # Errors
    /// Returns an error if the session is closed or the write fails
    fn write(&self, data: &[u8]) -> SessionResult<()>;

    /// Returns `true` while the connection is open
    fn is_open(&self) -> bool;

    /// Flushes output that was held back since `start()` and stops buffering
    fn release_initial_data_buffer(&mut self);

    /// Whether the transport itself knows the user ended the session on purpose
    fn is_explicitly_terminated(&self) -> bool {
        false
    }
}

/// Builds sessions for profiles
pub trait SessionFactory: Send + Sync {
    /// Creates a new, not yet started session
    fn create_session(&self, profile: &TelnetProfile) -> Box<dyn Session>;
}

impl<F> SessionFactory for F
where
    F: Fn(&TelnetProfile) -> Box<dyn Session> + Send + Sync,
{
    fn create_session(&self, profile: &TelnetProfile) -> Box<dyn Session> {
        self(profile)
    }
}
