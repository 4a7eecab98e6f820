//! Session lifecycle controller
//!
//! [`SessionLifecycleController`] owns the session of one terminal tab. It
//! connects and disconnects, reacts to the session ending according to the
//! profile's [`BehaviorOnSessionEnd`](crate::models::BehaviorOnSessionEnd),
//! keeps at most one "press any key to reconnect" offer outstanding and
//! produces recovery tokens.
//!
//! The controller is driven by its host:
//!
//! ```ignore
//! controller.initialize_session().await;
//! loop {
//!     tokio::select! {
//!         event = controller.next_event() => controller.handle_event(event).await,
//!         Some(bytes) = keyboard.recv() => controller.send_input(&bytes),
//!     }
//! }
//! ```
//!
//! Every mutating operation takes `&mut self`, so a second `reconnect()` or
//! `initialize_session()` can never interleave with one in progress.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::Instrument;

use crate::error::RecoveryTokenError;
use crate::hotkeys::Hotkey;
use crate::host::{HostBridge, MessageBoxSpec, MessageBoxType};
use crate::i18n::msg;
use crate::models::{TelnetProfile, translate_keys};
use crate::style;
use crate::tracing::span_names;

use super::input::{RecentInputTracker, TerminationMatcher};
use super::policy::{ReconnectDecision, decide};
use super::restore::{RecoveryToken, RecoveryTokenOptions};
use super::session::{Session, SessionEvent, SessionFactory};

/// Capacity of the user input broadcast channel
const INPUT_CHANNEL_CAPACITY: usize = 64;

/// Where the controller is in a session's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// No session installed
    #[default]
    NoSession,
    /// A session is starting
    Connecting,
    /// The session is connected
    Active,
    /// The session ended or failed to start
    Closed,
}

/// Events the host feeds back into [`SessionLifecycleController::handle_event`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Event from the current session
    Session(SessionEvent),
    /// First input after a reconnect offer
    OfferAccepted,
}

/// Outstanding reconnect offer
///
/// The pending variant owns the input subscription, so clearing the offer
/// also cancels the subscription.
#[derive(Debug, Default)]
enum ReconnectOffer {
    #[default]
    NoOffer,
    Pending {
        input: broadcast::Receiver<Vec<u8>>,
    },
}

impl ReconnectOffer {
    const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// The installed session together with its subscriptions
struct AttachedSession {
    session: Box<dyn Session>,
    /// Event stream; `None` once detached or after `Destroyed`
    events: Option<mpsc::Receiver<SessionEvent>>,
    generation: u64,
    destroyed_handler: bool,
    service_message_handler: bool,
}

impl AttachedSession {
    fn detach(&mut self) {
        self.events = None;
        self.destroyed_handler = false;
        self.service_message_handler = false;
    }
}

/// Owns the session of one Telnet tab
pub struct SessionLifecycleController<H: HostBridge> {
    profile: TelnetProfile,
    factory: Arc<dyn SessionFactory>,
    host: H,
    session: Option<AttachedSession>,
    offer: ReconnectOffer,
    recent_inputs: RecentInputTracker,
    termination: TerminationMatcher,
    input_tx: broadcast::Sender<Vec<u8>>,
    state: LifecycleState,
    generation: u64,
    reconnect_count: u64,
}

impl<H: HostBridge> SessionLifecycleController<H> {
    /// Creates a controller for a profile; no session is started yet
    pub fn new(profile: TelnetProfile, factory: Arc<dyn SessionFactory>, host: H) -> Self {
        let (input_tx, _) = broadcast::channel(INPUT_CHANNEL_CAPACITY);
        Self {
            profile,
            factory,
            host,
            session: None,
            offer: ReconnectOffer::NoOffer,
            recent_inputs: RecentInputTracker::new(),
            termination: TerminationMatcher::default(),
            input_tx,
            state: LifecycleState::NoSession,
            generation: 0,
            reconnect_count: 0,
        }
    }

    /// Rebuilds a controller from a recovery token
    ///
    /// The token's saved state is left for the host to apply to its frontend.
    ///
    /// # Errors
    /// Returns `RecoveryTokenError::UnsupportedType` for tokens of other tab kinds
    pub fn from_recovery_token(
        token: &RecoveryToken,
        factory: Arc<dyn SessionFactory>,
        host: H,
    ) -> Result<Self, RecoveryTokenError> {
        token.validate()?;
        Ok(Self::new(token.profile.clone(), factory, host))
    }

    /// Replaces the explicit-termination matcher
    #[must_use]
    pub fn with_termination_matcher(mut self, matcher: TerminationMatcher) -> Self {
        self.termination = matcher;
        self
    }

    /// Replaces the recent input tracker, e.g. to change its capacity
    #[must_use]
    pub fn with_recent_inputs(mut self, tracker: RecentInputTracker) -> Self {
        self.recent_inputs = tracker;
        self
    }

    /// Profile the tab connects with
    pub const fn profile(&self) -> &TelnetProfile {
        &self.profile
    }

    /// Host services
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Current lifecycle state
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Whether a reconnect offer is outstanding
    pub const fn has_pending_offer(&self) -> bool {
        self.offer.is_pending()
    }

    /// Whether a session is installed and open
    pub fn is_session_open(&self) -> bool {
        self.session.as_ref().is_some_and(|a| a.session.is_open())
    }

    /// Number of `reconnect()` calls so far
    pub const fn reconnect_count(&self) -> u64 {
        self.reconnect_count
    }

    /// Recent user input
    pub const fn recent_inputs(&self) -> &RecentInputTracker {
        &self.recent_inputs
    }

    /// Creates, installs and starts a new session.
    ///
    /// Output the session held back while starting is released once it is up.
    /// Start failures are reported in the terminal and never propagated.
    pub async fn initialize_session(&mut self) {
        let span = tracing::info_span!(
            span_names::SESSION_START,
            host = %self.profile.options.host,
            port = self.profile.options.port,
        );
        async {
            self.offer = ReconnectOffer::NoOffer;

            let session = self.factory.create_session(&self.profile);
            self.set_session(session).await;
            self.subscribe_service_messages();
            self.state = LifecycleState::Connecting;

            self.host
                .start_spinner(&self.host.translate(msg::CONNECTING));

            let Some(attached) = self.session.as_mut() else {
                self.host.stop_spinner();
                return;
            };
            let result = attached.session.start().await;
            self.host.stop_spinner();

            match result {
                Ok(()) => {
                    self.state = LifecycleState::Active;
                    if let Some(attached) = self.session.as_mut() {
                        attached.session.release_initial_data_buffer();
                    }
                    tracing::info!(generation = self.generation, "Session started");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Session failed to start");
                    if let Some(attached) = self.session.as_mut() {
                        attached.detach();
                    }
                    self.state = LifecycleState::Closed;
                    self.host.write(&style::error_line(&e.to_string()));
                }
            }
        }
        .instrument(span)
        .await;
    }

    /// Subscribes to the destruction of the current session.
    ///
    /// Idempotent per session instance.
    pub fn attach_session_handlers(&mut self) {
        if let Some(attached) = self.session.as_mut() {
            if attached.events.is_some() && !attached.destroyed_handler {
                attached.destroyed_handler = true;
                tracing::debug!(
                    generation = attached.generation,
                    "Attached session destroyed handler"
                );
            }
        }
    }

    /// Destroys the current session and starts a fresh one
    pub async fn reconnect(&mut self) {
        self.reconnect_count += 1;
        let span = tracing::info_span!(
            span_names::SESSION_RECONNECT,
            host = %self.profile.options.host,
            attempt = self.reconnect_count,
        );
        async {
            self.teardown_session().await;
            self.initialize_session().await;
        }
        .instrument(span)
        .await;
    }

    /// Snapshot from which an equivalent tab can be rebuilt
    pub fn recovery_token(&self, options: RecoveryTokenOptions) -> RecoveryToken {
        let saved_state = if options.include_state && self.host.is_attached() {
            self.host.save_state()
        } else {
            None
        };
        RecoveryToken::new(self.profile.clone()).with_saved_state(saved_state)
    }

    /// Asks the user whether an open session may be closed
    pub async fn can_close(&self) -> bool {
        if !self.is_session_open() {
            return true;
        }

        let spec = MessageBoxSpec::new(
            MessageBoxType::Warning,
            self.host.translate_with(
                msg::DISCONNECT_FROM_HOST,
                &[("host", self.profile.options.host.as_str())],
            ),
        )
        .with_buttons(vec![
            self.host.translate(msg::DISCONNECT),
            self.host.translate(msg::DO_NOT_CLOSE),
        ])
        .with_default_id(0)
        .with_cancel_id(1);

        self.host.show_message_box(spec).await.response == 0
    }

    /// Whether the user ended the session on purpose
    pub fn is_session_explicitly_terminated(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|a| a.session.is_explicitly_terminated())
            || self.termination.matches(&self.recent_inputs)
    }

    /// Feeds user input to the tab
    pub fn send_input(&mut self, data: &[u8]) {
        self.recent_inputs.push(data);

        if let Some(attached) = self.session.as_ref() {
            if attached.session.is_open() {
                let options = &self.profile.options;
                let bytes = translate_keys(data, options.backspace_sends, options.delete_sends);
                if let Err(e) = attached.session.write(&bytes) {
                    tracing::warn!(error = %e, "Failed to forward input to session");
                }
            }
        }

        // Nobody listening is the normal case
        let _ = self.input_tx.send(data.to_vec());
    }

    /// Forwards the frontend's current geometry to the session
    pub fn notify_resize(&self) {
        if let Some(attached) = self.session.as_ref() {
            let size = self.host.size();
            attached.session.resize(size.columns, size.rows);
        }
    }

    /// Reacts to a hotkey; only `restart-telnet-session` with focus does anything
    pub async fn handle_hotkey(&mut self, hotkey: Hotkey, has_focus: bool) {
        if has_focus && hotkey == Hotkey::RestartSession {
            tracing::info!("Restart hotkey pressed");
            self.reconnect().await;
        }
    }

    /// Tears the tab down; no policy runs for the final close
    pub async fn close(&mut self) {
        self.offer = ReconnectOffer::NoOffer;
        self.teardown_session().await;
        tracing::info!(host = %self.profile.options.host, "Tab closed");
    }

    /// Waits for the next event of the current session or the reconnect offer.
    ///
    /// Cancel-safe; pending forever while there is nothing to wait for.
    pub async fn next_event(&mut self) -> LifecycleEvent {
        tokio::select! {
            event = recv_session_event(&mut self.session) => LifecycleEvent::Session(event),
            () = recv_offer_input(&mut self.offer) => LifecycleEvent::OfferAccepted,
        }
    }

    /// Applies an event obtained from [`next_event`](Self::next_event)
    pub async fn handle_event(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Session(SessionEvent::Output(data)) => {
                self.host.write_output(&data);
            }
            LifecycleEvent::Session(SessionEvent::ServiceMessage(message)) => {
                self.on_service_message(&message);
            }
            LifecycleEvent::Session(SessionEvent::Destroyed) => {
                self.on_session_destroyed().await;
            }
            LifecycleEvent::OfferAccepted => {
                self.on_offer_accepted().await;
            }
        }
    }

    /// Processes every event that is already queued, without waiting
    pub async fn process_pending_events(&mut self) {
        loop {
            let event = tokio::select! {
                biased;
                event = self.next_event() => event,
                () = std::future::ready(()) => break,
            };
            self.handle_event(event).await;
        }
    }

    async fn set_session(&mut self, mut session: Box<dyn Session>) {
        self.teardown_session().await;

        self.generation += 1;
        let events = session.take_events();
        if events.is_none() {
            tracing::warn!(generation = self.generation, "Session has no event stream");
        }
        self.session = Some(AttachedSession {
            session,
            events,
            generation: self.generation,
            destroyed_handler: false,
            service_message_handler: false,
        });
        tracing::debug!(generation = self.generation, "Session installed");
        self.attach_session_handlers();
    }

    fn subscribe_service_messages(&mut self) {
        if let Some(attached) = self.session.as_mut() {
            if attached.events.is_some() {
                attached.service_message_handler = true;
            }
        }
    }

    /// Cancels the current session's subscriptions, then destroys it
    async fn teardown_session(&mut self) {
        let Some(mut old) = self.session.take() else {
            return;
        };
        let span = tracing::debug_span!(span_names::SESSION_END, generation = old.generation);
        async {
            old.detach();
            old.session.destroy().await;
            tracing::debug!("Session torn down");
        }
        .instrument(span)
        .await;
        self.state = LifecycleState::NoSession;
    }

    fn on_service_message(&self, message: &str) {
        let Some(attached) = self.session.as_ref() else {
            return;
        };
        if !attached.service_message_handler {
            return;
        }
        self.host.write(&style::service_message_line(message));
        let size = self.host.size();
        attached.session.resize(size.columns, size.rows);
    }

    async fn on_session_destroyed(&mut self) {
        let Some(attached) = self.session.as_mut() else {
            return;
        };
        let handled = attached.destroyed_handler;
        attached.detach();
        if !handled {
            return;
        }

        self.state = LifecycleState::Closed;
        tracing::info!(host = %self.profile.options.host, "Session closed");

        if !self.host.is_attached() {
            return;
        }
        self.host
            .write(&style::session_closed_line(&self.profile.options.host));

        let explicit = self.is_session_explicitly_terminated();
        let decision = decide(self.profile.behavior_on_session_end, explicit);
        tracing::debug!(
            behavior = %self.profile.behavior_on_session_end,
            explicit,
            ?decision,
            "Reconnect policy evaluated"
        );

        match decision {
            ReconnectDecision::AutoReconnect => self.reconnect().await,
            ReconnectDecision::OfferReconnect => self.offer_reconnect(),
            ReconnectDecision::None => {}
        }
    }

    fn offer_reconnect(&mut self) {
        if self.offer.is_pending() {
            return;
        }
        self.offer = ReconnectOffer::Pending {
            input: self.input_tx.subscribe(),
        };
        self.host.write(&format!(
            "{}\r\n",
            self.host.translate(msg::PRESS_ANY_KEY_TO_RECONNECT)
        ));
    }

    async fn on_offer_accepted(&mut self) {
        if !self.offer.is_pending() {
            return;
        }
        self.offer = ReconnectOffer::NoOffer;
        if self.is_session_open() {
            return;
        }
        self.reconnect().await;
    }
}

impl<H: HostBridge> std::fmt::Debug for SessionLifecycleController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLifecycleController")
            .field("profile", &self.profile.name)
            .field("state", &self.state)
            .field("offer_pending", &self.offer.is_pending())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

async fn recv_session_event(session: &mut Option<AttachedSession>) -> SessionEvent {
    let Some(events) = session.as_mut().and_then(|a| a.events.as_mut()) else {
        return std::future::pending().await;
    };
    // A stream closed without `Destroyed` means the session went away
    events.recv().await.unwrap_or(SessionEvent::Destroyed)
}

async fn recv_offer_input(offer: &mut ReconnectOffer) {
    let ReconnectOffer::Pending { input } = offer else {
        return std::future::pending().await;
    };
    match input.recv().await {
        Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
        Err(broadcast::error::RecvError::Closed) => std::future::pending().await,
    }
}
