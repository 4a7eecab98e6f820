//! Scripted sessions and a recording host for driving the controller

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use telnet_tab_core::{
    DialogService, MessageBoxResult, MessageBoxSpec, RenderSink, Session, SessionError,
    SessionEvent, SessionFactory, StatusIndicator, TelnetProfile, TerminalSize, Translator,
};
use tokio::sync::mpsc;

/// Test-side view of one scripted session
#[derive(Debug)]
pub struct SessionHandle {
    events: mpsc::Sender<SessionEvent>,
    open: AtomicBool,
    explicit: AtomicBool,
    pub writes: Mutex<Vec<Vec<u8>>>,
    pub resizes: Mutex<Vec<(u16, u16)>>,
    pub destroy_calls: AtomicUsize,
    pub released: AtomicUsize,
}

impl SessionHandle {
    fn new() -> (Self, mpsc::Receiver<SessionEvent>) {
        let (events, rx) = mpsc::channel(64);
        let handle = Self {
            events,
            open: AtomicBool::new(false),
            explicit: AtomicBool::new(false),
            writes: Mutex::new(Vec::new()),
            resizes: Mutex::new(Vec::new()),
            destroy_calls: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
        };
        (handle, rx)
    }

    /// Queues an event; dropped once the controller let go of the stream
    fn emit(&self, event: SessionEvent) {
        let _ = self.events.try_send(event);
    }

    /// Remote end hangs up
    pub fn hang_up(&self) {
        self.open.store(false, Ordering::SeqCst);
        self.emit(SessionEvent::Destroyed);
    }

    pub fn output(&self, data: &[u8]) {
        self.emit(SessionEvent::Output(data.to_vec()));
    }

    pub fn service_message(&self, message: &str) {
        self.emit(SessionEvent::ServiceMessage(message.to_string()));
    }

    pub fn set_explicitly_terminated(&self, value: bool) {
        self.explicit.store(value, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn written(&self) -> Vec<u8> {
        self.writes.lock().unwrap().concat()
    }
}

pub struct ScriptedSession {
    profile: TelnetProfile,
    handle: Arc<SessionHandle>,
    events: Option<mpsc::Receiver<SessionEvent>>,
    start_error: Option<String>,
}

#[async_trait]
impl Session for ScriptedSession {
    fn profile(&self) -> &TelnetProfile {
        &self.profile
    }

    fn take_events(&mut self) -> Option<mpsc::Receiver<SessionEvent>> {
        self.events.take()
    }

    async fn start(&mut self) -> Result<(), SessionError> {
        match &self.start_error {
            Some(message) => Err(SessionError::StartFailed(message.clone())),
            None => {
                self.handle.open.store(true, Ordering::SeqCst);
                Ok(())
            }
        }
    }

    async fn destroy(&mut self) {
        self.handle.destroy_calls.fetch_add(1, Ordering::SeqCst);
        if self.handle.open.swap(false, Ordering::SeqCst) {
            self.handle.emit(SessionEvent::Destroyed);
        }
    }

    fn resize(&self, columns: u16, rows: u16) {
        self.handle.resizes.lock().unwrap().push((columns, rows));
    }

    fn write(&self, data: &[u8]) -> Result<(), SessionError> {
        self.handle.writes.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.handle.is_open()
    }

    fn release_initial_data_buffer(&mut self) {
        self.handle.released.fetch_add(1, Ordering::SeqCst);
    }

    fn is_explicitly_terminated(&self) -> bool {
        self.handle.explicit.load(Ordering::SeqCst)
    }
}

/// Factory handing out scripted sessions and remembering their handles
#[derive(Default)]
pub struct ScriptedFactory {
    handles: Mutex<Vec<Arc<SessionHandle>>>,
    failures: Mutex<VecDeque<Option<String>>>,
}

impl ScriptedFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Next created session fails to start with `message`
    pub fn fail_next(&self, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .push_back(Some(message.to_string()));
    }

    /// Next created session starts normally
    pub fn succeed_next(&self) {
        self.failures.lock().unwrap().push_back(None);
    }

    pub fn created(&self) -> usize {
        self.handles.lock().unwrap().len()
    }

    pub fn handle(&self, index: usize) -> Arc<SessionHandle> {
        Arc::clone(&self.handles.lock().unwrap()[index])
    }

    pub fn latest(&self) -> Arc<SessionHandle> {
        Arc::clone(self.handles.lock().unwrap().last().unwrap())
    }
}

impl SessionFactory for ScriptedFactory {
    fn create_session(&self, profile: &TelnetProfile) -> Box<dyn Session> {
        let (handle, events) = SessionHandle::new();
        let handle = Arc::new(handle);
        self.handles.lock().unwrap().push(Arc::clone(&handle));
        let start_error = self.failures.lock().unwrap().pop_front().flatten();
        Box::new(ScriptedSession {
            profile: profile.clone(),
            handle,
            events: Some(events),
            start_error,
        })
    }
}

/// Host that records everything the controller asks of it
pub struct RecordingHost {
    pub lines: Mutex<Vec<String>>,
    pub output: Mutex<Vec<u8>>,
    pub dialogs: Mutex<Vec<MessageBoxSpec>>,
    pub spinner_texts: Mutex<Vec<String>>,
    pub spinner_stops: AtomicUsize,
    response: AtomicUsize,
    attached: AtomicBool,
    state: Option<serde_json::Value>,
    size: TerminalSize,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            output: Mutex::new(Vec::new()),
            dialogs: Mutex::new(Vec::new()),
            spinner_texts: Mutex::new(Vec::new()),
            spinner_stops: AtomicUsize::new(0),
            response: AtomicUsize::new(0),
            attached: AtomicBool::new(true),
            state: None,
            size: TerminalSize::new(120, 40),
        }
    }
}

impl RecordingHost {
    pub fn with_state(state: serde_json::Value) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    /// Button index the next message box resolves with
    pub fn answer(&self, response: usize) {
        self.response.store(response, Ordering::SeqCst);
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn count_lines(&self, needle: &str) -> usize {
        self.lines().iter().filter(|l| l.contains(needle)).count()
    }
}

impl RenderSink for RecordingHost {
    fn write(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }

    fn write_output(&self, data: &[u8]) {
        self.output.lock().unwrap().extend_from_slice(data);
    }

    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn save_state(&self) -> Option<serde_json::Value> {
        self.state.clone()
    }

    fn size(&self) -> TerminalSize {
        self.size
    }
}

#[async_trait]
impl DialogService for RecordingHost {
    async fn show_message_box(&self, spec: MessageBoxSpec) -> MessageBoxResult {
        self.dialogs.lock().unwrap().push(spec);
        MessageBoxResult {
            response: self.response.load(Ordering::SeqCst),
        }
    }
}

impl StatusIndicator for RecordingHost {
    fn start_spinner(&self, text: &str) {
        self.spinner_texts.lock().unwrap().push(text.to_string());
    }

    fn stop_spinner(&self) {
        self.spinner_stops.fetch_add(1, Ordering::SeqCst);
    }
}

impl Translator for RecordingHost {}
