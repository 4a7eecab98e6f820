//! Session backed by the external `telnet` client
//!
//! Option negotiation stays inside the client; this session only moves bytes.
//! Output received before [`Session::release_initial_data_buffer`] is held
//! back so that a host replacing a session can flush it in one piece. The
//! event stream is bounded: when it is full the session stops reading from
//! the client, which in turn blocks on its own output.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot, watch};

use crate::connection::check_port_async;
use crate::error::{SessionError, SessionResult};
use crate::host::TerminalSize;
use crate::models::TelnetProfile;
use crate::protocol::{TELNET_CLIENT, TelnetProtocol};

use super::session::{SESSION_EVENT_CAPACITY, Session, SessionEvent, SessionFactory};

const READ_BUFFER_SIZE: usize = 8192;

/// State shared between the session and its I/O tasks
#[derive(Debug)]
struct Shared {
    events: mpsc::Sender<SessionEvent>,
    open: AtomicBool,
    destroyed: AtomicBool,
}

impl Shared {
    fn new(events: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            events,
            open: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
        }
    }

    /// Waits for room in the stream; `false` once nobody listens
    async fn emit(&self, event: SessionEvent) -> bool {
        self.events.send(event).await.is_ok()
    }

    /// Emits `Destroyed` the first time it is called
    async fn mark_destroyed(&self) {
        self.open.store(false, Ordering::SeqCst);
        if !self.destroyed.swap(true, Ordering::SeqCst) {
            let _ = self.emit(SessionEvent::Destroyed).await;
        }
    }
}

/// Copies client output into the event stream.
///
/// Until `released` turns true everything read is held back and then emitted
/// as one chunk. Reading stops while the stream is full.
async fn pump_output<R>(mut reader: R, shared: Arc<Shared>, mut released: watch::Receiver<bool>)
where
    R: AsyncRead + Unpin,
{
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    let mut held = Vec::new();
    let mut eof = false;

    while !*released.borrow_and_update() {
        tokio::select! {
            read = reader.read(&mut buffer), if !eof => match read {
                Ok(0) | Err(_) => eof = true,
                Ok(count) => held.extend_from_slice(&buffer[..count]),
            },
            changed = released.changed() => {
                if changed.is_err() {
                    return;
                }
            }
        }
    }

    if !held.is_empty() && !shared.emit(SessionEvent::Output(held)).await {
        return;
    }
    if eof {
        return;
    }
    loop {
        match reader.read(&mut buffer).await {
            Ok(0) | Err(_) => break,
            Ok(count) => {
                if !shared.emit(SessionEvent::Output(buffer[..count].to_vec())).await {
                    break;
                }
            }
        }
    }
}

/// Telnet session running an external `telnet` client with piped stdio
pub struct ProcessTelnetSession {
    profile: TelnetProfile,
    client: PathBuf,
    shared: Arc<Shared>,
    events: Option<mpsc::Receiver<SessionEvent>>,
    released: watch::Sender<bool>,
    started: bool,
    input_tx: Option<mpsc::UnboundedSender<Vec<u8>>>,
    kill_tx: Option<oneshot::Sender<()>>,
    done_rx: Option<oneshot::Receiver<()>>,
    size: Mutex<TerminalSize>,
}

impl ProcessTelnetSession {
    /// Creates a session for a profile; nothing runs until `start()`
    #[must_use]
    pub fn new(profile: TelnetProfile) -> Self {
        let (events_tx, events_rx) = mpsc::channel(SESSION_EVENT_CAPACITY);
        let (released, _) = watch::channel(false);
        Self {
            profile,
            client: PathBuf::from(TELNET_CLIENT),
            shared: Arc::new(Shared::new(events_tx)),
            events: Some(events_rx),
            released,
            started: false,
            input_tx: None,
            kill_tx: None,
            done_rx: None,
            size: Mutex::new(TerminalSize::default()),
        }
    }

    /// Runs `client` instead of the `telnet` found on `PATH`
    #[must_use]
    pub fn with_client(mut self, client: impl Into<PathBuf>) -> Self {
        self.client = client.into();
        self
    }

    /// Client program this session launches
    #[must_use]
    pub fn client(&self) -> &Path {
        &self.client
    }

    /// Last geometry received from the host
    #[must_use]
    pub fn size(&self) -> TerminalSize {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn_client(&self) -> SessionResult<Child> {
        let command = TelnetProtocol::new().build_command(&self.profile);
        // The first element names the stock client; `self.client` replaces it
        let args = command.get(1..).unwrap_or_default();

        tracing::debug!(client = %self.client.display(), ?args, "Launching telnet client");
        Command::new(&self.client)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SessionError::StartFailed(format!(
                    "Failed to launch {}: {e}",
                    self.client.display()
                ))
            })
    }
}

#[async_trait]
impl Session for ProcessTelnetSession {
    fn profile(&self) -> &TelnetProfile {
        &self.profile
    }

    fn take_events(&mut self) -> Option<mpsc::Receiver<SessionEvent>> {
        self.events.take()
    }

    async fn start(&mut self) -> SessionResult<()> {
        if self.started {
            return Err(SessionError::AlreadyStarted);
        }
        self.started = true;

        TelnetProtocol::new()
            .validate_profile(&self.profile)
            .map_err(|e| SessionError::StartFailed(e.to_string()))?;

        check_port_async(&self.profile.options)
            .await
            .map_err(|e| SessionError::StartFailed(e.to_string()))?;

        let mut child = self.spawn_client()?;
        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        self.shared.open.store(true, Ordering::SeqCst);

        let stdout_task = stdout.map(|stdout| {
            tokio::spawn(pump_output(
                stdout,
                Arc::clone(&self.shared),
                self.released.subscribe(),
            ))
        });

        if let Some(stderr) = stderr {
            let shared = Arc::clone(&self.shared);
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    if line.trim().is_empty() {
                        continue;
                    }
                    if !shared.emit(SessionEvent::ServiceMessage(line)).await {
                        break;
                    }
                }
            });
        }

        if let Some(mut stdin) = stdin {
            let (input_tx, mut input_rx) = mpsc::unbounded_channel::<Vec<u8>>();
            self.input_tx = Some(input_tx);
            tokio::spawn(async move {
                while let Some(data) = input_rx.recv().await {
                    if stdin.write_all(&data).await.is_err() || stdin.flush().await.is_err() {
                        break;
                    }
                }
            });
        }

        let (kill_tx, kill_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        self.kill_tx = Some(kill_tx);
        self.done_rx = Some(done_rx);

        let shared = Arc::clone(&self.shared);
        let host = self.profile.options.host.clone();
        tokio::spawn(async move {
            tokio::select! {
                status = child.wait() => {
                    tracing::info!(%host, ?status, "Telnet client exited");
                }
                _ = kill_rx => {
                    if let Err(e) = child.kill().await {
                        tracing::warn!(%host, error = %e, "Failed to kill telnet client");
                    }
                }
            }
            // Output already read is delivered before `Destroyed`
            if let Some(task) = stdout_task {
                let _ = task.await;
            }
            shared.mark_destroyed().await;
            let _ = done_tx.send(());
        });

        Ok(())
    }

    async fn destroy(&mut self) {
        self.input_tx = None;
        self.released.send_replace(true);
        if let Some(kill_tx) = self.kill_tx.take() {
            let _ = kill_tx.send(());
        }
        if let Some(done_rx) = self.done_rx.take() {
            let _ = done_rx.await;
        }
        self.shared.mark_destroyed().await;
    }

    fn resize(&self, columns: u16, rows: u16) {
        // The piped client has no window; geometry is kept for the host
        *self.size.lock().unwrap_or_else(PoisonError::into_inner) =
            TerminalSize::new(columns, rows);
    }

    fn write(&self, data: &[u8]) -> SessionResult<()> {
        if !self.is_open() {
            return Err(SessionError::NotOpen);
        }
        self.input_tx
            .as_ref()
            .ok_or(SessionError::NotOpen)?
            .send(data.to_vec())
            .map_err(|e| SessionError::WriteFailed(e.to_string()))
    }

    fn is_open(&self) -> bool {
        self.shared.open.load(Ordering::SeqCst)
    }

    fn release_initial_data_buffer(&mut self) {
        self.released.send_replace(true);
    }
}

/// Factory producing [`ProcessTelnetSession`]s
#[derive(Debug, Clone)]
pub struct ProcessSessionFactory {
    client: PathBuf,
}

impl ProcessSessionFactory {
    /// Factory launching the `telnet` found on `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: PathBuf::from(TELNET_CLIENT),
        }
    }

    /// Launches `client` instead
    #[must_use]
    pub fn with_client(mut self, client: impl Into<PathBuf>) -> Self {
        self.client = client.into();
        self
    }
}

impl Default for ProcessSessionFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionFactory for ProcessSessionFactory {
    fn create_session(&self, profile: &TelnetProfile) -> Box<dyn Session> {
        Box::new(ProcessTelnetSession::new(profile.clone()).with_client(&self.client))
    }
}
