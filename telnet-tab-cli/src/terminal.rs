//! The controlling terminal as a tab host
//!
//! Keys are read as raw bytes on a dedicated thread and shared between the
//! tab loop and message boxes through [`KeyInput`].

use std::io::{Read, Write};
use std::sync::Arc;

use async_trait::async_trait;
use crossterm::style::Stylize;
use crossterm::terminal::{self, ClearType};
use tokio::sync::{Mutex, mpsc};

use telnet_tab_core::i18n::CatalogTranslator;
use telnet_tab_core::{
    DialogService, MessageBoxResult, MessageBoxSpec, RenderSink, StatusIndicator, TerminalSize,
    Translator,
};

use crate::error::CliError;

const KEY_BUFFER_SIZE: usize = 1024;
const ESCAPE: u8 = 0x1b;
const CTRL_C: u8 = 0x03;

/// Raw key chunks typed by the user
#[derive(Debug)]
pub struct KeyInput {
    rx: Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
}

impl KeyInput {
    /// Starts reading standard input on a background thread
    pub fn spawn_stdin() -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            let mut stdin = std::io::stdin();
            let mut buffer = [0u8; KEY_BUFFER_SIZE];
            loop {
                match stdin.read(&mut buffer) {
                    Ok(0) | Err(_) => break,
                    Ok(count) => {
                        if tx.send(buffer[..count].to_vec()).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        Arc::new(Self::from_receiver(rx))
    }

    /// Wraps an existing channel
    pub fn from_receiver(rx: mpsc::UnboundedReceiver<Vec<u8>>) -> Self {
        Self { rx: Mutex::new(rx) }
    }

    /// Next key chunk; `None` once input is closed. Cancel-safe.
    pub async fn next(&self) -> Option<Vec<u8>> {
        self.rx.lock().await.recv().await
    }
}

/// Keeps the terminal in raw mode while alive
pub struct RawModeGuard;

impl RawModeGuard {
    /// Enables raw mode
    pub fn enable() -> Result<Self, CliError> {
        terminal::enable_raw_mode()
            .map_err(|e| CliError::Terminal(format!("Failed to enable raw mode: {e}")))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "Failed to restore terminal mode");
        }
    }
}

/// Fires when the terminal window changes size
pub struct ResizeWatcher {
    #[cfg(unix)]
    signal: Option<tokio::signal::unix::Signal>,
}

impl ResizeWatcher {
    /// Subscribes to window size changes where the platform reports them
    pub fn new() -> Self {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            let signal = signal(SignalKind::window_change())
                .map_err(|e| tracing::warn!(error = %e, "Window size changes will be missed"))
                .ok();
            Self { signal }
        }
        #[cfg(not(unix))]
        {
            Self {}
        }
    }

    /// Resolves on the next size change; never resolves without a source
    pub async fn changed(&mut self) {
        #[cfg(unix)]
        {
            if let Some(signal) = self.signal.as_mut() {
                if signal.recv().await.is_some() {
                    return;
                }
                self.signal = None;
            }
        }
        std::future::pending::<()>().await;
    }
}

impl Default for ResizeWatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a key press to a message box answer; `None` ignores the key.
///
/// Enter picks the default, Escape and Ctrl-C cancel, digits pick buttons
/// counted from one.
pub fn dialog_response(spec: &MessageBoxSpec, key: &[u8]) -> Option<MessageBoxResult> {
    let response = match key {
        [b'\r'] | [b'\n'] | [b'\r', b'\n'] => spec.default_id,
        [ESCAPE] | [CTRL_C] => return Some(spec.cancelled()),
        [digit @ b'1'..=b'9'] => {
            let index = usize::from(digit - b'1');
            if index >= spec.buttons.len() {
                return None;
            }
            index
        }
        _ => return None,
    };
    Some(MessageBoxResult { response })
}

/// Renders a message box as one prompt line
pub fn dialog_prompt(spec: &MessageBoxSpec) -> String {
    let buttons = spec
        .buttons
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let entry = format!("[{}] {label}", i + 1);
            if i == spec.default_id {
                entry.bold().to_string()
            } else {
                entry
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    format!("\r\n{} {buttons} ", spec.message)
}

/// Tab host writing to standard output
pub struct TerminalHost {
    keys: Arc<KeyInput>,
    translator: CatalogTranslator,
}

impl TerminalHost {
    /// Creates a host reading dialog answers from `keys`
    pub fn new(keys: Arc<KeyInput>, translator: CatalogTranslator) -> Self {
        Self { keys, translator }
    }

    fn emit(&self, bytes: &[u8]) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(bytes).and_then(|()| stdout.flush()) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl RenderSink for TerminalHost {
    fn write(&self, text: &str) {
        self.emit(text.as_bytes());
    }

    fn write_output(&self, data: &[u8]) {
        self.emit(data);
    }

    fn save_state(&self) -> Option<serde_json::Value> {
        let size = self.size();
        Some(serde_json::json!({ "columns": size.columns, "rows": size.rows }))
    }

    fn size(&self) -> TerminalSize {
        terminal::size()
            .map(|(columns, rows)| TerminalSize::new(columns, rows))
            .unwrap_or_default()
    }
}

#[async_trait]
impl DialogService for TerminalHost {
    async fn show_message_box(&self, spec: MessageBoxSpec) -> MessageBoxResult {
        self.write(&dialog_prompt(&spec));
        let result = loop {
            let Some(key) = self.keys.next().await else {
                break spec.cancelled();
            };
            if let Some(result) = dialog_response(&spec, &key) {
                break result;
            }
        };
        self.write("\r\n");
        result
    }
}

impl StatusIndicator for TerminalHost {
    fn start_spinner(&self, text: &str) {
        self.write(&format!("\r{}...", text.dim()));
    }

    fn stop_spinner(&self) {
        let mut stdout = std::io::stdout();
        if let Err(e) = crossterm::execute!(
            stdout,
            crossterm::cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine)
        ) {
            tracing::warn!(error = %e, "Failed to clear status line");
        }
    }
}

impl Translator for TerminalHost {
    fn translate(&self, msgid: &str) -> String {
        self.translator.translate(msgid)
    }
}
