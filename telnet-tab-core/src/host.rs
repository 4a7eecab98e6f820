//! Host application services consumed by the session controller
//!
//! The controller never owns a UI. It writes status lines to a
//! [`RenderSink`], asks questions through a [`DialogService`], shows progress
//! through a [`StatusIndicator`] and localizes text with a
//! [`Translator`](crate::i18n::Translator). [`HostBridge`] is the union of
//! all four and is implemented automatically.

use async_trait::async_trait;

use crate::i18n::Translator;

/// Terminal geometry in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    /// Number of columns
    pub columns: u16,
    /// Number of rows
    pub rows: u16,
}

impl TerminalSize {
    /// Creates a new terminal size
    #[must_use]
    pub const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// Rendering surface of a terminal tab
pub trait RenderSink: Send + Sync {
    /// Writes text (status lines, prompts) to the terminal
    fn write(&self, text: &str);

    /// Writes raw session output to the terminal
    fn write_output(&self, data: &[u8]) {
        self.write(&String::from_utf8_lossy(data));
    }

    /// Returns `false` once the tab's frontend has been torn down
    fn is_attached(&self) -> bool {
        true
    }

    /// Captures opaque frontend state for a recovery token
    fn save_state(&self) -> Option<serde_json::Value> {
        None
    }

    /// Returns the current terminal geometry
    fn size(&self) -> TerminalSize {
        TerminalSize::default()
    }
}

/// Severity of a message box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageBoxType {
    /// Informational message
    #[default]
    Info,
    /// Warning that asks for confirmation
    Warning,
    /// Error message
    Error,
    /// Plain question
    Question,
}

/// Description of a modal message box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBoxSpec {
    /// Severity
    pub kind: MessageBoxType,
    /// Message text
    pub message: String,
    /// Button labels in display order
    pub buttons: Vec<String>,
    /// Index of the button activated by Enter
    pub default_id: usize,
    /// Index reported when the box is dismissed
    pub cancel_id: usize,
}

impl MessageBoxSpec {
    /// Creates a message box with no buttons
    #[must_use]
    pub fn new(kind: MessageBoxType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            buttons: Vec::new(),
            default_id: 0,
            cancel_id: 0,
        }
    }

    /// Sets the button labels
    #[must_use]
    pub fn with_buttons(mut self, buttons: Vec<String>) -> Self {
        self.buttons = buttons;
        self
    }

    /// Sets the default button index
    #[must_use]
    pub const fn with_default_id(mut self, id: usize) -> Self {
        self.default_id = id;
        self
    }

    /// Sets the cancel button index
    #[must_use]
    pub const fn with_cancel_id(mut self, id: usize) -> Self {
        self.cancel_id = id;
        self
    }

    /// Result a host should report when the user dismisses the box
    #[must_use]
    pub const fn cancelled(&self) -> MessageBoxResult {
        MessageBoxResult {
            response: self.cancel_id,
        }
    }
}

/// Outcome of a message box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageBoxResult {
    /// Index of the chosen button
    pub response: usize,
}

/// Modal dialogs
#[async_trait]
pub trait DialogService: Send + Sync {
    /// Shows a message box and resolves with the chosen button.
    ///
    /// Dismissing the box must resolve with `spec.cancel_id`.
    async fn show_message_box(&self, spec: MessageBoxSpec) -> MessageBoxResult;
}

/// Progress indicator shown while a session connects
pub trait StatusIndicator: Send + Sync {
    /// Shows a spinner with a label
    fn start_spinner(&self, text: &str);

    /// Hides the spinner
    fn stop_spinner(&self);
}

/// Everything the controller needs from its host
pub trait HostBridge: RenderSink + DialogService + StatusIndicator + Translator {}

impl<T> HostBridge for T where T: RenderSink + DialogService + StatusIndicator + Translator {}
