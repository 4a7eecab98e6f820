//! Translation of user-facing strings
//!
//! Message ids are English source strings. Placeholders use `{name}` and are
//! substituted after lookup, so a translation may reorder them.

use std::collections::HashMap;

/// Message ids used by the session controller
pub mod msg {
    /// Spinner label while a session starts
    pub const CONNECTING: &str = "Connecting";
    /// Prompt written after a session ends with a reconnect offer
    pub const PRESS_ANY_KEY_TO_RECONNECT: &str = "Press any key to reconnect";
    /// Close confirmation text; `{host}` is the remote host
    pub const DISCONNECT_FROM_HOST: &str = "Disconnect from {host}?";
    /// Close confirmation button that closes the tab
    pub const DISCONNECT: &str = "Disconnect";
    /// Close confirmation button that keeps the tab
    pub const DO_NOT_CLOSE: &str = "Do not close";
}

/// Looks up translations for message ids
pub trait Translator: Send + Sync {
    /// Translates a message id, returning the id itself when no translation exists
    fn translate(&self, msgid: &str) -> String {
        msgid.to_string()
    }

    /// Translates a message id and substitutes `{name}` placeholders
    fn translate_with(&self, msgid: &str, args: &[(&str, &str)]) -> String {
        substitute(&self.translate(msgid), args)
    }
}

/// Replaces `{name}` placeholders with the matching argument values.
///
/// Unknown placeholders are left untouched.
#[must_use]
pub fn substitute(template: &str, args: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (name, value) in args {
        result = result.replace(&format!("{{{name}}}"), value);
    }
    result
}

/// Translator that returns message ids unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {}

/// Translator backed by an in-memory catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    /// Creates a translator from message id -> translation pairs
    #[must_use]
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Returns the number of translated messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, msgid: &str) -> String {
        self.entries
            .get(msgid)
            .cloned()
            .unwrap_or_else(|| msgid.to_string())
    }
}
