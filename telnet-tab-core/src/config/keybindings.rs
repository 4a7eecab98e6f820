//! Hotkey accelerators
//!
//! Bindings use caret notation for control characters (`^]` is `0x1d`), which
//! is how a terminal tab sees them. [`KeybindingSettings`] stores the user's
//! overrides, [`default_keybindings`] the built-in registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hotkeys::Hotkey;

/// `[keybindings.overrides]` table of `settings.toml`
///
/// Keys are action names such as `restart-telnet-session`, values are one or
/// more accelerators joined with `|`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingSettings {
    /// Action name to accelerators
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub overrides: HashMap<String, String>,
}

/// Built-in binding of one hotkey
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingDef {
    /// Hotkey this binding triggers
    pub hotkey: Hotkey,
    /// Accelerators used without an override, `|`-separated
    pub default_accels: String,
    /// Label for listings
    pub label: String,
}

impl KeybindingDef {
    /// Binds `hotkey` to `default_accels`
    #[must_use]
    pub fn new(hotkey: Hotkey, default_accels: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            hotkey,
            default_accels: default_accels.into(),
            label: label.into(),
        }
    }

    /// Action name of the bound hotkey
    #[must_use]
    pub const fn action(&self) -> &'static str {
        self.hotkey.action()
    }

    /// Built-in accelerators one by one
    #[must_use]
    pub fn default_accel_list(&self) -> Vec<&str> {
        self.default_accels.split('|').collect()
    }
}

impl KeybindingSettings {
    /// Effective accelerators of `def`: the override if any, else the built-in ones
    #[must_use]
    pub fn get_accel<'a>(&'a self, def: &'a KeybindingDef) -> &'a str {
        self.overrides
            .get(def.action())
            .map_or(def.default_accels.as_str(), String::as_str)
    }

    /// Drops the override of `action`
    pub fn reset(&mut self, action: &str) {
        self.overrides.remove(action);
    }
}

/// Built-in bindings, restart first
#[must_use]
pub fn default_keybindings() -> Vec<KeybindingDef> {
    vec![
        KeybindingDef::new(Hotkey::RestartSession, "^\\", "Restart Telnet Session"),
        KeybindingDef::new(Hotkey::CloseTab, "^]", "Close Tab"),
    ]
}

/// Parses a caret-notation accelerator into the byte a terminal receives.
///
/// `^A`..`^Z`, `^[`, `^\`, `^]`, `^^`, `^_` and `^?` are accepted; letters
/// are case-insensitive.
#[must_use]
pub fn parse_accelerator(accel: &str) -> Option<u8> {
    let rest = accel.trim().strip_prefix('^')?;
    let mut chars = rest.chars();
    let key = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match u8::try_from(key.to_ascii_uppercase()).ok()? {
        b'?' => Some(0x7f),
        byte @ b'@'..=b'_' => Some(byte - b'@'),
        _ => None,
    }
}
