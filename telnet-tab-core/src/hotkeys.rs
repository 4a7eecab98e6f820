//! Tab hotkeys
//!
//! A [`Keymap`] resolves the configured accelerators to control bytes so a
//! terminal host can intercept them before they reach the session.

use std::collections::HashMap;

use crate::config::keybindings::{KeybindingSettings, default_keybindings, parse_accelerator};

/// Actions a tab reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hotkey {
    /// Destroy the current session and connect again
    RestartSession,
    /// Close the tab, asking first if the session is still open
    CloseTab,
}

impl Hotkey {
    /// All hotkeys
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::RestartSession, Self::CloseTab]
    }

    /// Stable action name used in settings
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::RestartSession => "restart-telnet-session",
            Self::CloseTab => "close-tab",
        }
    }

    /// Looks a hotkey up by its action name
    #[must_use]
    pub fn from_action(action: &str) -> Option<Self> {
        Self::all().iter().copied().find(|h| h.action() == action)
    }
}

/// Control byte to hotkey mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<u8, Hotkey>,
}

impl Keymap {
    /// Builds the keymap from defaults and user overrides.
    ///
    /// Invalid accelerators are skipped with a warning. A user override wins
    /// over another action's default for the same byte.
    #[must_use]
    pub fn from_settings(settings: &KeybindingSettings) -> Self {
        let mut defs = default_keybindings();
        defs.sort_by_key(|def| settings.overrides.contains_key(def.action()));

        let mut bindings = HashMap::new();
        for def in defs {
            for accel in settings.get_accel(&def).split('|') {
                match parse_accelerator(accel) {
                    Some(byte) => {
                        bindings.insert(byte, def.hotkey);
                    }
                    None => tracing::warn!(
                        action = def.action(),
                        accel,
                        "Ignoring invalid accelerator"
                    ),
                }
            }
        }
        Self { bindings }
    }

    /// Hotkey bound to a single control byte
    #[must_use]
    pub fn lookup(&self, byte: u8) -> Option<Hotkey> {
        self.bindings.get(&byte).copied()
    }

    /// Hotkey for an input chunk; only a chunk consisting of exactly one bound
    /// byte counts, so pasted text never triggers a hotkey
    #[must_use]
    pub fn match_input(&self, data: &[u8]) -> Option<Hotkey> {
        match data {
            [byte] => self.lookup(*byte),
            _ => None,
        }
    }
}
