//! Keyboard behaviour for Telnet sessions
//!
//! Some remote systems expect Backspace and Delete to be swapped. These
//! settings rewrite the bytes a terminal produces before they reach the
//! session.

use serde::{Deserialize, Serialize};

/// Byte sent by terminals for the Backspace key
pub const BACKSPACE_BYTE: u8 = 0x7f;

/// Escape sequence sent by terminals for the Delete key
pub const DELETE_SEQUENCE: &[u8] = b"\x1b[3~";

/// What the Backspace key sends in a Telnet session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TelnetBackspaceSends {
    /// Automatic (use terminal default)
    #[default]
    Automatic,
    /// Send Backspace (^H, 0x08)
    Backspace,
    /// Send Delete (^?, 0x7F)
    Delete,
}

impl TelnetBackspaceSends {
    /// Returns all available options
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Automatic, Self::Backspace, Self::Delete]
    }

    /// Returns the display name for this option
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Automatic => "Automatic",
            Self::Backspace => "Backspace (^H)",
            Self::Delete => "Delete (^?)",
        }
    }

    /// Bytes to emit for a Backspace key press, `None` keeps the terminal's own
    const fn bytes(self) -> Option<&'static [u8]> {
        match self {
            Self::Automatic => None,
            Self::Backspace => Some(b"\x08"),
            Self::Delete => Some(b"\x7f"),
        }
    }
}

/// What the Delete key sends in a Telnet session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TelnetDeleteSends {
    /// Automatic (use terminal default)
    #[default]
    Automatic,
    /// Send Backspace (^H, 0x08)
    Backspace,
    /// Send Delete (^?, 0x7F)
    Delete,
}

impl TelnetDeleteSends {
    /// Returns all available options
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Automatic, Self::Backspace, Self::Delete]
    }

    /// Returns the display name for this option
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Automatic => "Automatic",
            Self::Backspace => "Backspace (^H)",
            Self::Delete => "Delete (^?)",
        }
    }

    const fn bytes(self) -> Option<&'static [u8]> {
        match self {
            Self::Automatic => None,
            Self::Backspace => Some(b"\x08"),
            Self::Delete => Some(b"\x7f"),
        }
    }
}

/// Rewrites Backspace and Delete key presses in a chunk of terminal input.
///
/// Returns the input unchanged when both settings are `Automatic`.
#[must_use]
pub fn translate_keys(
    input: &[u8],
    backspace: TelnetBackspaceSends,
    delete: TelnetDeleteSends,
) -> Vec<u8> {
    let backspace_bytes = backspace.bytes();
    let delete_bytes = delete.bytes();
    if backspace_bytes.is_none() && delete_bytes.is_none() {
        return input.to_vec();
    }

    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if let Some(replacement) = delete_bytes {
            if input[i..].starts_with(DELETE_SEQUENCE) {
                out.extend_from_slice(replacement);
                i += DELETE_SEQUENCE.len();
                continue;
            }
        }
        match (input[i], backspace_bytes) {
            (BACKSPACE_BYTE, Some(replacement)) => out.extend_from_slice(replacement),
            (byte, _) => out.push(byte),
        }
        i += 1;
    }
    out
}
