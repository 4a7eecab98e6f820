//! Recovery tokens
//!
//! A recovery token is a serializable snapshot from which a host can rebuild
//! an equivalent tab later, possibly in a different process.

use serde::{Deserialize, Serialize};

use crate::error::RecoveryTokenError;
use crate::models::TelnetProfile;

/// Token type written by Telnet tabs
pub const TELNET_TAB_TOKEN_TYPE: &str = "app:telnet-tab";

/// Options for taking a recovery token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryTokenOptions {
    /// Include the frontend's saved state
    pub include_state: bool,
}

impl RecoveryTokenOptions {
    /// Options that include the frontend state
    #[must_use]
    pub const fn with_state() -> Self {
        Self {
            include_state: true,
        }
    }
}

/// Serializable descriptor of a Telnet tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryToken {
    /// Token type, always [`TELNET_TAB_TOKEN_TYPE`] for tokens produced here
    #[serde(rename = "type")]
    pub token_type: String,
    /// Profile the tab was connected with
    pub profile: TelnetProfile,
    /// Opaque frontend state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_state: Option<serde_json::Value>,
}

impl RecoveryToken {
    /// Creates a token for a profile without frontend state
    #[must_use]
    pub fn new(profile: TelnetProfile) -> Self {
        Self {
            token_type: TELNET_TAB_TOKEN_TYPE.to_string(),
            profile,
            saved_state: None,
        }
    }

    /// Attaches frontend state
    #[must_use]
    pub fn with_saved_state(mut self, state: Option<serde_json::Value>) -> Self {
        self.saved_state = state;
        self
    }

    /// Returns `true` if the token was produced by a Telnet tab
    #[must_use]
    pub fn is_telnet_tab(&self) -> bool {
        self.token_type == TELNET_TAB_TOKEN_TYPE
    }

    /// Serializes the token to pretty-printed JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a token and checks its type
    ///
    /// # Errors
    /// Returns `RecoveryTokenError::Malformed` for invalid JSON and
    /// `RecoveryTokenError::UnsupportedType` for tokens of other tab kinds
    pub fn from_json(json: &str) -> Result<Self, RecoveryTokenError> {
        let token: Self = serde_json::from_str(json)?;
        token.validate()?;
        Ok(token)
    }

    /// Checks the token type
    ///
    /// # Errors
    /// Returns `RecoveryTokenError::UnsupportedType` for tokens of other tab kinds
    pub fn validate(&self) -> Result<(), RecoveryTokenError> {
        if self.is_telnet_tab() {
            Ok(())
        } else {
            Err(RecoveryTokenError::UnsupportedType(self.token_type.clone()))
        }
    }
}
