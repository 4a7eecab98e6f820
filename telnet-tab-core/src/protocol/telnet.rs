//! Telnet protocol handler

use crate::error::{ProtocolError, ProtocolResult};
use crate::models::{DEFAULT_TELNET_PORT, TelnetProfile};

/// Name of the external client binary
pub const TELNET_CLIENT: &str = "telnet";

/// Telnet protocol handler
///
/// Validates profiles and builds the command line of the external `telnet`
/// client that backs process sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelnetProtocol;

impl TelnetProtocol {
    /// Creates a new Telnet protocol handler
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the protocol identifier
    #[must_use]
    pub const fn protocol_id(&self) -> &'static str {
        "telnet"
    }

    /// Returns the human-readable protocol name
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        "Telnet"
    }

    /// Returns the default port
    #[must_use]
    pub const fn default_port(&self) -> u16 {
        DEFAULT_TELNET_PORT
    }

    /// Validates a profile
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidConfig` if the host is empty or the port is 0
    pub fn validate_profile(&self, profile: &TelnetProfile) -> ProtocolResult<()> {
        if profile.options.host.trim().is_empty() {
            return Err(ProtocolError::InvalidConfig(
                "Host cannot be empty".to_string(),
            ));
        }

        if profile.options.port == 0 {
            return Err(ProtocolError::InvalidConfig("Port cannot be 0".to_string()));
        }

        Ok(())
    }

    /// Builds the client command line: program first, then arguments
    #[must_use]
    pub fn build_command(&self, profile: &TelnetProfile) -> Vec<String> {
        let mut cmd = vec![TELNET_CLIENT.to_string()];
        cmd.extend(profile.options.custom_args.iter().cloned());
        cmd.push(profile.options.host.clone());
        cmd.push(profile.options.port.to_string());
        cmd
    }
}
