//! Data models for Telnet profiles

mod keys;
mod profile;

pub use keys::{
    BACKSPACE_BYTE, DELETE_SEQUENCE, TelnetBackspaceSends, TelnetDeleteSends, translate_keys,
};
pub use profile::{
    BehaviorOnSessionEnd, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TELNET_PORT, TelnetOptions,
    TelnetProfile,
};
