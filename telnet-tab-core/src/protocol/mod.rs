//! Protocol layer
//!
//! Profile validation and client command construction for Telnet.

mod telnet;

pub use telnet::{TELNET_CLIENT, TelnetProtocol};
