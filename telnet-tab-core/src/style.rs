//! Status lines written into the terminal by the controller

use crossterm::style::Stylize;

/// Line announcing a service message from the session
#[must_use]
pub fn service_message_line(message: &str) -> String {
    format!("\r{} {}\r\n", " Telnet ".black().on_white(), message)
}

/// Line announcing that the session to `host` has closed
#[must_use]
pub fn session_closed_line(host: &str) -> String {
    format!("\r\n{} {}: session closed\r\n", " TELNET ".black().on_white(), host)
}

/// Line reporting a failure
#[must_use]
pub fn error_line(message: &str) -> String {
    format!("{} {}\r\n", " X ".black().on_red(), message.red())
}
