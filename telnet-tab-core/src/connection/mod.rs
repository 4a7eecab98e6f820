//! Connection helpers used before a session is launched

mod port_check;

pub use port_check::{PortCheckError, PortCheckResult, check_port_async};
