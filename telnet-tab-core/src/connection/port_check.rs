//! Reachability check run before the external client is launched
//!
//! A refused or unresolvable host then fails `start()` with the OS message
//! instead of a client that prints its own error and exits.

use std::net::SocketAddr;
use std::time::Duration;

use futures::future::select_ok;
use thiserror::Error;

use crate::models::TelnetOptions;

/// Why a Telnet endpoint cannot be used
#[derive(Debug, Error)]
pub enum PortCheckError {
    /// The host name did not resolve to any address
    #[error("Cannot resolve '{host}': {reason}")]
    Unresolved {
        /// Host as configured
        host: String,
        /// Resolver message
        reason: String,
    },
    /// No resolved address accepted a connection in time
    #[error("{address} is not reachable: {reason}")]
    Unreachable {
        /// `host:port`
        address: String,
        /// Last connect error, or the timeout
        reason: String,
    },
}

/// Outcome of a successful check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortCheckResult {
    /// This address accepted a connection
    Reachable(SocketAddr),
    /// The profile disables the check
    Skipped,
}

/// Checks the endpoint of `options`, connecting to all resolved addresses at
/// once and settling on the first that accepts.
///
/// `connect_timeout_secs == 0` skips the check.
///
/// # Errors
/// `PortCheckError::Unresolved` when resolution fails,
/// `PortCheckError::Unreachable` when every address fails or time runs out
pub async fn check_port_async(options: &TelnetOptions) -> Result<PortCheckResult, PortCheckError> {
    if options.connect_timeout_secs == 0 {
        return Ok(PortCheckResult::Skipped);
    }
    let limit = Duration::from_secs(u64::from(options.connect_timeout_secs));
    let host = options.host.as_str();
    let unresolved = |reason: String| PortCheckError::Unresolved {
        host: host.to_string(),
        reason,
    };
    let unreachable = |reason: String| PortCheckError::Unreachable {
        address: format!("{host}:{}", options.port),
        reason,
    };

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, options.port))
        .await
        .map_err(|e| unresolved(e.to_string()))?
        .collect();
    if addrs.is_empty() {
        return Err(unresolved("no addresses".to_string()));
    }

    let attempts = addrs.into_iter().map(|addr| {
        Box::pin(async move {
            tokio::net::TcpStream::connect(addr)
                .await
                .map(|_stream| addr)
        })
    });

    match tokio::time::timeout(limit, select_ok(attempts)).await {
        Ok(Ok((addr, _pending))) => {
            tracing::debug!(%addr, "Endpoint reachable");
            Ok(PortCheckResult::Reachable(addr))
        }
        Ok(Err(e)) => Err(unreachable(e.to_string())),
        Err(_) => Err(unreachable("connection timed out".to_string())),
    }
}
