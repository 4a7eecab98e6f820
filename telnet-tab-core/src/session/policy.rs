//! What to do after a session ends unexpectedly

use crate::models::BehaviorOnSessionEnd;

/// Outcome of the reconnect policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReconnectDecision {
    /// Leave the tab as it is
    None,
    /// Reconnect right away
    AutoReconnect,
    /// Ask the user to press a key to reconnect
    OfferReconnect,
}

/// Maps the configured end-of-session behaviour and the explicit-termination
/// flag to a decision.
///
/// | behaviour     | explicitly terminated | decision         |
/// |---------------|-----------------------|------------------|
/// | `reconnect`   | any                   | `AutoReconnect`  |
/// | `keep`        | any                   | `OfferReconnect` |
/// | `auto`        | `false`               | `OfferReconnect` |
/// | `auto`        | `true`                | `None`           |
/// | `unspecified` | any                   | `None`           |
#[must_use]
pub const fn decide(
    behavior: BehaviorOnSessionEnd,
    explicitly_terminated: bool,
) -> ReconnectDecision {
    match behavior {
        BehaviorOnSessionEnd::Reconnect => ReconnectDecision::AutoReconnect,
        BehaviorOnSessionEnd::Keep => ReconnectDecision::OfferReconnect,
        BehaviorOnSessionEnd::Auto if !explicitly_terminated => ReconnectDecision::OfferReconnect,
        BehaviorOnSessionEnd::Auto | BehaviorOnSessionEnd::Unspecified => ReconnectDecision::None,
    }
}
