//! Property tests for the reconnect policy

use proptest::prelude::*;
use telnet_tab_core::BehaviorOnSessionEnd;
use telnet_tab_core::session::{ReconnectDecision, decide};

fn behavior_strategy() -> impl Strategy<Value = BehaviorOnSessionEnd> {
    prop::sample::select(BehaviorOnSessionEnd::all().to_vec())
}

/// Lowercase configuration strings, mostly not valid policies
fn policy_string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("reconnect".to_owned()),
        Just("keep".to_owned()),
        Just("auto".to_owned()),
        "[a-z_-]{0,12}",
    ]
}

proptest! {
    /// Every behaviour and flag combination yields exactly the tabulated decision
    #[test]
    fn decision_matches_table(behavior in behavior_strategy(), explicit in any::<bool>()) {
        let expected = match (behavior, explicit) {
            (BehaviorOnSessionEnd::Reconnect, _) => ReconnectDecision::AutoReconnect,
            (BehaviorOnSessionEnd::Keep, _) | (BehaviorOnSessionEnd::Auto, false) => {
                ReconnectDecision::OfferReconnect
            }
            (BehaviorOnSessionEnd::Auto, true) | (BehaviorOnSessionEnd::Unspecified, _) => {
                ReconnectDecision::None
            }
        };
        prop_assert_eq!(decide(behavior, explicit), expected);
    }

    /// Only `reconnect` ever reconnects without asking
    #[test]
    fn auto_reconnect_only_for_reconnect(behavior in behavior_strategy(), explicit in any::<bool>()) {
        let auto = decide(behavior, explicit) == ReconnectDecision::AutoReconnect;
        prop_assert_eq!(auto, behavior == BehaviorOnSessionEnd::Reconnect);
    }

    /// Unknown configuration values never trigger anything
    #[test]
    fn unknown_policy_strings_do_nothing(raw in policy_string_strategy(), explicit in any::<bool>()) {
        let behavior: BehaviorOnSessionEnd = raw.parse().unwrap();
        let json: BehaviorOnSessionEnd = serde_json::from_value(serde_json::Value::String(raw.clone())).unwrap();
        prop_assert_eq!(behavior, json);

        if !["reconnect", "keep", "auto"].contains(&raw.as_str()) {
            prop_assert_eq!(behavior, BehaviorOnSessionEnd::Unspecified);
            prop_assert_eq!(decide(behavior, explicit), ReconnectDecision::None);
        }
    }
}
