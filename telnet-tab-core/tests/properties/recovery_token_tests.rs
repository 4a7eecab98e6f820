//! Property tests for recovery tokens

use proptest::prelude::*;
use telnet_tab_core::models::{TelnetBackspaceSends, TelnetDeleteSends};
use telnet_tab_core::{BehaviorOnSessionEnd, RecoveryToken, RecoveryTokenError, TelnetProfile};

fn profile_strategy() -> impl Strategy<Value = TelnetProfile> {
    (
        "[A-Za-z0-9 ]{1,20}",
        "[a-z0-9.-]{1,30}",
        1u16..,
        prop::collection::vec("-[a-zA-Z]", 0..3),
        prop::sample::select(BehaviorOnSessionEnd::all().to_vec()),
        prop::sample::select(TelnetBackspaceSends::all().to_vec()),
        prop::sample::select(TelnetDeleteSends::all().to_vec()),
        0u32..60,
    )
        .prop_map(
            |(name, host, port, args, behavior, backspace, delete, timeout)| {
                let mut profile = TelnetProfile::new(name, host, port)
                    .with_behavior(behavior)
                    .with_custom_args(args)
                    .with_connect_timeout(timeout);
                profile.options.backspace_sends = backspace;
                profile.options.delete_sends = delete;
                profile
            },
        )
}

fn state_strategy() -> impl Strategy<Value = Option<serde_json::Value>> {
    prop::option::of(
        ("[ -~]{0,40}", 1u16..500)
            .prop_map(|(scrollback, rows)| serde_json::json!({"scrollback": scrollback, "rows": rows})),
    )
}

proptest! {
    /// A token restores a profile targeting the same host and options
    #[test]
    fn token_preserves_profile(profile in profile_strategy(), state in state_strategy()) {
        let token = RecoveryToken::new(profile.clone()).with_saved_state(state.clone());
        let restored = RecoveryToken::from_json(&token.to_json().unwrap()).unwrap();

        prop_assert_eq!(&restored.profile, &profile);
        prop_assert_eq!(&restored.saved_state, &state);
        prop_assert!(restored.is_telnet_tab());
    }

    /// Tokens of any other type are refused
    #[test]
    fn other_token_types_are_rejected(profile in profile_strategy(), kind in "app:[a-z]{1,10}-tab") {
        prop_assume!(kind != "app:telnet-tab");
        let mut token = RecoveryToken::new(profile);
        token.token_type = kind.clone();
        let json = token.to_json().unwrap();

        match RecoveryToken::from_json(&json) {
            Err(RecoveryTokenError::UnsupportedType(found)) => prop_assert_eq!(found, kind),
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
