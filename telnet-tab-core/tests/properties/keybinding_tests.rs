//! Property tests for keybinding configuration

use proptest::prelude::*;
use telnet_tab_core::config::keybindings::{
    KeybindingSettings, default_keybindings, parse_accelerator,
};
use telnet_tab_core::{Hotkey, Keymap};

/// Caret-notation accelerators for control bytes
fn accel_strategy() -> impl Strategy<Value = (String, u8)> {
    (b'@'..=b'_').prop_map(|key| (format!("^{}", key as char), key - b'@'))
}

fn hotkey_strategy() -> impl Strategy<Value = Hotkey> {
    prop::sample::select(Hotkey::all().to_vec())
}

proptest! {
    /// Every caret accelerator maps to its control byte, whatever the case
    #[test]
    fn caret_accelerators_parse((accel, byte) in accel_strategy()) {
        prop_assert_eq!(parse_accelerator(&accel), Some(byte));
        prop_assert_eq!(parse_accelerator(&accel.to_lowercase()), Some(byte));
    }

    /// Overriding a binding and then resetting it returns to the default
    #[test]
    fn override_then_reset_returns_default(hotkey in hotkey_strategy(), (accel, _) in accel_strategy()) {
        let mut settings = KeybindingSettings::default();
        let defaults = default_keybindings();
        let def = defaults.iter().find(|d| d.hotkey == hotkey).unwrap();

        let original = settings.get_accel(def).to_owned();
        settings.overrides.insert(hotkey.action().to_owned(), accel.clone());
        prop_assert_eq!(settings.get_accel(def), accel.as_str());

        settings.reset(hotkey.action());
        prop_assert_eq!(settings.get_accel(def), original.as_str());
    }

    /// An override makes its byte trigger the hotkey
    #[test]
    fn override_is_honoured_by_keymap(hotkey in hotkey_strategy(), (accel, byte) in accel_strategy()) {
        let mut settings = KeybindingSettings::default();
        settings.overrides.insert(hotkey.action().to_owned(), accel);
        let keymap = Keymap::from_settings(&settings);
        prop_assert_eq!(keymap.lookup(byte), Some(hotkey));
    }
}
