//! Interactive Telnet tab on the controlling terminal

use std::path::Path;
use std::sync::Arc;

use telnet_tab_core::session::SessionFactory;
use telnet_tab_core::{
    AppSettings, HostBridge, Hotkey, Keymap, RecoveryToken, RecoveryTokenOptions,
    SessionLifecycleController, TelnetProfile,
};

use crate::error::CliError;
use crate::terminal::{KeyInput, RawModeGuard, ResizeWatcher, TerminalHost};

/// What the tab is opened from
pub enum TabSource {
    /// A profile resolved from the command line
    Profile(TelnetProfile),
    /// A previously written recovery token
    Token(RecoveryToken),
}

/// Runs a tab until the user closes it or input ends.
///
/// When `save_token` is set, the tab's recovery token is written there on
/// exit.
pub async fn run_tab(
    source: TabSource,
    settings: &AppSettings,
    save_token: Option<&Path>,
) -> Result<(), CliError> {
    let keys = KeyInput::spawn_stdin();
    let host = TerminalHost::new(Arc::clone(&keys), settings.translator());
    let factory: Arc<dyn SessionFactory> = Arc::new(settings.terminal.session_factory());

    let controller = match source {
        TabSource::Profile(profile) => SessionLifecycleController::new(profile, factory, host),
        TabSource::Token(token) => {
            SessionLifecycleController::from_recovery_token(&token, factory, host)?
        }
    };
    let mut controller = controller
        .with_termination_matcher(settings.terminal.termination_matcher())
        .with_recent_inputs(settings.terminal.recent_input_tracker());
    let keymap = Keymap::from_settings(&settings.keybindings);

    tracing::info!(
        profile = %controller.profile().name,
        address = %controller.profile().address(),
        "Opening tab"
    );

    let raw_mode = RawModeGuard::enable()?;
    let mut resize = ResizeWatcher::new();
    drive(&mut controller, &keys, &keymap, &mut resize).await;

    let token = controller.recovery_token(RecoveryTokenOptions::with_state());
    controller.close().await;
    drop(raw_mode);

    if let Some(path) = save_token {
        write_token(path, &token)?;
        tracing::info!(path = %path.display(), "Recovery token written");
    }
    Ok(())
}

/// Pumps session events, keys and resizes into the controller
async fn drive<H: HostBridge>(
    controller: &mut SessionLifecycleController<H>,
    keys: &KeyInput,
    keymap: &Keymap,
    resize: &mut ResizeWatcher,
) {
    controller.initialize_session().await;
    controller.notify_resize();

    loop {
        tokio::select! {
            event = controller.next_event() => controller.handle_event(event).await,
            key = keys.next() => {
                let Some(key) = key else {
                    tracing::debug!("Keyboard input closed");
                    break;
                };
                match keymap.match_input(&key) {
                    Some(Hotkey::CloseTab) => {
                        if controller.can_close().await {
                            break;
                        }
                    }
                    Some(hotkey) => controller.handle_hotkey(hotkey, true).await,
                    None => controller.send_input(&key),
                }
            }
            () = resize.changed() => controller.notify_resize(),
        }
    }
}

/// Writes a token as pretty JSON
pub fn write_token(path: &Path, token: &RecoveryToken) -> Result<(), CliError> {
    let json = token
        .to_json()
        .map_err(|e| CliError::Token(format!("Failed to serialize token: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Reads and validates a token file
pub fn read_token(path: &Path) -> Result<RecoveryToken, CliError> {
    let json = std::fs::read_to_string(path)?;
    Ok(RecoveryToken::from_json(&json)?)
}
