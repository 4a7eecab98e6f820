//! The process-backed session driven by the controller
//!
//! Failure paths are decided before a client is launched. The remaining
//! tests run `/bin/sh` as the client, with a script in the profile's custom
//! arguments standing in for a remote host.

use std::sync::Arc;
use std::time::Duration;

use telnet_tab_core::{
    BehaviorOnSessionEnd, LifecycleEvent, LifecycleState, ProcessSessionFactory, SessionEvent,
    SessionFactory, SessionLifecycleController, TelnetProfile,
};

use super::support::RecordingHost;

type Controller = SessionLifecycleController<RecordingHost>;

/// Controller whose sessions run `script` under `/bin/sh` against a live port
fn scripted_client(port: u16, script: &str) -> Controller {
    let profile = TelnetProfile::new("local", "127.0.0.1", port)
        .with_behavior(BehaviorOnSessionEnd::Unspecified)
        .with_connect_timeout(2)
        .with_custom_args(vec!["-c".into(), script.into(), "telnet".into()]);
    let factory: Arc<dyn SessionFactory> =
        Arc::new(ProcessSessionFactory::new().with_client("/bin/sh"));
    SessionLifecycleController::new(profile, factory, RecordingHost::default())
}

/// Handles events until `done` holds for the host's output or the session ends
async fn pump_until(controller: &mut Controller, done: impl Fn(&[u8]) -> bool) {
    loop {
        let output = controller.host().output.lock().unwrap().clone();
        if done(&output) {
            return;
        }
        let event = tokio::time::timeout(Duration::from_secs(10), controller.next_event())
            .await
            .expect("no session event within 10s");
        let destroyed = event == LifecycleEvent::Session(SessionEvent::Destroyed);
        controller.handle_event(event).await;
        if destroyed {
            return;
        }
    }
}

async fn closed_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn refused_connection_is_reported_once() {
    let port = closed_port().await;
    let profile = TelnetProfile::new("local", "127.0.0.1", port)
        .with_behavior(BehaviorOnSessionEnd::Reconnect)
        .with_connect_timeout(2);
    let factory: Arc<dyn SessionFactory> = Arc::new(ProcessSessionFactory::new());
    let mut controller = SessionLifecycleController::new(profile, factory, RecordingHost::default());

    controller.initialize_session().await;
    controller.process_pending_events().await;

    assert_eq!(controller.state(), LifecycleState::Closed);
    assert!(!controller.is_session_open());
    let lines = controller.host().lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("not reachable"), "{lines:?}");
    assert_eq!(controller.reconnect_count(), 0);
}

#[tokio::test]
async fn invalid_profile_is_reported_inline() {
    let profile = TelnetProfile::new("broken", "", 23);
    let factory: Arc<dyn SessionFactory> = Arc::new(ProcessSessionFactory::new());
    let mut controller = SessionLifecycleController::new(profile, factory, RecordingHost::default());

    controller.initialize_session().await;

    assert_eq!(controller.state(), LifecycleState::Closed);
    assert_eq!(controller.host().count_lines("Host cannot be empty"), 1);
    assert!(controller.can_close().await);
}

#[cfg(unix)]
#[tokio::test]
async fn first_session_output_reaches_the_host() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let mut controller = scripted_client(port, "printf 'login: '; exec cat");

    controller.initialize_session().await;
    assert_eq!(controller.state(), LifecycleState::Active);

    pump_until(&mut controller, |out| out == b"login: ").await;
    assert_eq!(*controller.host().output.lock().unwrap(), b"login: ".to_vec());

    controller.send_input(b"guest\n");
    pump_until(&mut controller, |out| out.ends_with(b"guest\n")).await;
    assert_eq!(
        *controller.host().output.lock().unwrap(),
        b"login: guest\n".to_vec()
    );

    controller.close().await;
    assert!(!controller.is_session_open());
}

#[cfg(unix)]
#[tokio::test]
async fn output_survives_a_paused_host() {
    const TOTAL: usize = 3_000_000;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let mut controller = scripted_client(port, &format!("head -c {TOTAL} /dev/zero"));

    controller.initialize_session().await;
    assert_eq!(controller.state(), LifecycleState::Active);

    // The host is busy elsewhere, e.g. waiting on a dialog
    tokio::time::sleep(Duration::from_millis(1500)).await;

    pump_until(&mut controller, |_| false).await;
    assert_eq!(controller.host().output.lock().unwrap().len(), TOTAL);
    assert_eq!(controller.state(), LifecycleState::Closed);
    assert_eq!(controller.host().count_lines("session closed"), 1);
}
