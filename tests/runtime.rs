use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, time::timeout};

use match_panel::{
    state::{Control, PanelSnapshot, StateReceivers},
    tasks::{banner_task, tick_dispatch_task},
    AppState, PanelSettings,
};

fn spawn_state(settings: PanelSettings) -> Arc<AppState> {
    let (state, receivers) = AppState::new(settings, 0, "127.0.0.1".to_string());
    let state = Arc::new(state);
    let StateReceivers { ticks, notifications } = receivers;
    tokio::spawn(tick_dispatch_task(Arc::clone(&state), ticks));
    tokio::spawn(banner_task(Arc::clone(&state), notifications));
    state
}

async fn wait_for<F>(rx: &mut watch::Receiver<PanelSnapshot>, mut predicate: F) -> PanelSnapshot
where
    F: FnMut(&PanelSnapshot) -> bool,
{
    let wait = async {
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if predicate(&*snapshot) {
                    return snapshot.clone();
                }
            }
            rx.changed().await.expect("snapshot channel closed");
        }
    };
    timeout(Duration::from_secs(600), wait)
        .await
        .expect("panel never reached the expected state")
}

#[tokio::test(start_paused = true)]
async fn blue_card_expires_and_banner_clears() {
    let settings = PanelSettings {
        blue_secs: 5,
        ..PanelSettings::default()
    };
    let state = spawn_state(settings);
    let mut rx = state.subscribe();

    state.activate(Control::StartRealTime).unwrap();
    state.activate(Control::BlueCard).unwrap();

    let shown = wait_for(&mut rx, |s| s.banner.is_some()).await;
    let banner = shown.banner.clone().unwrap();
    assert_eq!(banner.message, "Blue card timer finished");
    assert!(shown.timers.is_empty());
    assert!(shown.real_time.is_some());

    let cleared = wait_for(&mut rx, |s| s.banner.is_none()).await;
    assert!(cleared.timers.is_empty());
}

#[tokio::test(start_paused = true)]
async fn paused_match_holds_penalties() {
    let state = spawn_state(PanelSettings::default());
    let mut rx = state.subscribe();

    state.activate(Control::StartRealTime).unwrap();
    state.activate(Control::YellowCard).unwrap();
    wait_for(&mut rx, |s| s.timers.first().is_some_and(|t| t.remaining_seconds <= 50)).await;

    let paused = state.activate(Control::PauseGameTime).unwrap();
    let held = paused.timers[0].remaining_seconds;

    tokio::time::sleep(Duration::from_secs(5)).await;
    let later = state.get_snapshot().unwrap();
    assert_eq!(later.timers[0].remaining_seconds, held);
    assert_eq!(later.match_elapsed_seconds, paused.match_elapsed_seconds);

    state.activate(Control::ResumeGameTime).unwrap();
    let finished = wait_for(&mut rx, |s| s.banner.is_some()).await;
    assert_eq!(
        finished.banner.map(|b| b.message).as_deref(),
        Some("Yellow card timer finished")
    );
}
