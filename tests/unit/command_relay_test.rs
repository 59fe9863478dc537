use std::sync::Arc;

use tabpause::browser::memory::{MemoryBrowser, VideoState};
use tabpause::control::command_relay::{CommandRelay, RelayOutcome};

#[tokio::test]
async fn toggle_flips_paused_state() {
    let browser = Arc::new(MemoryBrowser::new());
    let tab = browser.open_video_tab("https://www.bilibili.com/video/BV1", VideoState::default());
    let relay = CommandRelay::new(browser.clone());

    assert_eq!(relay.deliver_toggle(tab).await, RelayOutcome::Delivered);
    assert_eq!(browser.video_state(tab).map(|v| v.paused), Some(false));

    assert_eq!(relay.deliver_toggle(tab).await, RelayOutcome::Delivered);
    assert_eq!(browser.video_state(tab).map(|v| v.paused), Some(true));
}

#[tokio::test]
async fn missing_listener_triggers_exactly_one_reinjection_then_succeeds() {
    let browser = Arc::new(MemoryBrowser::new());
    let tab = browser.open_video_tab("https://www.bilibili.com/video/BV1", VideoState::default());
    browser.set_listener(tab, false);
    let relay = CommandRelay::new(browser.clone());

    assert_eq!(relay.deliver_toggle(tab).await, RelayOutcome::Delivered);
    assert_eq!(browser.injection_count(tab), 1);
    assert_eq!(browser.video_state(tab).map(|v| v.paused), Some(false));
}

#[tokio::test]
async fn failed_reinjection_surfaces_delivery_failure() {
    let browser = Arc::new(MemoryBrowser::new());
    let tab = browser.open_video_tab("https://www.bilibili.com/video/BV1", VideoState::default());
    browser.set_listener(tab, false);
    browser.set_injection_failure(tab, true);
    let relay = CommandRelay::new(browser.clone());

    assert_eq!(relay.deliver_toggle(tab).await, RelayOutcome::DeliveryFailed);
    // One re-injection attempt, no more.
    assert_eq!(browser.injection_count(tab), 1);
    // Playback state untouched.
    assert_eq!(browser.video_state(tab).map(|v| v.paused), Some(true));
}

#[tokio::test]
async fn page_without_video_reports_no_video_element_and_is_not_retried() {
    let browser = Arc::new(MemoryBrowser::new());
    let tab = browser.open_tab("https://www.bilibili.com/video/BV1");
    browser.set_listener(tab, true);
    let relay = CommandRelay::new(browser.clone());

    assert_eq!(relay.deliver_toggle(tab).await, RelayOutcome::NoVideoElement);
    assert_eq!(browser.injection_count(tab), 0);
}

#[tokio::test]
async fn toggle_to_closed_tab_fails_after_retry() {
    let browser = Arc::new(MemoryBrowser::new());
    let tab = browser.open_video_tab("https://www.bilibili.com/video/BV1", VideoState::default());
    browser.close_tab(tab);
    let relay = CommandRelay::new(browser.clone());

    assert_eq!(relay.deliver_toggle(tab).await, RelayOutcome::DeliveryFailed);
}

#[tokio::test]
async fn seek_moves_only_the_target_tab() {
    let browser = Arc::new(MemoryBrowser::new());
    let target = browser.open_video_tab(
        "https://www.bilibili.com/video/BV1",
        VideoState {
            position: 50.0,
            ..VideoState::default()
        },
    );
    let other = browser.open_video_tab(
        "https://www.bilibili.com/video/BV2",
        VideoState {
            position: 50.0,
            ..VideoState::default()
        },
    );
    let relay = CommandRelay::new(browser.clone());

    assert_eq!(relay.seek(target, 10.0).await, RelayOutcome::SeekApplied);
    assert_eq!(browser.video_state(target).map(|v| v.position), Some(60.0));
    assert_eq!(browser.video_state(other).map(|v| v.position), Some(50.0));
}

#[tokio::test]
async fn seek_backward_clamps_to_zero() {
    let browser = Arc::new(MemoryBrowser::new());
    let tab = browser.open_video_tab(
        "https://www.bilibili.com/video/BV1",
        VideoState {
            position: 3.0,
            ..VideoState::default()
        },
    );
    let relay = CommandRelay::new(browser.clone());

    relay.seek(tab, -10.0).await;
    assert_eq!(browser.video_state(tab).map(|v| v.position), Some(0.0));
}

#[tokio::test]
async fn seek_forward_clamps_to_duration() {
    let browser = Arc::new(MemoryBrowser::new());
    let tab = browser.open_video_tab(
        "https://www.bilibili.com/video/BV1",
        VideoState {
            position: 595.0,
            duration: 600.0,
            ..VideoState::default()
        },
    );
    let relay = CommandRelay::new(browser.clone());

    relay.seek(tab, 10.0).await;
    assert_eq!(browser.video_state(tab).map(|v| v.position), Some(600.0));
}

#[tokio::test]
async fn seek_in_closed_tab_reports_failure() {
    let browser = Arc::new(MemoryBrowser::new());
    let tab = browser.open_video_tab("https://www.bilibili.com/video/BV1", VideoState::default());
    browser.close_tab(tab);
    let relay = CommandRelay::new(browser.clone());

    assert_eq!(relay.seek(tab, 10.0).await, RelayOutcome::SeekFailed);
}
