use std::sync::Arc;

use tabpause::browser::memory::{MemoryBrowser, VideoState};
use tabpause::control::tab_locator::{LocateOutcome, TabLocator};

fn locator(browser: &Arc<MemoryBrowser>) -> TabLocator {
    TabLocator::new(browser.clone())
}

#[tokio::test]
async fn empty_browser_reports_no_tabs() {
    let browser = Arc::new(MemoryBrowser::new());
    let outcome = locator(&browser).run_round().await;
    assert_eq!(outcome, LocateOutcome::NoTabs);
}

#[tokio::test]
async fn unrelated_tabs_report_no_tabs() {
    let browser = Arc::new(MemoryBrowser::new());
    browser.open_tab("https://github.com/");
    browser.open_tab("https://www.bilibili.com/read/cv1");
    let outcome = locator(&browser).run_round().await;
    assert_eq!(outcome, LocateOutcome::NoTabs);
}

#[tokio::test]
async fn qualifying_tab_is_found() {
    let browser = Arc::new(MemoryBrowser::new());
    browser.open_tab("https://github.com/");
    let tab = browser.open_video_tab(
        "https://www.bilibili.com/video/BV1xx411c7mD",
        VideoState::default(),
    );
    let outcome = locator(&browser).run_round().await;
    assert_eq!(
        outcome,
        LocateOutcome::Found { tab, candidates: 1 }
    );
}

#[tokio::test]
async fn first_qualifying_tab_in_enumeration_order_wins() {
    let browser = Arc::new(MemoryBrowser::new());
    let first = browser.open_video_tab("https://www.bilibili.com/video/BV1", VideoState::default());
    let _second =
        browser.open_video_tab("https://www.bilibili.com/video/BV2", VideoState::default());
    let outcome = locator(&browser).run_round().await;
    assert_eq!(
        outcome,
        LocateOutcome::Found {
            tab: first,
            candidates: 2
        }
    );
}

#[tokio::test]
async fn invisible_video_does_not_qualify() {
    let browser = Arc::new(MemoryBrowser::new());
    browser.open_video_tab(
        "https://www.bilibili.com/video/BV1",
        VideoState {
            visible: false,
            ..VideoState::default()
        },
    );
    let outcome = locator(&browser).run_round().await;
    assert_eq!(outcome, LocateOutcome::NoVideo { candidates: 1 });
}

#[tokio::test]
async fn ad_wrapped_video_does_not_qualify() {
    let browser = Arc::new(MemoryBrowser::new());
    browser.open_video_tab(
        "https://www.bilibili.com/video/BV1",
        VideoState {
            ad_wrapped: true,
            ..VideoState::default()
        },
    );
    let outcome = locator(&browser).run_round().await;
    assert_eq!(outcome, LocateOutcome::NoVideo { candidates: 1 });
}

#[tokio::test]
async fn probe_skips_ad_tab_and_picks_later_sibling() {
    let browser = Arc::new(MemoryBrowser::new());
    browser.open_video_tab(
        "https://www.bilibili.com/video/BVad",
        VideoState {
            ad_wrapped: true,
            ..VideoState::default()
        },
    );
    let good = browser.open_video_tab("https://www.bilibili.com/video/BVok", VideoState::default());
    let outcome = locator(&browser).run_round().await;
    assert_eq!(
        outcome,
        LocateOutcome::Found {
            tab: good,
            candidates: 2
        }
    );
}

#[tokio::test]
async fn probe_error_counts_as_no_video_and_does_not_abort_siblings() {
    let browser = Arc::new(MemoryBrowser::new());
    let broken = browser.open_video_tab("https://www.bilibili.com/video/BV1", VideoState::default());
    browser.set_probe_failure(broken, true);
    let good = browser.open_video_tab("https://www.bilibili.com/video/BV2", VideoState::default());
    let outcome = locator(&browser).run_round().await;
    assert_eq!(
        outcome,
        LocateOutcome::Found {
            tab: good,
            candidates: 2
        }
    );
}

#[tokio::test]
async fn watch_page_without_video_reports_no_video() {
    let browser = Arc::new(MemoryBrowser::new());
    browser.open_tab("https://www.bilibili.com/video/BV1");
    let outcome = locator(&browser).run_round().await;
    assert_eq!(outcome, LocateOutcome::NoVideo { candidates: 1 });
}

#[tokio::test]
async fn duplicate_matches_across_patterns_are_counted_once() {
    let browser = Arc::new(MemoryBrowser::new());
    // Matches both "https://*.bilibili.com/video/*" and
    // "https://bilibili.com/video/*".
    let tab = browser.open_video_tab("https://bilibili.com/video/BV1", VideoState::default());
    let outcome = locator(&browser).run_round().await;
    assert_eq!(outcome, LocateOutcome::Found { tab, candidates: 1 });
}
