//! Property-based tests for seek clamping.
//!
//! For any starting position and any sequence of rewind/fast-forward
//! commands, the playhead stays inside `[0, duration]` and never moves in
//! tabs other than the tracked one.

use std::sync::Arc;

use proptest::prelude::*;
use tabpause::browser::memory::{MemoryBrowser, VideoState};
use tabpause::control::command_relay::CommandRelay;
use tabpause::types::command::SEEK_STEP_SECS;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn playhead_stays_within_bounds(
        start in 0.0f64..7200.0,
        duration in 1.0f64..7200.0,
        steps in prop::collection::vec(any::<bool>(), 1..40)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        runtime.block_on(async {
            let browser = Arc::new(MemoryBrowser::new());
            let tab = browser.open_video_tab(
                "https://www.bilibili.com/video/BV1",
                VideoState {
                    position: start.min(duration),
                    duration,
                    ..VideoState::default()
                },
            );
            let bystander = browser.open_video_tab(
                "https://www.bilibili.com/video/BV2",
                VideoState {
                    position: 30.0,
                    duration: 60.0,
                    ..VideoState::default()
                },
            );
            let relay = CommandRelay::new(browser.clone());

            for forward in &steps {
                let offset = if *forward { SEEK_STEP_SECS } else { -SEEK_STEP_SECS };
                relay.seek(tab, offset).await;
                let position = browser.video_state(tab).map(|v| v.position).unwrap_or(-1.0);
                prop_assert!(position >= 0.0, "position {} below zero", position);
                prop_assert!(
                    position <= duration,
                    "position {} beyond duration {}",
                    position,
                    duration
                );
            }

            prop_assert_eq!(
                browser.video_state(bystander).map(|v| v.position),
                Some(30.0)
            );
            Ok(())
        })?;
    }
}
