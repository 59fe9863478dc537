//! tabpause — background coordinator for remote play/pause control of
//! streaming-site video tabs.
//!
//! Entry point: runs a console demo against the in-memory browser host,
//! walking discovery, relay, notification, and shortcut handling.

use std::sync::Arc;
use std::time::Duration;

use tabpause::app::{spawn_periodic_locate, Coordinator, LOCATE_INTERVAL};
use tabpause::browser::memory::{MemoryBrowser, VideoState};
use tabpause::browser::ConfigStore;
use tabpause::control::shortcut::{KeyEvent, PageShortcuts};
use tabpause::control::state_notifier::ControlChannel;
use tabpause::types::command::Command;
use tabpause::types::errors::ChannelError;
use tabpause::types::message::StatusUpdate;

/// Console stand-in for the popup's persistent channel.
struct ConsoleChannel;

impl ControlChannel for ConsoleChannel {
    fn post(&self, update: &StatusUpdate) -> Result<(), ChannelError> {
        println!("  [popup] {}", update.message);
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  tabpause v{} — demo mode (in-memory browser host)", env!("CARGO_PKG_VERSION"));
    println!("═══════════════════════════════════════════════════════════════");

    let browser = Arc::new(MemoryBrowser::new());
    let coordinator = Arc::new(Coordinator::new(browser.clone(), browser.clone()));

    section("Discovery");
    browser.open_tab("https://github.com/rust-lang/rust");
    let tab = browser.open_video_tab("https://www.bilibili.com/video/BV1xx411c7mD", VideoState::default());
    coordinator.register_channel(Arc::new(ConsoleChannel));
    coordinator.startup().await;
    println!("  tracked tab: {:?}", coordinator.tracked_tab());

    section("Toggle playback");
    coordinator.relay(Command::TogglePlayback).await;
    println!(
        "  video paused: {:?}",
        browser.video_state(tab).map(|v| v.paused)
    );

    section("Seek");
    coordinator.relay(Command::SeekForward).await;
    coordinator.relay(Command::SeekForward).await;
    coordinator.relay(Command::SeekBackward).await;
    println!(
        "  position after +10 +10 -10: {:?}",
        browser.video_state(tab).map(|v| v.position)
    );

    section("Custom shortcut");
    coordinator.update_shortcut("Ctrl+Shift+Space").await;
    let mut page = PageShortcuts::new();
    page.apply(browser.load_shortcut().await.as_deref());
    let hit = page.handle_key(&KeyEvent::new("Space").ctrl().shift());
    println!("  binding: {}  Ctrl+Shift+Space pressed -> toggle: {}", page.binding(), hit);

    section("Tab close and periodic rediscovery");
    let periodic = spawn_periodic_locate(coordinator.clone(), LOCATE_INTERVAL);
    browser.close_tab(tab);
    coordinator.handle_tab_removed(tab);
    println!("  tracked tab: {:?}", coordinator.tracked_tab());
    tokio::time::sleep(Duration::from_millis(50)).await;
    periodic.abort();

    section("Debug info");
    match serde_json::to_string_pretty(&coordinator.debug_info()) {
        Ok(json) => println!("{}", json),
        Err(e) => println!("  debug info unavailable: {}", e),
    }

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  demo finished");
    println!("═══════════════════════════════════════════════════════════════");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}
