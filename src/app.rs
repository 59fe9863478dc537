//! Coordinator core for tabpause.
//!
//! Owns the single tracked-tab state and all of its mutation points:
//! `locate()`, `relay()`, `notify()`, and the tab-lifecycle event hooks.
//! Discovery rounds are fenced with a monotonically increasing round
//! counter so a slow round can never overwrite a fresher result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::browser::Browser;
use crate::control::command_relay::{CommandRelay, RelayOutcome};
use crate::control::state_notifier::{ControlChannel, StateNotifier, StatusBroadcaster};
use crate::control::tab_locator::{LocateOutcome, TabLocator};
use crate::control::url_pattern::is_watch_page_url;
use crate::types::command::Command;
use crate::types::message::DebugInfo;
use crate::types::tab::TabId;

/// How often the periodic discovery round runs.
pub const LOCATE_INTERVAL: Duration = Duration::from_secs(5);

pub mod status {
    //! Status text surfaced to the popup. Users only ever see these
    //! strings, never raw fault objects.

    pub const NO_PAGE_FOUND: &str = "no open video page found";
    pub const NO_VIDEO_ELEMENT: &str = "video pages found, but none with a usable video element";
    pub const PAGE_CLOSED: &str = "video page closed, waiting for a new one...";
    pub const PAGE_SCRIPT_READY: &str = "page script loaded, connected to video page";
    pub const TOGGLE_SENT: &str = "play/pause command sent";
    pub const TOGGLE_NO_VIDEO: &str = "video control failed (no video element)";
    pub const TOGGLE_UNDELIVERABLE: &str = "cannot control video (page script not loaded)";
    pub const RELOCATING: &str = "no controllable video, searching again...";
    pub const STILL_NOT_FOUND: &str = "no controllable video found, make sure a video page is open";
    pub const NO_SEEK_TARGET: &str = "no controllable video tab for seeking";

    pub fn connected(candidates: usize) -> String {
        format!("connected to video page ({} available)", candidates)
    }
}

#[derive(Debug, Default)]
struct TrackedState {
    tab: Option<TabId>,
    /// Round number whose outcome last touched `tab`. Rounds are allowed to
    /// overlap; writes from a round older than this are discarded.
    round: u64,
    last_updated: i64,
}

/// Background coordinator: one instance per extension process.
pub struct Coordinator {
    browser: Arc<dyn Browser>,
    locator: TabLocator,
    relay: CommandRelay,
    notifier: StateNotifier,
    state: Mutex<TrackedState>,
    rounds: AtomicU64,
}

impl Coordinator {
    /// Wires the coordinator against a browser host. The fallback
    /// broadcaster carries status updates whenever no popup channel is
    /// registered.
    pub fn new(browser: Arc<dyn Browser>, fallback: Arc<dyn StatusBroadcaster>) -> Self {
        Self {
            locator: TabLocator::new(Arc::clone(&browser)),
            relay: CommandRelay::new(Arc::clone(&browser)),
            notifier: StateNotifier::new(fallback),
            browser,
            state: Mutex::new(TrackedState::default()),
            rounds: AtomicU64::new(0),
        }
    }

    /// Startup sequence: run the initial discovery round. The periodic
    /// loop is spawned separately via [`spawn_periodic_locate`].
    pub async fn startup(&self) {
        self.locate().await;
    }

    /// The tab currently believed to host a controllable video.
    pub fn tracked_tab(&self) -> Option<TabId> {
        self.lock_state().tab
    }

    /// Runs one discovery round and applies its outcome, unless a newer
    /// round finished first. Returns the tracked tab after the round.
    pub async fn locate(&self) -> Option<TabId> {
        let round = self.rounds.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = self.locator.run_round().await;
        self.apply_locate_outcome(round, outcome)
    }

    fn apply_locate_outcome(&self, round: u64, outcome: LocateOutcome) -> Option<TabId> {
        let message;
        {
            let mut state = self.lock_state();
            if round < state.round {
                log::debug!("discarding stale discovery round {}", round);
                return state.tab;
            }
            state.round = round;
            state.last_updated = Self::now();
            match outcome {
                LocateOutcome::Found { tab, candidates } => {
                    state.tab = Some(tab);
                    message = status::connected(candidates);
                }
                LocateOutcome::NoVideo { .. } => {
                    state.tab = None;
                    message = status::NO_VIDEO_ELEMENT.to_string();
                }
                LocateOutcome::NoTabs => {
                    state.tab = None;
                    message = status::NO_PAGE_FOUND.to_string();
                }
            }
        }
        self.notify(&message);
        self.tracked_tab()
    }

    /// Relays a playback command to the tracked tab, locating one first if
    /// the cache is empty (toggle) or unconditionally (seek).
    pub async fn relay(&self, command: Command) -> RelayOutcome {
        match command {
            Command::TogglePlayback => self.relay_toggle().await,
            Command::SeekBackward | Command::SeekForward => {
                self.relay_seek(command.seek_offset()).await
            }
        }
    }

    async fn relay_toggle(&self) -> RelayOutcome {
        let tab = match self.tracked_tab() {
            Some(tab) => tab,
            None => {
                self.notify(status::RELOCATING);
                match self.locate().await {
                    Some(tab) => tab,
                    None => {
                        self.notify(status::STILL_NOT_FOUND);
                        return RelayOutcome::NoTrackedTab;
                    }
                }
            }
        };

        let outcome = self.relay.deliver_toggle(tab).await;
        match outcome {
            RelayOutcome::Delivered => self.notify(status::TOGGLE_SENT),
            RelayOutcome::NoVideoElement => self.notify(status::TOGGLE_NO_VIDEO),
            RelayOutcome::DeliveryFailed => {
                self.notify(status::TOGGLE_UNDELIVERABLE);
                // The cached handle earned no trust; find a fresh one.
                self.clear_tracked();
                self.locate().await;
            }
            _ => {}
        }
        outcome
    }

    async fn relay_seek(&self, offset: f64) -> RelayOutcome {
        self.locate().await;
        match self.tracked_tab() {
            Some(tab) => self.relay.seek(tab, offset).await,
            None => {
                self.notify(status::NO_SEEK_TARGET);
                RelayOutcome::NoTrackedTab
            }
        }
    }

    /// Sends status text to the popup (or the broadcast fallback).
    pub fn notify(&self, message: &str) {
        self.notifier.notify(message);
    }

    pub fn register_channel(&self, channel: Arc<dyn ControlChannel>) {
        self.notifier.register_channel(channel);
    }

    pub fn channel_disconnected(&self) {
        self.notifier.channel_disconnected();
    }

    /// Host keyboard command registry entry point.
    pub async fn handle_command(&self, name: &str) -> RelayOutcome {
        match Command::from_name(name) {
            Some(command) => self.relay(command).await,
            None => {
                log::debug!("ignoring unknown command {:?}", name);
                RelayOutcome::NoTrackedTab
            }
        }
    }

    /// Tab-removal hook. Clears the tracked tab only when the removed id is
    /// the tracked one.
    pub fn handle_tab_removed(&self, id: TabId) {
        let was_tracked = {
            let mut state = self.lock_state();
            if state.tab == Some(id) {
                state.tab = None;
                state.last_updated = Self::now();
                true
            } else {
                false
            }
        };
        if was_tracked {
            log::debug!("tracked tab {} closed", id);
            self.notify(status::PAGE_CLOSED);
        }
    }

    /// Page-load-completion hook: re-discover whenever a watch page
    /// finishes loading.
    pub async fn handle_navigation_complete(&self, url: &str) {
        if is_watch_page_url(url) {
            log::debug!("watch page finished loading: {}", url);
            self.locate().await;
        }
    }

    /// A freshly loaded page script announced itself; adopt its tab.
    pub fn handle_page_ready(&self, id: TabId) {
        {
            let mut state = self.lock_state();
            state.tab = Some(id);
            state.last_updated = Self::now();
        }
        log::debug!("page script ready in tab {}", id);
        self.notify(status::PAGE_SCRIPT_READY);
    }

    /// Persists a new custom shortcut and broadcasts it to every open tab.
    /// Tabs without a page script miss the broadcast; they pick the change
    /// up from storage on their next load.
    pub async fn update_shortcut(&self, shortcut: &str) {
        self.browser.store_shortcut(shortcut).await;
        for tab in self.browser.all_tabs().await {
            self.browser.notify_shortcut_updated(tab.id, shortcut).await;
        }
        log::debug!("custom shortcut updated to {:?}", shortcut);
    }

    /// Snapshot for the popup's debug request.
    pub fn debug_info(&self) -> DebugInfo {
        let state = self.lock_state();
        DebugInfo {
            tracked_tab: state.tab,
            status: if state.tab.is_some() {
                "connected".to_string()
            } else {
                "disconnected".to_string()
            },
            last_updated: state.last_updated,
        }
    }

    fn clear_tracked(&self) {
        let mut state = self.lock_state();
        state.tab = None;
        state.last_updated = Self::now();
    }

    fn lock_state(&self) -> MutexGuard<'_, TrackedState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

/// Spawns the fixed-interval discovery loop. The handle can be aborted on
/// shutdown; nothing else cancels a running round.
pub fn spawn_periodic_locate(
    coordinator: Arc<Coordinator>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            coordinator.locate().await;
        }
    })
}
