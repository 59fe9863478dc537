//! Host browser boundary for tabpause.
//!
//! The coordinator never talks to a real browser directly; it consumes these
//! trait seams. `MemoryBrowser` implements all of them for the demo binary
//! and the test suite.

pub mod memory;

use async_trait::async_trait;

use crate::types::errors::{BrowserError, DeliveryError};
use crate::types::message::ToggleResponse;
use crate::types::tab::{TabId, TabInfo};

/// Tab/window registry: query by URL pattern, validate handles, enumerate.
#[async_trait]
pub trait TabRegistry: Send + Sync {
    /// Tabs whose URL matches the given `*`-glob pattern, in registry order.
    async fn query(&self, pattern: &str) -> Vec<TabInfo>;

    /// Current snapshot of a tab, or `TabNotFound` if the handle is stale.
    async fn get(&self, id: TabId) -> Result<TabInfo, BrowserError>;

    /// Every open tab, regardless of URL.
    async fn all_tabs(&self) -> Vec<TabInfo>;
}

/// Script injection facility: run short-lived functions in a tab's page.
#[async_trait]
pub trait PageScripting: Send + Sync {
    /// Injects the video probe: does the page hold a `video` element that is
    /// layout-visible and not nested in an advertisement wrapper?
    async fn probe_video(&self, id: TabId) -> Result<bool, BrowserError>;

    /// (Re)injects the page script that listens for toggle requests.
    async fn inject_page_script(&self, id: TabId) -> Result<(), BrowserError>;

    /// Injects a one-shot seek: moves the first non-ad video by `offset`
    /// seconds, clamped to `[0, duration]` in page context.
    async fn apply_seek(&self, id: TabId, offset: f64) -> Result<(), BrowserError>;
}

/// Cross-context messaging to a tab's in-page script.
#[async_trait]
pub trait PageMessenger: Send + Sync {
    /// Requests a play/pause flip from the page script. A missing listener is
    /// reported as `DeliveryError::NoReceiver`, distinct from a normal
    /// `success=false` response.
    async fn send_toggle(&self, id: TabId) -> Result<ToggleResponse, DeliveryError>;

    /// Tells the page script the custom shortcut changed. Best-effort; tabs
    /// without a page script simply miss the broadcast.
    async fn notify_shortcut_updated(&self, id: TabId, shortcut: &str);
}

/// Persisted key-value configuration, synced across the user's profile.
/// Holds the single user-chosen shortcut string.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load_shortcut(&self) -> Option<String>;
    async fn store_shortcut(&self, shortcut: &str);
}

/// Everything the coordinator needs from the host, bundled for wiring.
pub trait Browser: TabRegistry + PageScripting + PageMessenger + ConfigStore {}

impl<T: TabRegistry + PageScripting + PageMessenger + ConfigStore> Browser for T {}
