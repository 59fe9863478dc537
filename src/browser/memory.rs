//! In-memory browser host.
//!
//! Implements the full boundary against a scripted set of tabs and page
//! states. Used by the demo binary and by the test suite to drive discovery,
//! relay, and notification scenarios without a real browser.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::control::state_notifier::StatusBroadcaster;
use crate::control::url_pattern::UrlPattern;
use crate::types::errors::{BrowserError, ChannelError, DeliveryError};
use crate::types::message::{StatusUpdate, ToggleResponse};
use crate::types::tab::{TabId, TabInfo};

/// State of the first `video` element in a page, as the probe would see it.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoState {
    pub visible: bool,
    pub ad_wrapped: bool,
    pub paused: bool,
    pub position: f64,
    pub duration: f64,
}

impl Default for VideoState {
    fn default() -> Self {
        Self {
            visible: true,
            ad_wrapped: false,
            paused: true,
            position: 0.0,
            duration: 600.0,
        }
    }
}

#[derive(Debug, Default)]
struct PageState {
    url: String,
    video: Option<VideoState>,
    listener_loaded: bool,
    probe_fails: bool,
    injection_fails: bool,
    injection_count: u32,
}

#[derive(Default)]
struct Inner {
    next_id: u32,
    tabs: Vec<(TabId, PageState)>,
    shortcut: Option<String>,
    broadcasts: Vec<StatusUpdate>,
    shortcut_notices: Vec<(TabId, String)>,
}

/// Scriptable in-memory host. Tabs keep their open order, which is the
/// enumeration order the locator sees.
#[derive(Default)]
pub struct MemoryBrowser {
    inner: Mutex<Inner>,
}

impl MemoryBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Poisoning only matters if a scripted panic left the state behind;
        // keep going with whatever is there.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Opens a tab with no video element.
    pub fn open_tab(&self, url: &str) -> TabId {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = TabId(inner.next_id);
        inner.tabs.push((
            id,
            PageState {
                url: url.to_string(),
                ..PageState::default()
            },
        ));
        id
    }

    /// Opens a tab whose page holds a video element and a loaded page script.
    pub fn open_video_tab(&self, url: &str, video: VideoState) -> TabId {
        let id = self.open_tab(url);
        self.with_page(id, |page| {
            page.video = Some(video);
            page.listener_loaded = true;
        });
        id
    }

    pub fn close_tab(&self, id: TabId) {
        self.lock().tabs.retain(|(tid, _)| *tid != id);
    }

    pub fn set_video(&self, id: TabId, video: Option<VideoState>) {
        self.with_page(id, |page| page.video = video);
    }

    pub fn set_listener(&self, id: TabId, loaded: bool) {
        self.with_page(id, |page| page.listener_loaded = loaded);
    }

    pub fn set_probe_failure(&self, id: TabId, fails: bool) {
        self.with_page(id, |page| page.probe_fails = fails);
    }

    pub fn set_injection_failure(&self, id: TabId, fails: bool) {
        self.with_page(id, |page| page.injection_fails = fails);
    }

    pub fn video_state(&self, id: TabId) -> Option<VideoState> {
        let inner = self.lock();
        inner
            .tabs
            .iter()
            .find(|(tid, _)| *tid == id)
            .and_then(|(_, page)| page.video.clone())
    }

    /// Number of page-script injection attempts made against the tab.
    pub fn injection_count(&self, id: TabId) -> u32 {
        let inner = self.lock();
        inner
            .tabs
            .iter()
            .find(|(tid, _)| *tid == id)
            .map(|(_, page)| page.injection_count)
            .unwrap_or(0)
    }

    /// Status updates delivered via the one-shot broadcast fallback.
    pub fn broadcasts(&self) -> Vec<StatusUpdate> {
        self.lock().broadcasts.clone()
    }

    /// `shortcutUpdated` notices delivered to page scripts.
    pub fn shortcut_notices(&self) -> Vec<(TabId, String)> {
        self.lock().shortcut_notices.clone()
    }

    fn with_page<F: FnOnce(&mut PageState)>(&self, id: TabId, f: F) {
        let mut inner = self.lock();
        if let Some((_, page)) = inner.tabs.iter_mut().find(|(tid, _)| *tid == id) {
            f(page);
        }
    }
}

#[async_trait]
impl super::TabRegistry for MemoryBrowser {
    async fn query(&self, pattern: &str) -> Vec<TabInfo> {
        let matcher = match UrlPattern::new(pattern) {
            Ok(m) => m,
            Err(_) => return Vec::new(),
        };
        let inner = self.lock();
        inner
            .tabs
            .iter()
            .filter(|(_, page)| matcher.matches(&page.url))
            .map(|(id, page)| TabInfo::new(*id, &page.url))
            .collect()
    }

    async fn get(&self, id: TabId) -> Result<TabInfo, BrowserError> {
        let inner = self.lock();
        inner
            .tabs
            .iter()
            .find(|(tid, _)| *tid == id)
            .map(|(_, page)| TabInfo::new(id, &page.url))
            .ok_or(BrowserError::TabNotFound(id))
    }

    async fn all_tabs(&self) -> Vec<TabInfo> {
        let inner = self.lock();
        inner
            .tabs
            .iter()
            .map(|(id, page)| TabInfo::new(*id, &page.url))
            .collect()
    }
}

#[async_trait]
impl super::PageScripting for MemoryBrowser {
    async fn probe_video(&self, id: TabId) -> Result<bool, BrowserError> {
        let inner = self.lock();
        let page = inner
            .tabs
            .iter()
            .find(|(tid, _)| *tid == id)
            .map(|(_, page)| page)
            .ok_or(BrowserError::TabNotFound(id))?;
        if page.probe_fails {
            return Err(BrowserError::Injection(
                "target page navigated during probe".to_string(),
            ));
        }
        Ok(page
            .video
            .as_ref()
            .map(|v| v.visible && !v.ad_wrapped)
            .unwrap_or(false))
    }

    async fn inject_page_script(&self, id: TabId) -> Result<(), BrowserError> {
        let mut inner = self.lock();
        let page = inner
            .tabs
            .iter_mut()
            .find(|(tid, _)| *tid == id)
            .map(|(_, page)| page)
            .ok_or(BrowserError::TabNotFound(id))?;
        page.injection_count += 1;
        if page.injection_fails {
            return Err(BrowserError::Injection("injection refused".to_string()));
        }
        page.listener_loaded = true;
        Ok(())
    }

    async fn apply_seek(&self, id: TabId, offset: f64) -> Result<(), BrowserError> {
        let mut inner = self.lock();
        let page = inner
            .tabs
            .iter_mut()
            .find(|(tid, _)| *tid == id)
            .map(|(_, page)| page)
            .ok_or(BrowserError::TabNotFound(id))?;
        // Mirrors the injected one-shot: skip ad-wrapped videos, clamp.
        if let Some(video) = page.video.as_mut() {
            if !video.ad_wrapped {
                video.position = (video.position + offset).clamp(0.0, video.duration);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl super::PageMessenger for MemoryBrowser {
    async fn send_toggle(&self, id: TabId) -> Result<ToggleResponse, DeliveryError> {
        let mut inner = self.lock();
        let page = inner
            .tabs
            .iter_mut()
            .find(|(tid, _)| *tid == id)
            .map(|(_, page)| page)
            .ok_or(DeliveryError::NoReceiver(id))?;
        if !page.listener_loaded {
            return Err(DeliveryError::NoReceiver(id));
        }
        match page.video.as_mut() {
            Some(video) => {
                video.paused = !video.paused;
                Ok(ToggleResponse::ok())
            }
            None => Ok(ToggleResponse::failed("no video element")),
        }
    }

    async fn notify_shortcut_updated(&self, id: TabId, shortcut: &str) {
        let mut inner = self.lock();
        let has_listener = inner
            .tabs
            .iter()
            .find(|(tid, _)| *tid == id)
            .map(|(_, page)| page.listener_loaded)
            .unwrap_or(false);
        if has_listener {
            inner.shortcut_notices.push((id, shortcut.to_string()));
        }
    }
}

#[async_trait]
impl super::ConfigStore for MemoryBrowser {
    async fn load_shortcut(&self) -> Option<String> {
        self.lock().shortcut.clone()
    }

    async fn store_shortcut(&self, shortcut: &str) {
        self.lock().shortcut = Some(shortcut.to_string());
    }
}

impl StatusBroadcaster for MemoryBrowser {
    fn broadcast(&self, update: &StatusUpdate) -> Result<(), ChannelError> {
        self.lock().broadcasts.push(update.clone());
        Ok(())
    }
}
