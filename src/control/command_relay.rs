//! Command Relay.
//!
//! Delivers playback commands to the tracked tab. Toggle goes through the
//! in-page listener, with one re-injection retry when the listener is
//! missing. Seek bypasses the listener entirely and runs as an injected
//! one-shot, clamped to `[0, duration]` in page context.

use std::sync::Arc;

use crate::browser::Browser;
use crate::types::errors::DeliveryError;
use crate::types::tab::TabId;

/// What became of a relayed command. Consumed by the coordinator to pick a
/// status message, and by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The page script flipped playback and reported success.
    Delivered,
    /// The page responded but found no video element. Not retried.
    NoVideoElement,
    /// Delivery failed even after one re-injection retry.
    DeliveryFailed,
    /// No tab is tracked; nothing was sent.
    NoTrackedTab,
    /// Seek applied against the tracked tab.
    SeekApplied,
    /// The injected seek raised an error.
    SeekFailed,
}

pub struct CommandRelay {
    browser: Arc<dyn Browser>,
}

impl CommandRelay {
    pub fn new(browser: Arc<dyn Browser>) -> Self {
        Self { browser }
    }

    /// Sends the toggle request to the tab's in-page script. A missing
    /// listener gets exactly one re-injection followed by one retry; any
    /// further failure is surfaced as `DeliveryFailed`.
    pub async fn deliver_toggle(&self, tab: TabId) -> RelayOutcome {
        match self.browser.send_toggle(tab).await {
            Ok(resp) if resp.success => RelayOutcome::Delivered,
            Ok(resp) => {
                log::warn!(
                    "tab {} reported toggle failure: {}",
                    tab,
                    resp.error.as_deref().unwrap_or("no response detail")
                );
                RelayOutcome::NoVideoElement
            }
            Err(DeliveryError::NoReceiver(_)) => {
                log::debug!("no listener in tab {}, re-injecting page script", tab);
                if let Err(e) = self.browser.inject_page_script(tab).await {
                    log::warn!("page script re-injection into tab {} failed: {}", tab, e);
                    return RelayOutcome::DeliveryFailed;
                }
                match self.browser.send_toggle(tab).await {
                    Ok(resp) if resp.success => RelayOutcome::Delivered,
                    Ok(_) => RelayOutcome::NoVideoElement,
                    Err(e) => {
                        log::warn!("toggle retry to tab {} failed: {}", tab, e);
                        RelayOutcome::DeliveryFailed
                    }
                }
            }
            Err(e) => {
                log::warn!("toggle delivery to tab {} failed: {}", tab, e);
                RelayOutcome::DeliveryFailed
            }
        }
    }

    /// Runs the injected seek against the tracked tab only. No retry policy;
    /// failures are logged and surfaced as `SeekFailed`.
    pub async fn seek(&self, tab: TabId, offset: f64) -> RelayOutcome {
        match self.browser.apply_seek(tab, offset).await {
            Ok(()) => RelayOutcome::SeekApplied,
            Err(e) => {
                log::warn!("seek in tab {} failed: {}", tab, e);
                RelayOutcome::SeekFailed
            }
        }
    }
}
