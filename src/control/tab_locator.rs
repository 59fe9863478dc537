//! Tab Locator.
//!
//! Discovers which open tab, among tabs matching the watch-page URL
//! patterns, hosts a visible non-advertisement video element. One call to
//! [`TabLocator::run_round`] is one discovery round: query every pattern,
//! merge candidates, re-validate and probe each one, and report the first
//! qualifying candidate in enumeration order.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::browser::Browser;
use crate::control::url_pattern::{watch_page_patterns, UrlPattern};
use crate::types::tab::{TabId, TabInfo};

/// Result of a discovery round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOutcome {
    /// A qualifying tab was found; `candidates` is how many tabs matched a
    /// pattern in this round.
    Found { tab: TabId, candidates: usize },
    /// Tabs matched the patterns but none passed the probe.
    NoVideo { candidates: usize },
    /// No open tab matched any pattern.
    NoTabs,
}

pub struct TabLocator {
    browser: Arc<dyn Browser>,
    patterns: Vec<UrlPattern>,
}

impl TabLocator {
    pub fn new(browser: Arc<dyn Browser>) -> Self {
        Self {
            browser,
            patterns: watch_page_patterns(),
        }
    }

    /// Runs one discovery round. The round only resolves once every
    /// candidate has reported success, failure, or error; a probe error
    /// counts the same as "no video" and never aborts sibling probes.
    pub async fn run_round(&self) -> LocateOutcome {
        let candidates = self.collect_candidates().await;
        if candidates.is_empty() {
            log::debug!("discovery round: no tabs matched any watch-page pattern");
            return LocateOutcome::NoTabs;
        }

        let mut probes = JoinSet::new();
        for (idx, tab) in candidates.iter().enumerate() {
            let browser = Arc::clone(&self.browser);
            let id = tab.id;
            probes.spawn(async move {
                // Handles can go stale between enumeration and probe.
                if browser.get(id).await.is_err() {
                    log::debug!("probe skipped, tab {} is gone", id);
                    return (idx, false);
                }
                match browser.probe_video(id).await {
                    Ok(qualifies) => (idx, qualifies),
                    Err(e) => {
                        log::debug!("probe of tab {} failed: {}", id, e);
                        (idx, false)
                    }
                }
            });
        }

        let mut qualifying: Option<usize> = None;
        while let Some(joined) = probes.join_next().await {
            if let Ok((idx, true)) = joined {
                qualifying = Some(qualifying.map_or(idx, |best: usize| best.min(idx)));
            }
        }

        match qualifying {
            Some(idx) => {
                let tab = candidates[idx].id;
                log::debug!("discovery round: connected to tab {}", tab);
                LocateOutcome::Found {
                    tab,
                    candidates: candidates.len(),
                }
            }
            None => {
                log::debug!(
                    "discovery round: {} candidate(s), none with a usable video",
                    candidates.len()
                );
                LocateOutcome::NoVideo {
                    candidates: candidates.len(),
                }
            }
        }
    }

    /// Concurrent fan-out over the pattern set, merged into one candidate
    /// list in pattern order with duplicates removed.
    async fn collect_candidates(&self) -> Vec<TabInfo> {
        let mut queries = JoinSet::new();
        for (idx, pattern) in self.patterns.iter().enumerate() {
            let browser = Arc::clone(&self.browser);
            let pattern = pattern.as_str().to_string();
            queries.spawn(async move { (idx, browser.query(&pattern).await) });
        }

        let mut per_pattern: Vec<Vec<TabInfo>> = vec![Vec::new(); self.patterns.len()];
        while let Some(joined) = queries.join_next().await {
            if let Ok((idx, tabs)) = joined {
                per_pattern[idx] = tabs;
            }
        }

        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for tabs in per_pattern {
            for tab in tabs {
                if seen.insert(tab.id) {
                    merged.push(tab);
                }
            }
        }
        merged
    }
}
