//! URL match patterns for watch pages.
//!
//! Patterns use the host-style `*` glob: `https://*.bilibili.com/video/*`.
//! A leading `*.` in the host position matches any subdomain chain,
//! including none; `*` elsewhere matches any run of characters.

use regex::Regex;

/// Watch-page URL shapes, superset across the desktop, bare-domain, and
/// mobile variants plus episode playback.
pub const WATCH_PAGE_PATTERNS: &[&str] = &[
    "https://*.bilibili.com/video/*",
    "https://*.bilibili.com/bangumi/play/*",
    "https://bilibili.com/video/*",
    "https://bilibili.com/bangumi/play/*",
    "https://m.bilibili.com/video/*",
];

/// A compiled `*`-glob URL pattern.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    pattern: String,
    regex: Regex,
}

impl UrlPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let mut re = String::from("^");
        let mut rest = pattern;
        // "scheme://*.host" — the subdomain glob is optional.
        if let Some(idx) = rest.find("://*.") {
            let (scheme, tail) = rest.split_at(idx);
            re.push_str(&regex::escape(scheme));
            re.push_str("://([^/]+\\.)?");
            rest = &tail["://*.".len()..];
        }
        for (i, part) in rest.split('*').enumerate() {
            if i > 0 {
                re.push_str(".*");
            }
            re.push_str(&regex::escape(part));
        }
        re.push('$');
        Ok(Self {
            pattern: pattern.to_string(),
            regex: Regex::new(&re)?,
        })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

/// Compiles the fixed watch-page pattern set.
pub fn watch_page_patterns() -> Vec<UrlPattern> {
    WATCH_PAGE_PATTERNS
        .iter()
        .filter_map(|p| UrlPattern::new(p).ok())
        .collect()
}

/// Whether a URL is a watch page under any known pattern. Used to filter
/// page-load-completion events.
pub fn is_watch_page_url(url: &str) -> bool {
    watch_page_patterns().iter().any(|p| p.matches(url))
}
