use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle for a browser tab, as assigned by the host tab registry.
///
/// Handles can go stale at any time: the tab may be closed between the
/// moment the registry hands out the id and the moment it is used. Validate
/// with `TabRegistry::get` right before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a tab as reported by the tab registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub url: String,
}

impl TabInfo {
    pub fn new(id: TabId, url: &str) -> Self {
        Self {
            id,
            url: url.to_string(),
        }
    }
}
