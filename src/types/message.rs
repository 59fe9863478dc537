use serde::{Deserialize, Serialize};

use crate::types::tab::TabId;

/// Response from the in-page script after a toggle request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToggleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: &str) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Human-readable status pushed from the coordinator to the popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub action: String,
    pub message: String,
}

impl StatusUpdate {
    pub fn new(message: &str) -> Self {
        Self {
            action: "updateStatus".to_string(),
            message: message.to_string(),
        }
    }
}

/// Snapshot returned to the popup's `getDebugInfo` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub tracked_tab: Option<TabId>,
    pub status: String,
    pub last_updated: i64,
}
