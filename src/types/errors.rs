use std::fmt;

use crate::types::tab::TabId;

// === BrowserError ===

/// Errors from the host tab registry and script injection facility.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserError {
    /// The tab handle no longer refers to a live tab.
    TabNotFound(TabId),
    /// Script injection into the tab's page context failed.
    Injection(String),
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::TabNotFound(id) => write!(f, "Tab not found: {}", id),
            BrowserError::Injection(msg) => write!(f, "Script injection failed: {}", msg),
        }
    }
}

impl std::error::Error for BrowserError {}

// === DeliveryError ===

/// Errors delivering a message to a tab's in-page script.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryError {
    /// No listener is registered in the target page (page script not loaded,
    /// e.g. the tab navigated). Recoverable once via re-injection.
    NoReceiver(TabId),
    /// Delivery failed for another reason.
    Failed(String),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::NoReceiver(id) => {
                write!(f, "No message receiver in tab: {}", id)
            }
            DeliveryError::Failed(msg) => write!(f, "Message delivery failed: {}", msg),
        }
    }
}

impl std::error::Error for DeliveryError {}

// === ChannelError ===

/// Errors on the popup control channel or the one-shot broadcast fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelError {
    /// The persistent channel is disconnected.
    Closed,
    /// Posting on the channel failed.
    Send(String),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::Closed => write!(f, "Control channel closed"),
            ChannelError::Send(msg) => write!(f, "Control channel send failed: {}", msg),
        }
    }
}

impl std::error::Error for ChannelError {}

// === ShortcutError ===

/// Errors parsing a user-configured shortcut string.
#[derive(Debug, Clone, PartialEq)]
pub enum ShortcutError {
    /// The shortcut string is empty.
    Empty,
    /// A modifier name is not one of Ctrl/Alt/Shift/Meta.
    UnknownModifier(String),
    /// The shortcut has modifiers but no terminal key.
    MissingKey,
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::Empty => write!(f, "Shortcut cannot be empty"),
            ShortcutError::UnknownModifier(name) => {
                write!(f, "Unknown modifier: {}", name)
            }
            ShortcutError::MissingKey => write!(f, "Shortcut is missing a terminal key"),
        }
    }
}

impl std::error::Error for ShortcutError {}
