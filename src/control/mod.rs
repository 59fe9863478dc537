// Coordinator building blocks: discovery, relay, notification, shortcuts.

pub mod command_relay;
pub mod shortcut;
pub mod state_notifier;
pub mod tab_locator;
pub mod url_pattern;
