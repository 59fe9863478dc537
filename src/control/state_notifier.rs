//! State Notifier.
//!
//! Pushes human-readable status text from the coordinator to whatever
//! control surface is open. Prefers the persistent popup channel; a broken
//! channel is dropped and the one-shot broadcast takes over. Delivery is
//! best-effort and never fails the calling operation.

use std::sync::{Arc, Mutex};

use crate::types::errors::ChannelError;
use crate::types::message::StatusUpdate;

/// Persistent duplex connection to an open popup. At most one is live.
pub trait ControlChannel: Send + Sync {
    fn post(&self, update: &StatusUpdate) -> Result<(), ChannelError>;
}

/// One-shot broadcast fallback used when no channel is registered.
pub trait StatusBroadcaster: Send + Sync {
    fn broadcast(&self, update: &StatusUpdate) -> Result<(), ChannelError>;
}

pub struct StateNotifier {
    channel: Mutex<Option<Arc<dyn ControlChannel>>>,
    fallback: Arc<dyn StatusBroadcaster>,
}

impl StateNotifier {
    pub fn new(fallback: Arc<dyn StatusBroadcaster>) -> Self {
        Self {
            channel: Mutex::new(None),
            fallback,
        }
    }

    /// Registers the popup channel. A newly opened popup supersedes any
    /// previous registration.
    pub fn register_channel(&self, channel: Arc<dyn ControlChannel>) {
        *self.lock_channel() = Some(channel);
    }

    /// Drops the channel after its disconnect signal fired.
    pub fn channel_disconnected(&self) {
        *self.lock_channel() = None;
    }

    pub fn has_channel(&self) -> bool {
        self.lock_channel().is_some()
    }

    /// Delivers a status message. Never errors outward: a channel failure
    /// discards the channel and retries via the broadcast; a broadcast
    /// failure is only logged.
    pub fn notify(&self, message: &str) {
        let update = StatusUpdate::new(message);

        let channel = self.lock_channel().clone();
        if let Some(channel) = channel {
            match channel.post(&update) {
                Ok(()) => return,
                Err(e) => {
                    log::debug!("popup channel broken, falling back: {}", e);
                    *self.lock_channel() = None;
                }
            }
        }

        if let Err(e) = self.fallback.broadcast(&update) {
            log::debug!("status broadcast failed: {}", e);
        }
    }

    fn lock_channel(&self) -> std::sync::MutexGuard<'_, Option<Arc<dyn ControlChannel>>> {
        self.channel.lock().unwrap_or_else(|e| e.into_inner())
    }
}
