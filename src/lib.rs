//! tabpause — background coordinator for remote play/pause control of
//! streaming-site video tabs.
//!
//! This library crate exposes all modules for use by the binary and
//! integration tests.

pub mod app;
pub mod browser;
pub mod control;
pub mod types;
