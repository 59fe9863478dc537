// tabpause shared type definitions
// Each submodule defines types used across the coordinator.

pub mod command;
pub mod errors;
pub mod message;
pub mod tab;
