use serde::{Deserialize, Serialize};

/// Fixed seek offset in seconds for rewind / fast-forward.
pub const SEEK_STEP_SECS: f64 = 10.0;

/// A playback control command, triggered from the popup button or from a
/// host-level keyboard command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    TogglePlayback,
    SeekBackward,
    SeekForward,
}

impl Command {
    /// Maps a named host command (the keyboard-shortcut command registry)
    /// to a playback command.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "toggle-playback" => Some(Command::TogglePlayback),
            "rewind" => Some(Command::SeekBackward),
            "fast-forward" => Some(Command::SeekForward),
            _ => None,
        }
    }

    /// Seek offset in seconds, negative for backward. Zero for toggle.
    pub fn seek_offset(&self) -> f64 {
        match self {
            Command::TogglePlayback => 0.0,
            Command::SeekBackward => -SEEK_STEP_SECS,
            Command::SeekForward => SEEK_STEP_SECS,
        }
    }
}
