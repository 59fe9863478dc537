//! In-page shortcut handling.
//!
//! A user-configured string such as `Ctrl+Shift+Space` is parsed into a
//! [`ShortcutBinding`]. Each page keeps one active binding, refreshed from
//! the synced configuration at page load and again when the background
//! broadcasts an update.

use std::fmt;

use crate::types::errors::ShortcutError;

/// Default binding used until the user configures their own.
pub const DEFAULT_SHORTCUT: &str = "Ctrl+Space";

/// A key-press as seen by the page: terminal key plus all four modifier
/// flags, and whether the event targets a text-entry control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    pub from_text_input: bool,
}

impl KeyEvent {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
            from_text_input: false,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.from_text_input = true;
        self
    }
}

/// A parsed modifier combination plus terminal key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutBinding {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    pub key: String,
}

impl ShortcutBinding {
    /// Parses a composite string of `+`-separated modifier names and one
    /// terminal key. Modifier names are case-insensitive; `Cmd` and
    /// `Command` are accepted for `Meta`.
    pub fn parse(input: &str) -> Result<Self, ShortcutError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ShortcutError::Empty);
        }

        let mut binding = Self {
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
            key: String::new(),
        };

        let parts: Vec<&str> = trimmed.split('+').map(|p| p.trim()).collect();
        let (modifiers, terminal) = parts.split_at(parts.len() - 1);

        for name in modifiers {
            match name.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => binding.ctrl = true,
                "alt" => binding.alt = true,
                "shift" => binding.shift = true,
                "meta" | "cmd" | "command" => binding.meta = true,
                other => return Err(ShortcutError::UnknownModifier(other.to_string())),
            }
        }

        let key = terminal[0];
        if key.is_empty() || Self::is_modifier_name(key) {
            return Err(ShortcutError::MissingKey);
        }
        binding.key = key.to_string();
        Ok(binding)
    }

    fn is_modifier_name(name: &str) -> bool {
        matches!(
            name.to_ascii_lowercase().as_str(),
            "ctrl" | "control" | "alt" | "shift" | "meta" | "cmd" | "command"
        )
    }

    /// Exact equality of all four modifier flags and case-insensitive
    /// equality of the terminal key. Events from text-entry controls never
    /// match.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.from_text_input {
            return false;
        }
        self.ctrl == event.ctrl
            && self.alt == event.alt
            && self.shift == event.shift
            && self.meta == event.meta
            && self.key.eq_ignore_ascii_case(&event.key)
    }
}

impl fmt::Display for ShortcutBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        if self.meta {
            write!(f, "Meta+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Per-page shortcut state: one active binding, falling back to the default
/// when nothing is stored or the stored string fails to parse.
pub struct PageShortcuts {
    binding: ShortcutBinding,
}

impl PageShortcuts {
    pub fn new() -> Self {
        Self {
            // The default is a literal and always parses.
            binding: ShortcutBinding::parse(DEFAULT_SHORTCUT).unwrap_or(ShortcutBinding {
                ctrl: true,
                alt: false,
                shift: false,
                meta: false,
                key: "Space".to_string(),
            }),
        }
    }

    pub fn binding(&self) -> &ShortcutBinding {
        &self.binding
    }

    /// Applies a stored shortcut string, keeping the current binding when
    /// the stored value is absent or unparseable.
    pub fn apply(&mut self, stored: Option<&str>) {
        if let Some(raw) = stored {
            match ShortcutBinding::parse(raw) {
                Ok(binding) => self.binding = binding,
                Err(e) => log::warn!("ignoring stored shortcut {:?}: {}", raw, e),
            }
        }
    }

    /// Whether this key press should trigger the toggle action (and have
    /// its default handling suppressed).
    pub fn handle_key(&self, event: &KeyEvent) -> bool {
        self.binding.matches(event)
    }
}

impl Default for PageShortcuts {
    fn default() -> Self {
        Self::new()
    }
}
