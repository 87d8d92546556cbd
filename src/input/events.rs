//! Generic input event types for cross-host compatibility.

use std::time::Instant;

/// Generic key representation for cross-host compatibility.
///
/// Hosts map their native key codes to these values before handing events to
/// the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Space bar
    Space,
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Tab key
    Tab,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Maps a host key name to a [`Key`].
    ///
    /// Accepts single characters (case preserved), a literal space, and the
    /// named keys `Space`, `Escape`/`Esc`, `Return`/`Enter` and `Tab` in any
    /// case. Anything else maps to [`Key::Unknown`].
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return if c == ' ' { Key::Space } else { Key::Char(c) };
        }

        match name.trim().to_ascii_lowercase().as_str() {
            "space" => Key::Space,
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "tab" => Key::Tab,
            _ => Key::Unknown,
        }
    }

    /// Normalized identifier used for keybinding lookup.
    ///
    /// Characters are lowercased so bindings are case-insensitive. Returns
    /// `None` for keys that can never be bound.
    pub fn binding_name(&self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_lowercase().collect()),
            Key::Space => Some("Space".to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Tab => Some("Tab".to_string()),
            Key::Unknown => None,
        }
    }
}

/// Whether a key went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// A single raw keyboard event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub phase: KeyPhase,
    /// Monotonic timestamp of the event
    pub at: Instant,
}

impl KeyEvent {
    pub fn down(key: Key, at: Instant) -> Self {
        Self {
            key,
            phase: KeyPhase::Down,
            at,
        }
    }

    pub fn up(key: Key, at: Instant) -> Self {
        Self {
            key,
            phase: KeyPhase::Up,
            at,
        }
    }
}
