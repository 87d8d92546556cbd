//! Keybinding configuration types and parsing.
//!
//! Every picker action can be bound to one or more keys. Keys are either a
//! single character (matched case-insensitively) or the named `Space` key.

use crate::input::{Key, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Select a tool using the toggle-to-deselect rule
    SelectTool(Tool),
    /// Show or hide the shape sub-panel
    TogglePanel,
    /// Force the hand tool while the key is held
    MomentaryHand,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SelectTool(tool) => write!(f, "select {}", tool.label()),
            Action::TogglePanel => f.write_str("toggle panel"),
            Action::MomentaryHand => f.write_str("hold for hand"),
        }
    }
}

/// Errors produced while parsing keybinding strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyBindingError {
    #[error("Empty keybinding string")]
    Empty,

    #[error("Unsupported key '{0}': expected a single character or Space")]
    Unsupported(String),

    #[error("Duplicate keybinding '{binding}' assigned to both {first} and {second}")]
    Duplicate {
        binding: String,
        first: Action,
        second: Action,
    },
}

/// A single normalized keybinding.
///
/// Characters are stored lowercased; the space key is stored as `Space`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    key: String,
}

impl KeyBinding {
    /// Parse a keybinding string like "P", "p" or "Space".
    pub fn parse(s: &str) -> Result<Self, KeyBindingError> {
        if s.is_empty() {
            return Err(KeyBindingError::Empty);
        }

        let key = match Key::from_name(s) {
            key @ (Key::Char(_) | Key::Space) => key,
            _ => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(KeyBindingError::Empty);
                }
                match Key::from_name(trimmed) {
                    key @ (Key::Char(_) | Key::Space) => key,
                    _ => return Err(KeyBindingError::Unsupported(trimmed.to_string())),
                }
            }
        };

        Self::for_key(key).ok_or_else(|| KeyBindingError::Unsupported(s.to_string()))
    }

    /// Builds the lookup binding for a pressed key, if the key is bindable.
    pub fn for_key(key: Key) -> Option<Self> {
        match key {
            Key::Char(_) | Key::Space => key.binding_name().map(|key| Self { key }),
            _ => None,
        }
    }

    /// Normalized key identifier.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// select_pen = ["P"]
/// select_eraser = ["E", "X"]
/// momentary_hand = ["Space"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_select_none")]
    pub select_none: Vec<String>,

    #[serde(default = "default_select_hand")]
    pub select_hand: Vec<String>,

    #[serde(default = "default_select_pen")]
    pub select_pen: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,

    #[serde(default = "default_select_text")]
    pub select_text: Vec<String>,

    #[serde(default = "default_select_line")]
    pub select_line: Vec<String>,

    /// The square button is hidden in the toolbar; the shortcut stays live.
    #[serde(default = "default_select_square")]
    pub select_square: Vec<String>,

    /// The triangle button is hidden in the toolbar; the shortcut stays live.
    #[serde(default = "default_select_triangle")]
    pub select_triangle: Vec<String>,

    #[serde(default = "default_toggle_panel")]
    pub toggle_panel: Vec<String>,

    #[serde(default = "default_momentary_hand")]
    pub momentary_hand: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            select_none: default_select_none(),
            select_hand: default_select_hand(),
            select_pen: default_select_pen(),
            select_eraser: default_select_eraser(),
            select_text: default_select_text(),
            select_line: default_select_line(),
            select_square: default_select_square(),
            select_triangle: default_select_triangle(),
            toggle_panel: default_toggle_panel(),
            momentary_hand: default_momentary_hand(),
        }
    }
}

impl KeybindingsConfig {
    fn entries(&self) -> [(&[String], Action); 10] {
        [
            (self.select_none.as_slice(), Action::SelectTool(Tool::None)),
            (self.select_hand.as_slice(), Action::SelectTool(Tool::Hand)),
            (self.select_pen.as_slice(), Action::SelectTool(Tool::Pen)),
            (self.select_eraser.as_slice(), Action::SelectTool(Tool::Eraser)),
            (self.select_text.as_slice(), Action::SelectTool(Tool::Text)),
            (self.select_line.as_slice(), Action::SelectTool(Tool::Line)),
            (self.select_square.as_slice(), Action::SelectTool(Tool::Square)),
            (self.select_triangle.as_slice(), Action::SelectTool(Tool::Triangle)),
            (self.toggle_panel.as_slice(), Action::TogglePanel),
            (self.momentary_hand.as_slice(), Action::MomentaryHand),
        ]
    }

    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, KeyBindingError> {
        let mut map = HashMap::new();

        for (bindings, action) in self.entries() {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing) = map.insert(binding.clone(), action) {
                    return Err(KeyBindingError::Duplicate {
                        binding: binding_str.clone(),
                        first: existing,
                        second: action,
                    });
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_select_none() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_select_hand() -> Vec<String> {
    vec!["H".to_string()]
}

fn default_select_pen() -> Vec<String> {
    vec!["P".to_string()]
}

fn default_select_eraser() -> Vec<String> {
    vec!["E".to_string()]
}

fn default_select_text() -> Vec<String> {
    vec!["A".to_string()]
}

fn default_select_line() -> Vec<String> {
    vec!["L".to_string()]
}

fn default_select_square() -> Vec<String> {
    vec!["S".to_string()]
}

fn default_select_triangle() -> Vec<String> {
    vec!["I".to_string()]
}

fn default_toggle_panel() -> Vec<String> {
    vec!["T".to_string()]
}

fn default_momentary_hand() -> Vec<String> {
    vec!["Space".to_string()]
}
