//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Keyboard shortcut behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeyboardConfig {
    /// Minimum time between accepted key presses in milliseconds (valid range: 0 - 2000).
    /// Protects against auto-repeat flooding while a key is held.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Whether keyboard shortcuts start enabled.
    /// Hosts can still suppress shortcuts at runtime (e.g. while a text field has focus).
    #[serde(default = "default_shortcuts_enabled")]
    pub shortcuts_enabled: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            shortcuts_enabled: default_shortcuts_enabled(),
        }
    }
}

/// Shape sub-panel preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PanelConfig {
    /// Open the shape panel when the picker is mounted
    #[serde(default)]
    pub open_on_start: bool,
}

fn default_debounce_ms() -> u64 {
    150
}

fn default_shortcuts_enabled() -> bool {
    true
}
