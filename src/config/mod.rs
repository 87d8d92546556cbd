//! Configuration file support for toolswitch.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/toolswitch/config.toml`. Settings include keyboard debounce,
//! panel defaults, and the shortcut table.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use keybindings::{Action, KeyBinding, KeyBindingError, KeybindingsConfig};
pub use types::{KeyboardConfig, PanelConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound for the debounce window.
const MAX_DEBOUNCE_MS: u64 = 2000;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [keyboard]
/// debounce_ms = 150
/// shortcuts_enabled = true
///
/// [panel]
/// open_on_start = false
///
/// [keybindings]
/// select_pen = ["P"]
/// momentary_hand = ["Space"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Keyboard shortcut behaviour
    #[serde(default)]
    pub keyboard: KeyboardConfig,

    /// Shape panel preferences
    #[serde(default)]
    pub panel: PanelConfig,

    /// Key → action table
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `keyboard.debounce_ms`: 0 - 2000
    fn validate_and_clamp(&mut self) {
        if self.keyboard.debounce_ms > MAX_DEBOUNCE_MS {
            log::warn!(
                "Invalid debounce_ms {}, clamping to 0-{} range",
                self.keyboard.debounce_ms,
                MAX_DEBOUNCE_MS
            );
            self.keyboard.debounce_ms = MAX_DEBOUNCE_MS;
        }
    }

    /// Overrides `keyboard.debounce_ms`, clamping it like a value read from file.
    pub fn set_debounce_ms(&mut self, ms: u64) {
        self.keyboard.debounce_ms = ms;
        self.validate_and_clamp();
    }

    /// Debounce window as a [`Duration`], never longer than the clamp bound.
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.keyboard.debounce_ms.min(MAX_DEBOUNCE_MS))
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("toolswitch");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML and writes it to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Writes a default configuration file, refusing to overwrite an existing one.
    pub fn create_default_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        Self::default().save_to(path)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
