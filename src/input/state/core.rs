//! Per-mount picker state: bindings, debounce clock, override slot and panel flag.

use crate::config::{Action, Config, KeyBinding, KeyBindingError};
use crate::input::{
    debounce::Debouncer, events::Key, host::ToolHost, panel::Panel, selector, tool::Tool,
};
use std::collections::HashMap;
use std::time::Duration;

/// Whether a momentary override is currently forcing a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideState {
    /// No key held, the persisted tool is displayed
    Idle,
    /// The momentary key is held and the hand tool is displayed
    Overriding,
}

/// Keyboard and pointer controller for a single mounted tool picker.
///
/// The persisted tool is owned by the [`ToolHost`]; the picker only keeps
/// the momentary override alongside it. The two are combined at read time in
/// [`ToolPicker::displayed_tool`], so releasing the override can never lose
/// the persisted selection.
#[derive(Debug)]
pub struct ToolPicker {
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    /// Rate limiter shared by every key-down
    pub(super) debouncer: Debouncer,
    /// Tool forced while the momentary key is held (`None` = nothing forced)
    pub(super) tool_override: Option<Tool>,
    /// Shape sub-panel visibility
    pub(super) panel: Panel,
    /// Whether the rendering collaborator should refresh
    pub(super) needs_redraw: bool,
}

impl ToolPicker {
    /// Creates a picker from a prebuilt action map.
    pub fn new(action_map: HashMap<KeyBinding, Action>, debounce_window: Duration) -> Self {
        Self {
            action_map,
            debouncer: Debouncer::new(debounce_window),
            tool_override: None,
            panel: Panel::default(),
            needs_redraw: true,
        }
    }

    /// Builds a picker from the user configuration.
    ///
    /// # Errors
    /// Returns an error if a keybinding is malformed or bound twice.
    pub fn from_config(config: &Config) -> Result<Self, KeyBindingError> {
        let action_map = config.keybindings.build_action_map()?;
        let mut picker = Self::new(action_map, config.debounce_window());
        picker.panel = Panel::new(config.panel.open_on_start);
        Ok(picker)
    }

    /// Tool the surface should present right now.
    pub fn displayed_tool<H: ToolHost + ?Sized>(&self, host: &H) -> Tool {
        self.tool_override.unwrap_or_else(|| host.current_tool())
    }

    pub fn override_state(&self) -> OverrideState {
        if self.tool_override.is_some() {
            OverrideState::Overriding
        } else {
            OverrideState::Idle
        }
    }

    pub fn is_overriding(&self) -> bool {
        self.override_state() == OverrideState::Overriding
    }

    pub fn panel_open(&self) -> bool {
        self.panel.is_open()
    }

    pub fn debounce_window(&self) -> Duration {
        self.debouncer.window()
    }

    /// Returns and clears the redraw flag.
    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Looks up the action bound to `key`, if any.
    pub fn find_action(&self, key: Key) -> Option<Action> {
        let binding = KeyBinding::for_key(key)?;
        self.action_map.get(&binding).copied()
    }

    /// Effective bindings sorted by key, for help listings.
    pub fn bindings(&self) -> Vec<(&KeyBinding, Action)> {
        let mut bindings: Vec<_> = self
            .action_map
            .iter()
            .map(|(binding, action)| (binding, *action))
            .collect();
        bindings.sort_by(|a, b| a.0.key().cmp(b.0.key()));
        bindings
    }

    /// Applies the toggle rule against the host's tool and commits the result.
    ///
    /// Shared by the keyboard and pointer paths.
    pub(super) fn commit_selection<H: ToolHost + ?Sized>(
        &mut self,
        host: &mut H,
        requested: Tool,
    ) -> Tool {
        let next = selector::select_tool(host.current_tool(), requested);
        host.set_tool(next);
        self.needs_redraw = true;
        next
    }
}
