use crate::config::Action;
use crate::input::{events::Key, host::ToolHost, tool::Tool};
use std::time::Instant;

use super::ToolPicker;

impl ToolPicker {
    /// Processes a key press event.
    ///
    /// Presses are ignored entirely while the host reports shortcuts as
    /// disabled. Otherwise every press, bound or not, goes through the shared
    /// debounce clock first; presses inside the window are dropped without any
    /// side effect.
    pub fn on_key_down<H: ToolHost + ?Sized>(&mut self, host: &mut H, key: Key, at: Instant) {
        if host.shortcuts_disabled() {
            return;
        }

        if !self.debouncer.accept(at) {
            return;
        }

        if let Some(action) = self.find_action(key) {
            self.handle_action(host, action);
        }
    }

    /// Handle an action triggered by a keybinding.
    pub(super) fn handle_action<H: ToolHost + ?Sized>(&mut self, host: &mut H, action: Action) {
        match action {
            Action::SelectTool(requested) => {
                let next = self.commit_selection(host, requested);
                log::debug!("Shortcut selected {} (requested {})", next, requested);
            }
            Action::TogglePanel => {
                let open = self.panel.toggle();
                self.needs_redraw = true;
                log::debug!("Shortcut toggled panel (open: {})", open);
            }
            Action::MomentaryHand => {
                if self.tool_override.is_none() {
                    self.tool_override = Some(Tool::Hand);
                    self.needs_redraw = true;
                    log::debug!("Momentary hand override engaged");
                }
            }
        }
    }

    /// Processes a key release event.
    ///
    /// Releases are never debounced. Releasing a momentary key clears the
    /// override even while shortcuts are disabled; releasing a key that was
    /// never seen going down is a no-op.
    pub fn on_key_up(&mut self, key: Key) {
        if self.find_action(key) != Some(Action::MomentaryHand) {
            return;
        }

        if self.tool_override.take().is_some() {
            self.needs_redraw = true;
            log::debug!("Momentary hand override released");
        }
    }
}
