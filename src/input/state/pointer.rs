use crate::input::{host::ToolHost, tool::Tool};

use super::ToolPicker;

impl ToolPicker {
    /// Handles a click on a toolbar button.
    ///
    /// Uses the same toggle rule as the keyboard shortcuts and works whether
    /// or not shortcuts are disabled. Returns the committed tool.
    pub fn on_tool_clicked<H: ToolHost + ?Sized>(&mut self, host: &mut H, tool: Tool) -> Tool {
        let next = self.commit_selection(host, tool);
        log::debug!("Toolbar selected {} (clicked {})", next, tool);
        next
    }

    /// Handles a click on the panel disclosure button. Returns the new state.
    pub fn on_panel_toggle_clicked(&mut self) -> bool {
        self.needs_redraw = true;
        self.panel.toggle()
    }
}
