//! Collaborator seam between the picker and the application that owns the tool.

use super::tool::Tool;

/// Application side of the tool picker.
///
/// The host owns the persisted tool and the "shortcuts disabled" flag (set,
/// for example, while a text field elsewhere has focus). The picker reads both
/// on every event and reports tool changes through [`ToolHost::set_tool`].
pub trait ToolHost {
    /// Tool currently persisted by the application.
    fn current_tool(&self) -> Tool;

    /// Requests a tool change.
    fn set_tool(&mut self, tool: Tool);

    /// Whether keyboard shortcuts must be ignored right now.
    fn shortcuts_disabled(&self) -> bool {
        false
    }
}

/// Minimal in-memory host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSlot {
    pub tool: Tool,
    pub shortcuts_disabled: bool,
    /// Number of tool change requests received
    pub updates: usize,
}

impl ToolSlot {
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            ..Self::default()
        }
    }
}

impl ToolHost for ToolSlot {
    fn current_tool(&self) -> Tool {
        self.tool
    }

    fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.updates += 1;
    }

    fn shortcuts_disabled(&self) -> bool {
        self.shortcuts_disabled
    }
}
