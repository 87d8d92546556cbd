//! Toggle-to-deselect rule shared by pointer and keyboard selection.

use super::tool::Tool;

/// Computes the next tool for a selection request.
///
/// Requesting the tool that is already current deselects it and falls back to
/// [`Tool::None`]; any other request simply becomes current. Both the toolbar
/// click path and the keyboard shortcut path go through this function.
pub fn select_tool(current: Tool, requested: Tool) -> Tool {
    if requested == current {
        Tool::None
    } else {
        requested
    }
}
