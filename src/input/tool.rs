//! Drawing tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// Exactly one tool is current at any time. `Tool::None` is the plain select
/// mode the surface falls back to when a tool is toggled off. The "nothing
/// forced" state of the momentary override is modelled as `Option<Tool>`
/// rather than as a variant here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Select mode (no drawing tool active)
    #[default]
    None,
    /// Pan the canvas by dragging
    Hand,
    /// Freehand stroke
    Pen,
    /// Erase strokes under the pointer
    Eraser,
    /// Place a text box
    Text,
    /// Straight line between two points
    Line,
    /// Axis-aligned square/rectangle
    Square,
    /// Triangle outline
    Triangle,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 8] = [
        Tool::None,
        Tool::Hand,
        Tool::Pen,
        Tool::Eraser,
        Tool::Text,
        Tool::Line,
        Tool::Square,
        Tool::Triangle,
    ];

    /// Stable identifier used in config files and scripts.
    pub fn name(self) -> &'static str {
        match self {
            Tool::None => "none",
            Tool::Hand => "hand",
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Text => "text",
            Tool::Line => "line",
            Tool::Square => "square",
            Tool::Triangle => "triangle",
        }
    }

    /// Human readable label for toolbars and status lines.
    pub fn label(self) -> &'static str {
        match self {
            Tool::None => "Select",
            Tool::Hand => "Hand",
            Tool::Pen => "Pen",
            Tool::Eraser => "Eraser",
            Tool::Text => "Text",
            Tool::Line => "Line",
            Tool::Square => "Square",
            Tool::Triangle => "Triangle",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if matches!(lowered.as_str(), "default" | "select") {
            return Ok(Tool::None);
        }
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == lowered)
            .ok_or_else(|| format!("Unknown tool '{}'", s.trim()))
    }
}
