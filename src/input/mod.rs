//! Input handling and tool selection state machine.
//!
//! This module turns raw keyboard events and toolbar clicks into tool changes.
//! Key presses are rate limited and mapped to actions through the configured
//! keybindings, the momentary hand override is tracked separately from the
//! persisted tool, and the whole picker attaches to a shared input surface for
//! the lifetime of a mount.

pub mod debounce;
pub mod events;
pub mod host;
pub mod panel;
pub mod selector;
pub mod state;
pub mod surface;
pub mod tool;

// Re-export commonly used types at module level
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use events::{Key, KeyEvent, KeyPhase};
pub use host::{ToolHost, ToolSlot};
pub use panel::Panel;
pub use selector::select_tool;
pub use state::{MountedPicker, OverrideState, ToolPicker};
pub use surface::{InputSurface, ListenerGuard};
pub use tool::Tool;
