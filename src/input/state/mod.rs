mod actions;
mod core;
mod mount;
mod pointer;
#[cfg(test)]
mod tests;

pub use self::core::{OverrideState, ToolPicker};
pub use mount::MountedPicker;
