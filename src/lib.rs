//! Tool selection controller for drawing surfaces.
//!
//! Exposes the picker state machine, its configuration layer and the replay
//! script driver so hosts can embed the picker and tools such as the CLI can
//! exercise it without a real window.

pub mod config;
pub mod input;
pub mod script;

pub use config::Config;
