//! Rate limiting for repeated key-down events.

use std::time::{Duration, Instant};

/// Default window between accepted key-down events.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Single-clock debouncer shared by every key.
///
/// The window is measured from the last *accepted* event, so a burst of
/// rapid presses only lets the first one through until the window elapses.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns true and records `now` when the event may pass.
    ///
    /// Timestamps older than the last accepted one are treated as arriving
    /// inside the window.
    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }
}
