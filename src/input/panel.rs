//! Shape sub-panel visibility.

/// Open/closed flag for the tool sub-panel.
///
/// Lives independently from the tool selection: toggling the panel never
/// changes the current tool and vice versa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panel {
    open: bool,
}

impl Panel {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}
