//! A picker attached to the global input surface for the lifetime of a mount.

use crate::input::{
    events::KeyEvent,
    host::ToolHost,
    surface::{InputSurface, ListenerGuard},
    tool::Tool,
};
use std::cell::RefCell;
use std::rc::Rc;

use super::ToolPicker;

/// A [`ToolPicker`] wired to an [`InputSurface`].
///
/// Mounting attaches one key-down and one key-up listener. Dropping the value
/// (or calling [`MountedPicker::unmount`]) detaches both before returning.
pub struct MountedPicker<H: ToolHost + 'static> {
    picker: Rc<RefCell<ToolPicker>>,
    host: Rc<RefCell<H>>,
    _listeners: ListenerGuard,
}

impl<H: ToolHost + 'static> MountedPicker<H> {
    pub fn mount(surface: &InputSurface, picker: ToolPicker, host: Rc<RefCell<H>>) -> Self {
        let picker = Rc::new(RefCell::new(picker));

        let on_down = {
            let picker = Rc::clone(&picker);
            let host = Rc::clone(&host);
            move |event: &KeyEvent| {
                picker
                    .borrow_mut()
                    .on_key_down(&mut *host.borrow_mut(), event.key, event.at);
            }
        };
        let on_up = {
            let picker = Rc::clone(&picker);
            move |event: &KeyEvent| picker.borrow_mut().on_key_up(event.key)
        };

        let listeners = surface.attach(on_down, on_up);
        log::debug!("Tool picker mounted ({} listeners)", surface.listener_count());

        Self {
            picker,
            host,
            _listeners: listeners,
        }
    }

    /// Detaches from the input surface.
    pub fn unmount(self) {}

    /// Pointer click on a tool button.
    pub fn click_tool(&self, tool: Tool) -> Tool {
        self.picker
            .borrow_mut()
            .on_tool_clicked(&mut *self.host.borrow_mut(), tool)
    }

    /// Pointer click on the panel disclosure button.
    pub fn click_panel_toggle(&self) -> bool {
        self.picker.borrow_mut().on_panel_toggle_clicked()
    }

    pub fn displayed_tool(&self) -> Tool {
        self.picker.borrow().displayed_tool(&*self.host.borrow())
    }

    pub fn persisted_tool(&self) -> Tool {
        self.host.borrow().current_tool()
    }

    pub fn is_overriding(&self) -> bool {
        self.picker.borrow().is_overriding()
    }

    pub fn panel_open(&self) -> bool {
        self.picker.borrow().panel_open()
    }

    pub fn take_needs_redraw(&self) -> bool {
        self.picker.borrow_mut().take_needs_redraw()
    }

    pub fn host(&self) -> &Rc<RefCell<H>> {
        &self.host
    }
}

impl<H: ToolHost + 'static> Drop for MountedPicker<H> {
    fn drop(&mut self) {
        log::debug!("Tool picker unmounted");
    }
}
