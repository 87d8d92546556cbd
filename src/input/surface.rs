//! Global key event surface with scoped listener registration.
//!
//! Hosts push raw key events into an [`InputSurface`]. Pickers subscribe with
//! [`InputSurface::attach`], which registers a key-down and a key-up listener
//! together and hands back a [`ListenerGuard`]. Dropping the guard removes
//! both listeners, so a torn-down picker never sees another event.

use super::events::{KeyEvent, KeyPhase};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Handler = Rc<RefCell<dyn FnMut(&KeyEvent)>>;

struct Registration {
    id: u64,
    phase: KeyPhase,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Registration>,
}

impl Registry {
    fn register(&mut self, phase: KeyPhase, handler: Handler) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push(Registration { id, phase, handler });
        id
    }

    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|r| r.id == id)
    }
}

/// Single-threaded key event bus shared by every mounted picker.
///
/// Cloning the surface yields another handle to the same listener registry.
#[derive(Clone, Default)]
pub struct InputSurface {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for InputSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InputSurface {{ listeners: {} }}", self.listener_count())
    }
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a key-down and key-up listener pair.
    ///
    /// Both listeners stay attached until the returned guard is dropped.
    #[must_use = "dropping the guard detaches the listeners immediately"]
    pub fn attach<D, U>(&self, on_down: D, on_up: U) -> ListenerGuard
    where
        D: FnMut(&KeyEvent) + 'static,
        U: FnMut(&KeyEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let down = registry.register(KeyPhase::Down, Rc::new(RefCell::new(on_down)));
        let up = registry.register(KeyPhase::Up, Rc::new(RefCell::new(on_up)));

        ListenerGuard {
            registry: Rc::downgrade(&self.registry),
            ids: [down, up],
        }
    }

    /// Delivers an event to every listener of the matching phase, in
    /// registration order. Returns the number of listeners invoked.
    ///
    /// Listeners detached by an earlier listener during the same dispatch are
    /// skipped. A listener that re-enters `dispatch` is not called recursively.
    pub fn dispatch(&self, event: KeyEvent) -> usize {
        let targets: Vec<(u64, Handler)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|r| r.phase == event.phase)
            .map(|r| (r.id, Rc::clone(&r.handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in targets {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (&mut *handler)(&event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of currently attached listeners (two per mounted picker).
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Keeps a listener pair attached to an [`InputSurface`].
///
/// Dropping the guard detaches both listeners. A guard that outlives its
/// surface is inert.
pub struct ListenerGuard {
    registry: Weak<RefCell<Registry>>,
    ids: [u64; 2],
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("ids", &self.ids)
            .finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // Handlers are dropped after the registry borrow ends; their captures
        // may own other guards.
        let detached: Vec<Registration> = match registry.try_borrow_mut() {
            Ok(mut registry) => {
                let (detached, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut registry.listeners)
                    .into_iter()
                    .partition(|r| self.ids.contains(&r.id));
                registry.listeners = kept;
                detached
            }
            Err(_) => {
                log::warn!(
                    "Listener registry busy, listeners {:?} stay attached",
                    self.ids
                );
                return;
            }
        };
        drop(detached);
    }
}
