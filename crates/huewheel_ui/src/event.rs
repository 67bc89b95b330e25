//! Pointer events and window-level listener registration.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::Point;

/// Pointer events delivered by the host, in screen (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Pointer button pressed.
    PointerDown { button: MouseButton, position: Point },
    /// Pointer moved.
    PointerMove { position: Point },
    /// Pointer button released.
    PointerUp { button: MouseButton, position: Point },
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Identifies one picker instance within a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickerId(pub u64);

#[derive(Debug, Default)]
struct ListenerSet {
    next_token: u64,
    active: Vec<(u64, PickerId)>,
}

/// Window-level move/up listeners, shared between the host and its pickers.
///
/// The host routes window pointer move/up events only to the owners listed
/// here. Registrations are handed out as [`ListenerGuard`]s and removed when
/// the guard drops, so a drag session cannot leak its listeners.
#[derive(Debug, Clone, Default)]
pub struct WindowListeners {
    inner: Rc<RefCell<ListenerSet>>,
}

impl WindowListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register move/up listeners on behalf of `owner`.
    pub fn register(&self, owner: PickerId) -> ListenerGuard {
        let mut set = self.inner.borrow_mut();
        let token = set.next_token;
        set.next_token += 1;
        set.active.push((token, owner));
        log::trace!("window listeners registered for {:?} (token {})", owner, token);
        ListenerGuard {
            listeners: self.clone(),
            token,
        }
    }

    pub fn is_registered(&self, owner: PickerId) -> bool {
        self.inner.borrow().active.iter().any(|(_, o)| *o == owner)
    }

    /// Owners currently listening, in registration order.
    pub fn owners(&self) -> Vec<PickerId> {
        self.inner.borrow().active.iter().map(|(_, o)| *o).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().active.is_empty()
    }

    fn remove(&self, token: u64) {
        self.inner.borrow_mut().active.retain(|(t, _)| *t != token);
    }
}

/// Scoped window listener registration; deregisters on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    listeners: WindowListeners,
    token: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        log::trace!("window listeners released (token {})", self.token);
        self.listeners.remove(self.token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_deregisters_on_drop() {
        let listeners = WindowListeners::new();
        let a = listeners.register(PickerId(1));
        let b = listeners.register(PickerId(2));
        assert_eq!(listeners.owners(), vec![PickerId(1), PickerId(2)]);

        drop(a);
        assert!(!listeners.is_registered(PickerId(1)));
        assert!(listeners.is_registered(PickerId(2)));

        drop(b);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_clones_share_registrations() {
        let host_side = WindowListeners::new();
        let picker_side = host_side.clone();
        let _guard = picker_side.register(PickerId(7));
        assert_eq!(host_side.len(), 1);
    }
}
