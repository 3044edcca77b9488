//! Typed observer list for outbound notifications.
//!
//! A [`Signal`] keeps listeners ordered by priority and delivers each
//! dispatch synchronously: highest priority first, equal priorities in the
//! order they were added. Delivery stops early when a listener returns
//! [`Propagation::Stop`] or calls [`Signal::halt`].
//!
//! Listener identity is the `Rc` allocation, so the same `Listener` handle
//! must be kept around to remove it later.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{GridError, Result};

/// What a listener wants to happen to the rest of the dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    #[default]
    Continue,
    Stop,
}

/// Shared listener handle.
pub type Listener<T> = Rc<dyn Fn(&T) -> Propagation>;

struct Binding<T> {
    listener: Listener<T>,
    is_once: bool,
    priority: i32,
}

/// Ordered list of listeners for one notification channel.
pub struct Signal<T> {
    bindings: RefCell<Vec<Binding<T>>>,
    should_propagate: Cell<bool>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.len())
            .finish()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            bindings: RefCell::new(Vec::new()),
            should_propagate: Cell::new(true),
        }
    }

    /// Wrap a closure into a listener handle.
    pub fn listener<F>(f: F) -> Listener<T>
    where
        F: Fn(&T) -> Propagation + 'static,
    {
        Rc::new(f)
    }

    /// Register a persistent listener.
    ///
    /// # Errors
    /// Fails if the same listener is already registered with [`Signal::add_once`].
    pub fn add(&self, listener: &Listener<T>, priority: i32) -> Result<()> {
        self.register(listener, false, priority)
    }

    /// Register a listener that is removed after its first delivery.
    ///
    /// # Errors
    /// Fails if the same listener is already registered with [`Signal::add`].
    pub fn add_once(&self, listener: &Listener<T>, priority: i32) -> Result<()> {
        self.register(listener, true, priority)
    }

    /// Register a persistent listener and immediately invoke it with `value`.
    ///
    /// # Errors
    /// Fails if the same listener is already registered with [`Signal::add_once`].
    pub fn add_and_call(&self, listener: &Listener<T>, priority: i32, value: &T) -> Result<Propagation> {
        self.register(listener, false, priority)?;
        Ok(listener(value))
    }

    fn register(&self, listener: &Listener<T>, is_once: bool, priority: i32) -> Result<()> {
        let mut bindings = self.bindings.borrow_mut();

        if let Some(existing) = bindings.iter().find(|b| Rc::ptr_eq(&b.listener, listener)) {
            if existing.is_once != is_once {
                let err = GridError::ListenerMode {
                    registered: mode_name(existing.is_once),
                    attempted: mode_name(is_once),
                };
                tracing::warn!(%err, "rejected listener registration");
                return Err(err);
            }
            return Ok(());
        }

        // Ascending by priority; a newcomer goes before existing equals so
        // that reverse iteration delivers equals in registration order.
        let index = bindings.partition_point(|b| b.priority < priority);
        bindings.insert(
            index,
            Binding {
                listener: Rc::clone(listener),
                is_once,
                priority,
            },
        );
        Ok(())
    }

    /// True if `listener` is registered.
    pub fn has(&self, listener: &Listener<T>) -> bool {
        self.bindings
            .borrow()
            .iter()
            .any(|b| Rc::ptr_eq(&b.listener, listener))
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn remove(&self, listener: &Listener<T>) -> bool {
        let mut bindings = self.bindings.borrow_mut();
        match bindings.iter().rposition(|b| Rc::ptr_eq(&b.listener, listener)) {
            Some(index) => {
                bindings.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every listener.
    pub fn remove_all(&self) {
        self.bindings.borrow_mut().clear();
    }

    /// Stop delivery of the dispatch in progress.
    ///
    /// A halt issued outside a dispatch is forgotten when the next one starts.
    pub fn halt(&self) {
        self.should_propagate.set(false);
    }

    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }

    /// Release all listeners.
    pub fn dispose(&self) {
        self.remove_all();
    }

    /// Deliver `value` to listeners, highest priority first.
    ///
    /// Listeners may add or remove bindings while being called; changes
    /// take effect from the next dispatch.
    pub fn dispatch(&self, value: &T) {
        self.should_propagate.set(true);

        let queue: Vec<(Listener<T>, bool)> = self
            .bindings
            .borrow()
            .iter()
            .rev()
            .map(|b| (Rc::clone(&b.listener), b.is_once))
            .collect();

        for (listener, is_once) in queue {
            if is_once {
                self.remove(&listener);
            }
            let result = listener(value);
            if result == Propagation::Stop || !self.should_propagate.get() {
                break;
            }
        }
    }
}

fn mode_name(is_once: bool) -> &'static str {
    if is_once {
        "add_once"
    } else {
        "add"
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Listener<u32> {
        let log = Rc::clone(log);
        Signal::listener(move |_: &u32| {
            log.borrow_mut().push(name);
            Propagation::Continue
        })
    }

    #[test]
    fn test_priority_then_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let signal = Signal::new();
        let a = recorder(&log, "a");
        let b = recorder(&log, "b");
        let c = recorder(&log, "c");
        signal.add(&a, 0).unwrap();
        signal.add(&b, 0).unwrap();
        signal.add(&c, 5).unwrap();

        signal.dispatch(&1);
        assert_eq!(*log.borrow(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let signal = Signal::new();
        let a = recorder(&log, "a");
        signal.add(&a, 0).unwrap();
        signal.add(&a, 3).unwrap();
        assert_eq!(signal.len(), 1);
    }

    #[test]
    fn test_once_listener_removed_after_delivery() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let signal = Signal::new();
        let a = recorder(&log, "a");
        signal.add_once(&a, 0).unwrap();
        signal.dispatch(&1);
        signal.dispatch(&2);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert!(!signal.has(&a));
    }

    #[test]
    fn test_mode_conflict_is_an_error() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let signal = Signal::new();
        let a = recorder(&log, "a");
        signal.add(&a, 0).unwrap();
        let err = signal.add_once(&a, 0).unwrap_err();
        assert!(matches!(
            err,
            GridError::ListenerMode {
                registered: "add",
                attempted: "add_once"
            }
        ));
    }

    #[test]
    fn test_stop_propagation() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let signal = Signal::new();
        let stopper = {
            let log = Rc::clone(&log);
            Signal::listener(move |_: &u32| {
                log.borrow_mut().push("stopper");
                Propagation::Stop
            })
        };
        let late = recorder(&log, "late");
        signal.add(&late, 0).unwrap();
        signal.add(&stopper, 1).unwrap();
        signal.dispatch(&1);
        assert_eq!(*log.borrow(), vec!["stopper"]);
    }

    #[test]
    fn test_halt_from_listener() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let signal = Rc::new(Signal::new());
        let halter = {
            let log = Rc::clone(&log);
            let weak = Rc::downgrade(&signal);
            Signal::listener(move |_: &u32| {
                log.borrow_mut().push("halter");
                if let Some(signal) = weak.upgrade() {
                    signal.halt();
                }
                Propagation::Continue
            })
        };
        let late = recorder(&log, "late");
        signal.add(&late, 0).unwrap();
        signal.add(&halter, 1).unwrap();
        signal.dispatch(&1);
        assert_eq!(*log.borrow(), vec!["halter"]);

        // A fresh dispatch resets the halt
        signal.remove(&halter);
        signal.dispatch(&2);
        assert_eq!(*log.borrow(), vec!["halter", "late"]);
    }

    #[test]
    fn test_halt_before_dispatch_is_forgotten() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let signal = Signal::new();
        let a = recorder(&log, "a");
        signal.add(&a, 0).unwrap();
        signal.halt();
        signal.dispatch(&1);
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn test_add_and_call_invokes_immediately() {
        let seen = Rc::new(Cell::new(0));
        let signal = Signal::new();
        let listener = {
            let seen = Rc::clone(&seen);
            Signal::listener(move |v: &u32| {
                seen.set(*v);
                Propagation::Continue
            })
        };
        signal.add_and_call(&listener, 0, &7).unwrap();
        assert_eq!(seen.get(), 7);
        signal.dispatch(&9);
        assert_eq!(seen.get(), 9);
    }

    #[test]
    fn test_remove_and_remove_all() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let signal = Signal::new();
        let a = recorder(&log, "a");
        let b = recorder(&log, "b");
        signal.add(&a, 0).unwrap();
        signal.add(&b, 0).unwrap();
        assert!(signal.remove(&a));
        assert!(!signal.remove(&a));
        assert_eq!(signal.len(), 1);
        signal.remove_all();
        assert!(signal.is_empty());
    }

    #[test]
    fn test_listener_may_remove_itself_during_dispatch() {
        let signal = Rc::new(Signal::<u32>::new());
        let slot: Rc<RefCell<Option<Listener<u32>>>> = Rc::new(RefCell::new(None));
        let listener = {
            let weak = Rc::downgrade(&signal);
            let slot = Rc::clone(&slot);
            Signal::listener(move |_: &u32| {
                if let (Some(signal), Some(me)) = (weak.upgrade(), slot.borrow().as_ref()) {
                    signal.remove(me);
                }
                Propagation::Continue
            })
        };
        *slot.borrow_mut() = Some(Rc::clone(&listener));
        signal.add(&listener, 0).unwrap();
        signal.dispatch(&1);
        assert!(signal.is_empty());
    }
}
