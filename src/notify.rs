//! Single-threaded subscription hub.
//!
//! Scroll telemetry, visibility changes and language switches all follow the
//! same pattern: a source owns a `Notifier`, views register listeners with
//! `subscribe`, and dropping the returned `Subscription` deregisters them.
//!
//! Everything runs on the page's one event loop, so listeners live behind
//! `Rc<RefCell<_>>` rather than any synchronisation primitive.
//!
//! # Example
//!
//! ```
//! use postales_del_vinedo::notify::Notifier;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let notifier = Notifier::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let sink = Rc::clone(&seen);
//! let subscription = notifier.subscribe(move |value: &u32| sink.set(*value));
//! notifier.notify(&7);
//! assert_eq!(seen.get(), 7);
//!
//! drop(subscription);
//! notifier.notify(&9);
//! assert_eq!(seen.get(), 7);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Entry<T: 'static> {
    id: u64,
    /// Cleared by the subscription's cancel, before the entry is removed.
    active: Rc<Cell<bool>>,
    listener: Listener<T>,
}

impl<T: 'static> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Rc::clone(&self.active),
            listener: Rc::clone(&self.listener),
        }
    }
}

struct Registry<T: 'static> {
    next_id: u64,
    listeners: Vec<Entry<T>>,
}

/// Fan-out of values to every live listener, in registration order.
pub struct Notifier<T: 'static> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Notifier<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener. It stays registered until the returned
    /// `Subscription` is dropped or `unsubscribe`d.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let active = Rc::new(Cell::new(true));
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push(Entry {
                id,
                active: Rc::clone(&active),
                listener: Rc::new(RefCell::new(listener)) as Listener<T>,
            });
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            active.set(false);
            if let Some(registry) = weak.upgrade() {
                registry
                    .borrow_mut()
                    .listeners
                    .retain(|entry| entry.id != id);
            }
        })
    }

    /// Deliver `value` to every listener registered at the time of the call.
    ///
    /// Listeners may subscribe or unsubscribe from inside the callback.
    /// A listener added mid-round waits for the next notification; one
    /// removed mid-round is not called again, even later in the same round.
    /// A listener that re-enters `notify` does not receive the nested value.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Entry<T>> = self.registry.borrow().listeners.clone();

        for entry in snapshot {
            if !entry.active.get() {
                continue;
            }
            if let Ok(mut callback) = entry.listener.try_borrow_mut() {
                (&mut *callback)(value);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<T: 'static> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration handle. Dropping it removes the listener.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to cancel, for sources that are unavailable.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_notifies_in_registration_order() {
        let notifier = Notifier::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        let _a = notifier.subscribe(move |v: &u32| first.borrow_mut().push(("a", *v)));
        let second = Rc::clone(&log);
        let _b = notifier.subscribe(move |v: &u32| second.borrow_mut().push(("b", *v)));

        notifier.notify(&1);
        notifier.notify(&2);

        assert_eq!(*log.borrow(), vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let notifier = Notifier::new();
        let count = Rc::new(Cell::new(0));

        let sink = Rc::clone(&count);
        let subscription = notifier.subscribe(move |_: &()| sink.set(sink.get() + 1));
        assert_eq!(notifier.listener_count(), 1);

        notifier.notify(&());
        drop(subscription);
        notifier.notify(&());

        assert_eq!(count.get(), 1);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_explicit_unsubscribe_leaves_others() {
        let notifier = Notifier::new();
        let count = Rc::new(Cell::new(0));

        let sink = Rc::clone(&count);
        let keep = notifier.subscribe(move |_: &()| sink.set(sink.get() + 1));
        let other = notifier.subscribe(|_: &()| {});
        other.unsubscribe();

        notifier.notify(&());
        assert_eq!(count.get(), 1);
        assert_eq!(notifier.listener_count(), 1);
        drop(keep);
    }

    #[test]
    fn test_unsubscribe_during_notify_skips_later_listener() {
        let notifier = Notifier::new();
        let calls = Rc::new(Cell::new(0));
        let pending: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let teardown = Rc::clone(&pending);
        let _first = notifier.subscribe(move |_: &u32| {
            teardown.borrow_mut().take();
        });
        let sink = Rc::clone(&calls);
        *pending.borrow_mut() = Some(notifier.subscribe(move |_: &u32| sink.set(sink.get() + 1)));

        notifier.notify(&1);

        assert_eq!(calls.get(), 0);
        assert_eq!(notifier.listener_count(), 1);
    }

    #[test]
    fn test_subscribe_during_notify_waits_for_next_round() {
        let notifier = Rc::new(Notifier::new());
        let calls = Rc::new(Cell::new(0));
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

        let (hub, sink, keep) = (Rc::clone(&notifier), Rc::clone(&calls), Rc::clone(&late));
        let _first = notifier.subscribe(move |_: &u32| {
            if keep.borrow().is_empty() {
                let count = Rc::clone(&sink);
                keep.borrow_mut()
                    .push(hub.subscribe(move |_: &u32| count.set(count.get() + 1)));
            }
        });

        notifier.notify(&1);
        assert_eq!(calls.get(), 0);
        notifier.notify(&2);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_subscription_outliving_notifier_is_harmless() {
        let notifier = Notifier::new();
        let subscription = notifier.subscribe(|_: &u8| {});
        drop(notifier);
        drop(subscription);
    }

    #[test]
    fn test_inert_subscription() {
        let subscription = Subscription::inert();
        assert!(format!("{:?}", subscription).contains("false"));
    }
}
