//! Reactive signals
//!
//! A [`Signal`] holds a value and notifies subscribers when it changes.
//! Handles are cheap to clone and all clones share the same value.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifier of a signal subscription
    pub struct SubscriptionId;
}

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct SignalInner<T> {
    value: RefCell<T>,
    subscribers: RefCell<SlotMap<SubscriptionId, Subscriber<T>>>,
}

/// Shared reactive value.
pub struct Signal<T> {
    inner: Rc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(SignalInner {
                value: RefCell::new(initial),
                subscribers: RefCell::new(SlotMap::with_key()),
            }),
        }
    }

    /// Get the current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Read the current value without cloning
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Set the value, notifying subscribers if it changed.
    ///
    /// Returns whether the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.notify();
        true
    }

    /// Update the value using a function
    pub fn update(&self, f: impl FnOnce(T) -> T) -> bool {
        let next = f(self.get());
        self.set(next)
    }

    /// Subscribe to changes. The subscription ends when the returned guard drops.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.subscribers.borrow_mut().insert(Rc::new(f));
        let weak: Weak<SignalInner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            id,
            unsubscribe: Some(Box::new(move |id| {
                if let Some(inner) = weak.upgrade() {
                    inner.subscribers.borrow_mut().remove(id);
                }
            })),
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Snapshot so subscribers may subscribe, unsubscribe or set re-entrantly
        let subscribers: Vec<Subscriber<T>> =
            self.inner.subscribers.borrow().values().cloned().collect();
        let value = self.get();
        for subscriber in subscribers {
            subscriber(&value);
        }
    }
}

/// Guard for a signal subscription
pub struct Subscription {
    id: SubscriptionId,
    unsubscribe: Option<Box<dyn FnOnce(SubscriptionId)>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// End the subscription now
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_set_notifies_only_on_change() {
        let signal = Signal::new(1);
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let _sub = signal.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

        assert!(!signal.set(1));
        assert_eq!(calls.get(), 0);

        assert!(signal.set(2));
        assert_eq!(calls.get(), 1);
        assert_eq!(signal.get(), 2);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let signal = Signal::new(0);
        let seen = Rc::new(Cell::new(0));
        let seen_clone = seen.clone();

        let sub = signal.subscribe(move |v| seen_clone.set(*v));
        assert_eq!(signal.subscriber_count(), 1);

        signal.set(5);
        drop(sub);
        signal.set(9);

        assert_eq!(seen.get(), 5);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_can_set_reentrantly() {
        let signal = Signal::new(0);
        let mirror = Signal::new(0);

        let m = mirror.clone();
        let _sub = signal.subscribe(move |v| {
            m.set(*v * 10);
        });

        signal.update(|v| v + 3);
        assert_eq!(mirror.get(), 30);
    }

    #[test]
    fn test_subscription_outliving_signal_is_harmless() {
        let sub = {
            let signal = Signal::new(String::from("a"));
            signal.subscribe(|_| {})
        };
        drop(sub);
    }
}
