//! Provisioning scope
//!
//! Values are provided explicitly by the root of a UI tree and looked up by
//! type while the provider is in scope:
//!
//! ```
//! use std::rc::Rc;
//! use scorpion_core::{provide, use_context, try_use_context};
//!
//! struct Settings { compact: bool }
//!
//! assert!(try_use_context::<Settings>().is_none());
//!
//! let _guard = provide(Rc::new(Settings { compact: true }));
//! assert!(use_context::<Settings>().compact);
//! ```
//!
//! There is no process-global singleton: two trees may provide different
//! instances, and the innermost provider wins. Each provider is scoped to the
//! thread that created it, which is the event-loop thread.

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;

thread_local! {
    static PROVIDED: RefCell<Vec<Provided>> = const { RefCell::new(Vec::new()) };
    static NEXT_TOKEN: Cell<u64> = const { Cell::new(0) };
}

struct Provided {
    token: u64,
    type_id: TypeId,
    value: Rc<dyn Any>,
}

/// Keeps a provided value in scope until dropped.
#[must_use = "the value is only provided while the guard is alive"]
#[derive(Debug)]
pub struct ProvideGuard {
    token: u64,
    // Guards are tied to the thread-local stack they pushed onto
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for ProvideGuard {
    fn drop(&mut self) {
        let token = self.token;
        PROVIDED.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|p| p.token == token) {
                stack.remove(pos);
            }
        });
    }
}

/// Provide a value to everything running while the guard is alive.
pub fn provide<T: 'static>(value: Rc<T>) -> ProvideGuard {
    let token = NEXT_TOKEN.with(|next| {
        let token = next.get();
        next.set(token + 1);
        token
    });

    PROVIDED.with(|stack| {
        stack.borrow_mut().push(Provided {
            token,
            type_id: TypeId::of::<T>(),
            value,
        });
    });

    ProvideGuard {
        token,
        _not_send: PhantomData,
    }
}

/// Look up the innermost provided value of type `T`.
pub fn try_use_context<T: 'static>() -> Option<Rc<T>> {
    PROVIDED.with(|stack| {
        stack
            .borrow()
            .iter()
            .rev()
            .find(|p| p.type_id == TypeId::of::<T>())
            .and_then(|p| Rc::clone(&p.value).downcast::<T>().ok())
    })
}

/// Look up the innermost provided value of type `T`.
///
/// # Panics
///
/// Panics if no provider for `T` is in scope. Reading context outside its
/// provider is an integration bug, not an environment condition.
#[track_caller]
pub fn use_context<T: 'static>() -> Rc<T> {
    match try_use_context::<T>() {
        Some(value) => value,
        None => panic!(
            "use_context::<{}>() called outside of a provider",
            std::any::type_name::<T>()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(&'static str);

    #[test]
    fn test_innermost_provider_wins() {
        let _outer = provide(Rc::new(Marker("outer")));
        assert_eq!(*use_context::<Marker>(), Marker("outer"));

        {
            let _inner = provide(Rc::new(Marker("inner")));
            assert_eq!(*use_context::<Marker>(), Marker("inner"));
        }

        assert_eq!(*use_context::<Marker>(), Marker("outer"));
    }

    #[test]
    fn test_guard_drop_removes_value() {
        let guard = provide(Rc::new(Marker("scoped")));
        assert!(try_use_context::<Marker>().is_some());
        drop(guard);
        assert!(try_use_context::<Marker>().is_none());
    }

    #[test]
    fn test_lookup_is_by_type() {
        let _guard = provide(Rc::new(42u32));
        assert!(try_use_context::<Marker>().is_none());
        assert_eq!(*use_context::<u32>(), 42);
    }

    #[test]
    #[should_panic(expected = "outside of a provider")]
    fn test_missing_provider_panics() {
        let _ = use_context::<Marker>();
    }
}
