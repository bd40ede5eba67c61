//! Viewport width and media-query listeners

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered media-query, resize or element observer
    pub struct ListenerId;
}

/// A `(max-width: Npx)` media query
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaQuery {
    pub max_width: f64,
}

impl MediaQuery {
    /// Query matching widths strictly below `threshold`
    pub fn below(threshold: f64) -> Self {
        Self {
            max_width: threshold - 1.0,
        }
    }

    pub fn matches(&self, width: f64) -> bool {
        width <= self.max_width
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(max-width: {}px)", self.max_width)
    }
}

/// Access to the window's viewport.
pub trait ViewportHost {
    /// Current layout viewport width in CSS pixels
    fn inner_width(&self) -> f64;

    /// Call `callback` whenever `query` flips between matching and not matching
    fn add_media_listener(&self, query: MediaQuery, callback: Rc<dyn Fn()>) -> ListenerId;

    /// Call `callback` on every window resize
    fn add_resize_listener(&self, callback: Rc<dyn Fn()>) -> ListenerId;

    /// Deregister a media-query or resize listener
    fn remove_listener(&self, id: ListenerId);
}

enum Listener {
    Media {
        query: MediaQuery,
        matched: bool,
        callback: Rc<dyn Fn()>,
    },
    Resize {
        callback: Rc<dyn Fn()>,
    },
}

/// In-memory viewport driven by [`MemoryViewport::resize`].
pub struct MemoryViewport {
    width: Cell<f64>,
    listeners: RefCell<SlotMap<ListenerId, Listener>>,
}

impl MemoryViewport {
    pub fn new(width: f64) -> Self {
        Self {
            width: Cell::new(width),
            listeners: RefCell::new(SlotMap::with_key()),
        }
    }

    /// Change the width, firing resize listeners and any media listener whose
    /// match state flipped
    pub fn resize(&self, width: f64) {
        self.width.set(width);

        let mut fire: Vec<Rc<dyn Fn()>> = Vec::new();
        for listener in self.listeners.borrow_mut().values_mut() {
            match listener {
                Listener::Media {
                    query,
                    matched,
                    callback,
                } => {
                    let now = query.matches(width);
                    if now != *matched {
                        *matched = now;
                        fire.push(Rc::clone(callback));
                    }
                }
                Listener::Resize { callback } => fire.push(Rc::clone(callback)),
            }
        }

        for callback in fire {
            callback();
        }
    }

    /// Number of registered listeners of any kind
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ViewportHost for MemoryViewport {
    fn inner_width(&self) -> f64 {
        self.width.get()
    }

    fn add_media_listener(&self, query: MediaQuery, callback: Rc<dyn Fn()>) -> ListenerId {
        let matched = query.matches(self.width.get());
        self.listeners.borrow_mut().insert(Listener::Media {
            query,
            matched,
            callback,
        })
    }

    fn add_resize_listener(&self, callback: Rc<dyn Fn()>) -> ListenerId {
        self.listeners
            .borrow_mut()
            .insert(Listener::Resize { callback })
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_query_below() {
        let q = MediaQuery::below(768.0);
        assert!(q.matches(767.0));
        assert!(!q.matches(768.0));
        assert_eq!(q.to_string(), "(max-width: 767px)");
    }

    #[test]
    fn test_media_listener_fires_only_on_flip() {
        let viewport = MemoryViewport::new(1200.0);
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        let id = viewport.add_media_listener(
            MediaQuery::below(768.0),
            Rc::new(move || f.set(f.get() + 1)),
        );

        viewport.resize(1000.0);
        assert_eq!(fired.get(), 0);

        viewport.resize(700.0);
        assert_eq!(fired.get(), 1);

        viewport.resize(600.0);
        assert_eq!(fired.get(), 1);

        viewport.resize(800.0);
        assert_eq!(fired.get(), 2);

        viewport.remove_listener(id);
        viewport.resize(500.0);
        assert_eq!(fired.get(), 2);
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_resize_listener_fires_every_time() {
        let viewport = MemoryViewport::new(1200.0);
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        viewport.add_resize_listener(Rc::new(move || f.set(f.get() + 1)));

        viewport.resize(1199.0);
        viewport.resize(1198.0);
        assert_eq!(fired.get(), 2);
    }
}
