//! `matchMedia` and window resize listeners

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use scorpion_core::{ListenerId, MediaQuery, ViewportHost};
use slotmap::SlotMap;
use tracing::warn;

/// The browser window's viewport.
///
/// Media listeners subscribe to the `change` event of a `MediaQueryList`, which
/// only fires when the query flips.
#[derive(Default)]
pub struct WebViewport {
    listeners: RefCell<SlotMap<ListenerId, Option<EventListener>>>,
}

impl WebViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ViewportHost for WebViewport {
    fn inner_width(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn add_media_listener(&self, query: MediaQuery, callback: Rc<dyn Fn()>) -> ListenerId {
        let list = web_sys::window().and_then(|w| w.match_media(&query.to_string()).ok().flatten());
        let listener = match list {
            Some(list) => Some(EventListener::new(&list, "change", move |_| callback())),
            None => {
                // Still registered so the id can be removed later
                warn!(%query, "matchMedia unavailable");
                None
            }
        };
        self.listeners.borrow_mut().insert(listener)
    }

    fn add_resize_listener(&self, callback: Rc<dyn Fn()>) -> ListenerId {
        let listener = web_sys::window()
            .map(|window| EventListener::new(&window, "resize", move |_| callback()));
        self.listeners.borrow_mut().insert(listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        let _removed = self.listeners.borrow_mut().remove(id);
    }
}
