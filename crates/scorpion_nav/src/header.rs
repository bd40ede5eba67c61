//! Header height measurement
//!
//! Exposes the rendered header height as a root CSS custom property so the
//! stylesheet can offset sticky content. Re-measured whenever the header or the
//! window resizes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use scorpion_core::{DocumentHost, ListenerId, ViewportHost};
use tracing::{debug, trace};

use crate::config::HeaderConfig;

/// Mirrors the header height into [`HeaderConfig::property`].
pub struct HeaderHeightTracker {
    config: Rc<HeaderConfig>,
    document: Rc<dyn DocumentHost>,
    viewport: Rc<dyn ViewportHost>,
    observer: Cell<Option<ListenerId>>,
    resize_listener: Cell<Option<ListenerId>>,
    last_value: Rc<RefCell<Option<String>>>,
}

impl HeaderHeightTracker {
    pub fn new(
        document: Rc<dyn DocumentHost>,
        viewport: Rc<dyn ViewportHost>,
        config: HeaderConfig,
    ) -> Self {
        Self {
            config: Rc::new(config),
            document,
            viewport,
            observer: Cell::new(None),
            resize_listener: Cell::new(None),
            last_value: Rc::new(RefCell::new(None)),
        }
    }

    /// Measure and start observing. Returns whether the header was found;
    /// a missing header is retried on the next activation.
    pub fn activate(&self) -> bool {
        if self.is_active() {
            return true;
        }
        if !self.document.has_element(&self.config.selector) {
            debug!(selector = %self.config.selector, "header not found, skipping measurement");
            return false;
        }

        let document = Rc::downgrade(&self.document);
        let config = Rc::clone(&self.config);
        let last_value = Rc::clone(&self.last_value);
        let remeasure: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(document) = document.upgrade() {
                if let Some(value) = measure(document.as_ref(), &config) {
                    *last_value.borrow_mut() = Some(value);
                }
            }
        });

        remeasure();
        self.observer.set(
            self.document
                .observe_resize(&self.config.selector, Rc::clone(&remeasure)),
        );
        self.resize_listener
            .set(Some(self.viewport.add_resize_listener(remeasure)));
        debug!(value = ?self.current_value(), "header tracking active");
        true
    }

    /// Disconnect both observers. The last written property is left in place.
    pub fn deactivate(&self) {
        if let Some(id) = self.observer.take() {
            self.document.unobserve_resize(id);
        }
        if let Some(id) = self.resize_listener.take() {
            self.viewport.remove_listener(id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.resize_listener.get().is_some()
    }

    /// The value last written to the property, e.g. `"64px"`
    pub fn current_value(&self) -> Option<String> {
        self.last_value.borrow().clone()
    }
}

impl Drop for HeaderHeightTracker {
    fn drop(&mut self) {
        self.deactivate();
    }
}

fn measure(document: &dyn DocumentHost, config: &HeaderConfig) -> Option<String> {
    let height = document.element_height(&config.selector)?;
    let value = format!("{}px", height.ceil() as i64);
    trace!(%value, "header measured");
    document.set_root_style_property(&config.property, &value);
    Some(value)
}
