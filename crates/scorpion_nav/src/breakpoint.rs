//! Breakpoint observers
//!
//! Each observer mirrors "viewport narrower than N px" into a signal. The value
//! is unknown (`None`) until the observer is mounted and has measured once.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use scorpion_core::{ListenerId, MediaQuery, Signal, Subscription, ViewportHost};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Breakpoints;

/// Device class derived from the configured breakpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Width < `mobile`
    Mobile,
    /// `mobile` <= width < `tablet`
    Tablet,
    /// width >= `tablet`
    Desktop,
}

/// Classify a viewport width.
pub fn device_class_for_width(width: f64, breakpoints: &Breakpoints) -> DeviceClass {
    match width {
        w if w < breakpoints.mobile => DeviceClass::Mobile,
        w if w < breakpoints.tablet => DeviceClass::Tablet,
        _ => DeviceClass::Desktop,
    }
}

/// Reactive "viewport is below `threshold`" flag.
pub struct BreakpointObserver {
    name: &'static str,
    threshold: f64,
    viewport: Rc<dyn ViewportHost>,
    value: Signal<Option<bool>>,
    listener: Cell<Option<ListenerId>>,
}

impl fmt::Debug for BreakpointObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakpointObserver")
            .field("name", &self.name)
            .field("threshold", &self.threshold)
            .field("value", &self.value.get())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

impl BreakpointObserver {
    pub fn new(name: &'static str, viewport: Rc<dyn ViewportHost>, threshold: f64) -> Self {
        Self {
            name,
            threshold,
            viewport,
            value: Signal::new(None),
            listener: Cell::new(None),
        }
    }

    /// Observer for the mobile breakpoint
    pub fn mobile(viewport: Rc<dyn ViewportHost>, breakpoints: &Breakpoints) -> Self {
        Self::new("mobile", viewport, breakpoints.mobile)
    }

    /// Observer for the tablet-or-below breakpoint
    pub fn tablet_or_below(viewport: Rc<dyn ViewportHost>, breakpoints: &Breakpoints) -> Self {
        Self::new("tablet-or-below", viewport, breakpoints.tablet)
    }

    /// Measure now and start following media-query changes.
    pub fn mount(&self) {
        if self.is_mounted() {
            return;
        }

        let viewport = Rc::downgrade(&self.viewport);
        let value = self.value.clone();
        let threshold = self.threshold;
        let name = self.name;
        let on_change: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(viewport) = viewport.upgrade() {
                let below = viewport.inner_width() < threshold;
                if value.set(Some(below)) {
                    debug!(breakpoint = name, below, "breakpoint changed");
                }
            }
        });

        let id = self
            .viewport
            .add_media_listener(MediaQuery::below(self.threshold), Rc::clone(&on_change));
        self.listener.set(Some(id));
        on_change();
    }

    /// Stop following changes. The last measured value is kept.
    pub fn unmount(&self) {
        if let Some(id) = self.listener.take() {
            self.viewport.remove_listener(id);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.get().is_some()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `None` before the first measurement
    pub fn get(&self) -> Option<bool> {
        self.value.get()
    }

    /// Unknown reads as "not below"
    pub fn is_below(&self) -> bool {
        self.value.get().unwrap_or(false)
    }

    pub fn signal(&self) -> Signal<Option<bool>> {
        self.value.clone()
    }

    pub fn subscribe(&self, f: impl Fn(&Option<bool>) + 'static) -> Subscription {
        self.value.subscribe(f)
    }
}

impl Drop for BreakpointObserver {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorpion_core::MemoryViewport;

    #[test]
    fn test_device_class_breakpoints() {
        let bp = Breakpoints::default();
        assert_eq!(device_class_for_width(375.0, &bp), DeviceClass::Mobile);
        assert_eq!(device_class_for_width(767.0, &bp), DeviceClass::Mobile);
        assert_eq!(device_class_for_width(768.0, &bp), DeviceClass::Tablet);
        assert_eq!(device_class_for_width(1023.0, &bp), DeviceClass::Tablet);
        assert_eq!(device_class_for_width(1024.0, &bp), DeviceClass::Desktop);
    }

    #[test]
    fn test_unknown_until_mounted() {
        let viewport = Rc::new(MemoryViewport::new(500.0));
        let observer = BreakpointObserver::mobile(viewport.clone(), &Breakpoints::default());
        assert_eq!(observer.get(), None);
        assert!(!observer.is_below());

        observer.mount();
        assert_eq!(observer.get(), Some(true));
        assert_eq!(viewport.listener_count(), 1);
    }

    #[test]
    fn test_follows_resize_until_unmounted() {
        let viewport = Rc::new(MemoryViewport::new(1280.0));
        let observer =
            BreakpointObserver::tablet_or_below(viewport.clone(), &Breakpoints::default());
        observer.mount();
        assert_eq!(observer.get(), Some(false));

        viewport.resize(1023.0);
        assert_eq!(observer.get(), Some(true));
        viewport.resize(1024.0);
        assert_eq!(observer.get(), Some(false));

        observer.unmount();
        assert_eq!(viewport.listener_count(), 0);
        viewport.resize(600.0);
        assert_eq!(observer.get(), Some(false));
    }

    #[test]
    fn test_thresholds_are_independent() {
        let viewport = Rc::new(MemoryViewport::new(900.0));
        let bp = Breakpoints::default();
        let mobile = BreakpointObserver::mobile(viewport.clone(), &bp);
        let tablet = BreakpointObserver::tablet_or_below(viewport.clone(), &bp);
        mobile.mount();
        tablet.mount();

        assert_eq!(mobile.get(), Some(false));
        assert_eq!(tablet.get(), Some(true));
    }

    #[test]
    fn test_drop_removes_listener() {
        let viewport = Rc::new(MemoryViewport::new(900.0));
        {
            let observer = BreakpointObserver::mobile(viewport.clone(), &Breakpoints::default());
            observer.mount();
            assert_eq!(viewport.listener_count(), 1);
        }
        assert_eq!(viewport.listener_count(), 0);
    }
}
