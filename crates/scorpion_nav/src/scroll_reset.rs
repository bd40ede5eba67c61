//! Scroll reset on route changes
//!
//! Every path change scrolls the page (or a configured container) back to the
//! origin on the next animation frame, after layout has settled. Same-page
//! hash jumps are left alone so anchors keep working.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use scorpion_core::{
    DocumentHost, ScrollBehavior, ScrollPosition, ScrollTarget, Scheduler, TaskId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::route::Location;

/// Scroll reset behavior (`[scroll]`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollResetOptions {
    /// Reset on route changes at all
    pub enabled: bool,
    /// Scroll animation
    pub behavior: ScrollBehavior,
    /// Skip same-page hash navigation
    pub respect_hash: bool,
    /// Scroll this element instead of the page, when it exists
    pub container_selector: Option<String>,
}

impl Default for ScrollResetOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            behavior: ScrollBehavior::Auto,
            respect_hash: true,
            container_selector: None,
        }
    }
}

/// Resets scroll position when the route changes.
pub struct ScrollResetController {
    options: ScrollResetOptions,
    document: Rc<dyn DocumentHost>,
    scheduler: Rc<dyn Scheduler>,
    previous_path: RefCell<Option<String>>,
    stored: Cell<ScrollPosition>,
    pending: Cell<Option<TaskId>>,
}

impl ScrollResetController {
    pub fn new(
        document: Rc<dyn DocumentHost>,
        scheduler: Rc<dyn Scheduler>,
        options: ScrollResetOptions,
    ) -> Self {
        Self {
            options,
            document,
            scheduler,
            previous_path: RefCell::new(None),
            stored: Cell::new(ScrollPosition::ORIGIN),
            pending: Cell::new(None),
        }
    }

    pub fn options(&self) -> &ScrollResetOptions {
        &self.options
    }

    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    /// React to a new location.
    pub fn on_route_change(&self, location: &Location) {
        if !self.options.enabled {
            return;
        }

        let same_page = self.previous_path.borrow().as_deref() == Some(location.path.as_str());
        if self.options.respect_hash && location.has_hash() && same_page {
            debug!(%location, "scroll reset skipped for same-page hash navigation");
            return;
        }

        self.store_scroll_position();
        self.schedule_reset();
        *self.previous_path.borrow_mut() = Some(location.path.clone());
    }

    /// Reset now, regardless of the current location
    pub fn reset_scroll(&self) {
        if !self.options.enabled {
            return;
        }
        self.schedule_reset();
    }

    /// Remember the current scroll offset (best effort)
    pub fn store_scroll_position(&self) {
        if !self.options.enabled {
            return;
        }
        if let Some(position) = self.document.scroll_position(&self.resolve_target()) {
            self.stored.set(position);
        }
    }

    /// Offset recorded by the last [`store_scroll_position`](Self::store_scroll_position)
    pub fn stored_position(&self) -> ScrollPosition {
        self.stored.get()
    }

    pub fn previous_path(&self) -> Option<String> {
        self.previous_path.borrow().clone()
    }

    /// Record the final offset and drop any queued reset
    pub fn unmount(&self) {
        self.store_scroll_position();
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }

    fn resolve_target(&self) -> ScrollTarget {
        match &self.options.container_selector {
            Some(selector) if self.document.has_element(selector) => {
                ScrollTarget::Element(selector.clone())
            }
            _ => ScrollTarget::Root,
        }
    }

    fn schedule_reset(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }

        let target = self.resolve_target();
        let behavior = self.options.behavior;
        let document = Rc::downgrade(&self.document);
        let id = self.scheduler.request_animation_frame(Box::new(move || {
            if let Some(document) = document.upgrade() {
                scroll_to_origin(document.as_ref(), &target, behavior);
            }
        }));
        trace!(?id, "scroll reset queued");
        self.pending.set(Some(id));
    }
}

impl Drop for ScrollResetController {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }
}

/// Scroll to the origin, retrying without animation if the host refuses.
pub fn scroll_to_origin(document: &dyn DocumentHost, target: &ScrollTarget, behavior: ScrollBehavior) {
    let Err(err) = document.scroll_to(target, ScrollPosition::ORIGIN, behavior) else {
        return;
    };
    warn!(%err, ?target, "scroll reset failed, using fallback");
    if let Err(err) = document.scroll_to(target, ScrollPosition::ORIGIN, ScrollBehavior::Auto) {
        warn!(%err, ?target, "fallback scroll reset failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorpion_core::{ManualScheduler, MemoryDocument};

    fn controller(
        options: ScrollResetOptions,
    ) -> (Rc<MemoryDocument>, Rc<ManualScheduler>, ScrollResetController) {
        let document = Rc::new(MemoryDocument::new());
        let scheduler = Rc::new(ManualScheduler::new());
        let controller = ScrollResetController::new(document.clone(), scheduler.clone(), options);
        (document, scheduler, controller)
    }

    #[test]
    fn test_reset_waits_for_next_frame() {
        let (document, scheduler, controller) = controller(ScrollResetOptions::default());
        document.user_scroll(&ScrollTarget::Root, ScrollPosition::new(0.0, 640.0));

        controller.on_route_change(&Location::parse("/components"));
        assert_eq!(
            document.scroll_position(&ScrollTarget::Root),
            Some(ScrollPosition::new(0.0, 640.0))
        );
        assert_eq!(controller.stored_position(), ScrollPosition::new(0.0, 640.0));

        scheduler.run_frame();
        assert_eq!(
            document.scroll_position(&ScrollTarget::Root),
            Some(ScrollPosition::ORIGIN)
        );
        assert_eq!(controller.previous_path().as_deref(), Some("/components"));
    }

    #[test]
    fn test_disabled_does_nothing() {
        let (_, scheduler, controller) = controller(ScrollResetOptions {
            enabled: false,
            ..Default::default()
        });
        controller.on_route_change(&Location::parse("/a"));
        controller.reset_scroll();
        assert!(scheduler.is_idle());
        assert_eq!(controller.previous_path(), None);
    }

    #[test]
    fn test_hash_ignored_when_not_respected() {
        let (document, scheduler, controller) = controller(ScrollResetOptions {
            respect_hash: false,
            ..Default::default()
        });
        controller.on_route_change(&Location::parse("/a"));
        scheduler.run_frame();

        document.user_scroll(&ScrollTarget::Root, ScrollPosition::new(0.0, 300.0));
        controller.on_route_change(&Location::parse("/a#section"));
        scheduler.run_frame();
        assert_eq!(
            document.scroll_position(&ScrollTarget::Root),
            Some(ScrollPosition::ORIGIN)
        );
    }

    #[test]
    fn test_custom_container_falls_back_to_root() {
        let (document, scheduler, controller) = controller(ScrollResetOptions {
            container_selector: Some("main".to_string()),
            ..Default::default()
        });

        document.user_scroll(&ScrollTarget::Root, ScrollPosition::new(0.0, 100.0));
        controller.reset_scroll();
        scheduler.run_frame();
        assert_eq!(
            document.scroll_position(&ScrollTarget::Root),
            Some(ScrollPosition::ORIGIN)
        );

        let main = ScrollTarget::Element("main".to_string());
        document.insert_element("main", 900.0);
        document.user_scroll(&main, ScrollPosition::new(0.0, 250.0));
        document.user_scroll(&ScrollTarget::Root, ScrollPosition::new(0.0, 100.0));
        controller.reset_scroll();
        scheduler.run_frame();
        assert_eq!(document.scroll_position(&main), Some(ScrollPosition::ORIGIN));
        assert_eq!(
            document.scroll_position(&ScrollTarget::Root),
            Some(ScrollPosition::new(0.0, 100.0))
        );
    }

    #[test]
    fn test_smooth_rejection_falls_back_to_instant() {
        let (document, scheduler, controller) = controller(ScrollResetOptions {
            behavior: ScrollBehavior::Smooth,
            ..Default::default()
        });
        document.set_reject_smooth_scroll(true);
        document.user_scroll(&ScrollTarget::Root, ScrollPosition::new(0.0, 500.0));

        controller.on_route_change(&Location::parse("/b"));
        scheduler.run_frame();
        assert_eq!(
            document.scroll_position(&ScrollTarget::Root),
            Some(ScrollPosition::ORIGIN)
        );
    }

    #[test]
    fn test_total_scroll_failure_is_swallowed() {
        let (document, scheduler, controller) = controller(ScrollResetOptions::default());
        document.set_reject_scroll(true);
        controller.on_route_change(&Location::parse("/b"));
        scheduler.run_frame();
        assert_eq!(document.scroll_calls(), 0);
    }

    #[test]
    fn test_unmount_cancels_queued_reset() {
        let (document, scheduler, controller) = controller(ScrollResetOptions::default());
        document.user_scroll(&ScrollTarget::Root, ScrollPosition::new(0.0, 42.0));
        controller.on_route_change(&Location::parse("/b"));
        assert_eq!(scheduler.pending_frames(), 1);

        controller.unmount();
        assert_eq!(scheduler.run_frame(), 0);
        assert_eq!(
            document.scroll_position(&ScrollTarget::Root),
            Some(ScrollPosition::new(0.0, 42.0))
        );
    }
}
