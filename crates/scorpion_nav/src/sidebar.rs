//! Responsive sidebar
//!
//! On a compact (narrow) layout the sidebar is an overlay that opens and
//! closes; on a wide layout it is always shown. Link groups expand
//! independently, seeded once from the path the sidebar was mounted on.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use scorpion_core::{DocumentHost, Scheduler, Signal, Subscription, TaskId};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::routes::NavGroup;

/// Snapshot of the sidebar
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarState {
    /// Stored open flag (only meaningful while compact)
    pub open: bool,
    /// Layout is compact
    pub compact: bool,
    /// Group id to expanded flag, in display order
    pub groups: IndexMap<String, bool>,
    /// Open/close CSS transitions enabled (false during the first paint)
    pub transitions_enabled: bool,
}

impl SidebarState {
    /// Whether the sidebar is shown
    pub fn is_open(&self) -> bool {
        !self.compact || self.open
    }

    /// Whether the backdrop behind the overlay is shown
    pub fn backdrop_visible(&self) -> bool {
        self.compact && self.open
    }
}

struct SidebarInner {
    document: Rc<dyn DocumentHost>,
    scheduler: Rc<dyn Scheduler>,
    state: Signal<SidebarState>,
    /// Body overflow to restore when the scroll lock is released
    saved_overflow: RefCell<Option<Option<String>>>,
    guard_timer: Cell<Option<TaskId>>,
}

/// Sidebar controller.
pub struct Sidebar {
    inner: Rc<SidebarInner>,
}

impl fmt::Debug for Sidebar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sidebar").field("state", &self.state()).finish()
    }
}

impl Sidebar {
    /// Mount closed, with groups seeded from `path`, and schedule the
    /// transition guard.
    pub fn mount(
        document: Rc<dyn DocumentHost>,
        scheduler: Rc<dyn Scheduler>,
        groups: &[NavGroup],
        path: &str,
        transition_guard: std::time::Duration,
    ) -> Self {
        let groups: IndexMap<String, bool> = groups
            .iter()
            .map(|group| (group.id.to_string(), group.contains(path)))
            .collect();
        debug!(?groups, path, "Sidebar::mount");

        let inner = Rc::new(SidebarInner {
            document,
            scheduler,
            state: Signal::new(SidebarState {
                open: false,
                compact: false,
                groups,
                transitions_enabled: false,
            }),
            saved_overflow: RefCell::new(None),
            guard_timer: Cell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let id = inner.scheduler.set_timeout(
            transition_guard,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.guard_timer.set(None);
                    inner.state.update(|mut s| {
                        s.transitions_enabled = true;
                        s
                    });
                    trace!("sidebar transitions enabled");
                }
            }),
        );
        inner.guard_timer.set(Some(id));

        Self { inner }
    }

    pub fn state(&self) -> SidebarState {
        self.inner.state.get()
    }

    pub fn signal(&self) -> Signal<SidebarState> {
        self.inner.state.clone()
    }

    pub fn subscribe(&self, f: impl Fn(&SidebarState) + 'static) -> Subscription {
        self.inner.state.subscribe(f)
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.with(SidebarState::is_open)
    }

    pub fn backdrop_visible(&self) -> bool {
        self.inner.state.with(SidebarState::backdrop_visible)
    }

    pub fn is_compact(&self) -> bool {
        self.inner.state.with(|s| s.compact)
    }

    pub fn transitions_enabled(&self) -> bool {
        self.inner.state.with(|s| s.transitions_enabled)
    }

    pub fn is_group_expanded(&self, id: &str) -> Option<bool> {
        self.inner.state.with(|s| s.groups.get(id).copied())
    }

    /// Switch between the compact overlay and the wide layout
    pub fn set_compact(&self, compact: bool) {
        self.modify(|s| s.compact = compact);
    }

    pub fn toggle(&self) {
        self.modify(|s| s.open = !s.open);
    }

    pub fn set_open(&self, open: bool) {
        self.modify(|s| s.open = open);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    /// Backdrop click closes the overlay
    pub fn click_backdrop(&self) {
        if self.backdrop_visible() {
            self.close();
        }
    }

    /// A navigation link was selected. Closes the overlay on compact layouts.
    pub fn select_link(&self, href: &str) {
        if self.is_compact() {
            debug!(href, "sidebar link selected, closing");
            self.close();
        }
    }

    /// Flip one group. Returns the new flag, `None` for an unknown group.
    pub fn toggle_group(&self, id: &str) -> Option<bool> {
        let mut expanded = None;
        self.modify(|s| {
            if let Some(flag) = s.groups.get_mut(id) {
                *flag = !*flag;
                expanded = Some(*flag);
            }
        });
        expanded
    }

    /// Release the scroll lock and cancel the transition guard
    pub fn unmount(&self) {
        if let Some(id) = self.inner.guard_timer.take() {
            self.inner.scheduler.cancel(id);
        }
        self.inner.release_scroll_lock();
    }

    fn modify(&self, f: impl FnOnce(&mut SidebarState)) {
        let mut next = self.inner.state.get();
        f(&mut next);
        if self.inner.state.set(next) {
            self.inner.sync_scroll_lock();
        }
    }
}

impl Drop for Sidebar {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl SidebarInner {
    fn sync_scroll_lock(&self) {
        if self.state.with(SidebarState::backdrop_visible) {
            self.acquire_scroll_lock();
        } else {
            self.release_scroll_lock();
        }
    }

    fn acquire_scroll_lock(&self) {
        let mut saved = self.saved_overflow.borrow_mut();
        if saved.is_some() {
            return;
        }
        *saved = Some(self.document.body_overflow());
        self.document.set_body_overflow(Some("hidden"));
        debug!("body scroll locked");
    }

    fn release_scroll_lock(&self) {
        let Some(previous) = self.saved_overflow.borrow_mut().take() else {
            return;
        };
        self.document.set_body_overflow(previous.as_deref());
        debug!("body scroll restored");
    }
}
