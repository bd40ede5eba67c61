//! Navigation loading indicator
//!
//! A full-screen overlay that only appears when a route transition is slow.
//!
//! ```text
//!            Navigate                 show delay
//!   Idle ──────────────▶ Pending ──────────────▶ Visible
//!    ▲                      │                      │ content ready
//!    │      content ready   │                      ▼
//!    ├──────────────────────┘                  FadingOut
//!    │                 fade-out elapsed            │
//!    └─────────────────────────────────────────────┘
//! ```
//!
//! Content readiness is approximated by two nested animation frames after the
//! path change. Every timer and frame callback belongs to exactly one
//! transition; starting a new transition or tearing down cancels them all, so
//! a callback from a superseded navigation can never touch the current state.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use scorpion_core::{Scheduler, Signal, StateMachine, Subscription, TaskId};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::NavTimings;

/// Loader phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoaderPhase {
    #[default]
    Idle,
    /// Navigation started, overlay not mounted yet
    Pending,
    /// Overlay mounted
    Visible,
    /// Overlay fading out before unmount
    FadingOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum LoaderEvent {
    Navigate,
    ShowDelayElapsed,
    ContentReady,
    FadeOutElapsed,
    Teardown,
}

/// Overlay render state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadingState {
    /// Overlay is mounted
    pub should_render: bool,
    /// Overlay is faded in. Never true unless `should_render` is.
    pub is_visible: bool,
}

impl LoadingState {
    pub const HIDDEN: Self = Self {
        should_render: false,
        is_visible: false,
    };
}

#[derive(Default)]
struct Tasks {
    show_timer: Option<TaskId>,
    visible_frame: Option<TaskId>,
    ready_frame: Option<TaskId>,
    fade_timer: Option<TaskId>,
}

struct LoaderInner {
    scheduler: Rc<dyn Scheduler>,
    timings: NavTimings,
    machine: RefCell<StateMachine<LoaderPhase, LoaderEvent>>,
    state: Signal<LoadingState>,
    tasks: RefCell<Tasks>,
    active: Cell<bool>,
}

/// Debounced, auto-fading loading overlay.
pub struct NavigationLoader {
    inner: Rc<LoaderInner>,
}

impl fmt::Debug for NavigationLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationLoader")
            .field("phase", &self.phase())
            .field("state", &self.state())
            .field("active", &self.is_active())
            .finish()
    }
}

fn build_machine() -> StateMachine<LoaderPhase, LoaderEvent> {
    use LoaderEvent::*;
    use LoaderPhase::*;

    StateMachine::builder(Idle)
        .on(Pending, ShowDelayElapsed, Visible)
        .on(Pending, ContentReady, Idle)
        .on(Visible, ContentReady, FadingOut)
        .on(FadingOut, FadeOutElapsed, Idle)
        .on_any(Navigate, Pending)
        .on_any(Teardown, Idle)
        .build()
}

impl NavigationLoader {
    /// Create an inactive loader
    pub fn new(scheduler: Rc<dyn Scheduler>, timings: NavTimings) -> Self {
        Self {
            inner: Rc::new(LoaderInner {
                scheduler,
                timings,
                machine: RefCell::new(build_machine()),
                state: Signal::new(LoadingState::HIDDEN),
                tasks: RefCell::new(Tasks::default()),
                active: Cell::new(false),
            }),
        }
    }

    /// Enable or disable the loader. Disabling tears down any transition in flight.
    pub fn set_active(&self, active: bool) {
        if self.inner.active.replace(active) == active {
            return;
        }
        debug!(active, "NavigationLoader::set_active");
        if !active {
            self.inner.teardown();
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    /// Start tracking a new path. No-op while inactive.
    pub fn on_path_change(&self) {
        if !self.inner.active.get() {
            return;
        }
        LoaderInner::begin(&self.inner);
    }

    /// Cancel everything and hide the overlay
    pub fn teardown(&self) {
        self.inner.teardown();
    }

    pub fn phase(&self) -> LoaderPhase {
        self.inner.machine.borrow().current_state()
    }

    pub fn state(&self) -> LoadingState {
        self.inner.state.get()
    }

    pub fn signal(&self) -> Signal<LoadingState> {
        self.inner.state.clone()
    }

    pub fn subscribe(&self, f: impl Fn(&LoadingState) + 'static) -> Subscription {
        self.inner.state.subscribe(f)
    }
}

impl Drop for NavigationLoader {
    fn drop(&mut self) {
        self.inner.cancel_all();
    }
}

impl LoaderInner {
    fn send(&self, event: LoaderEvent) -> Option<LoaderPhase> {
        self.machine.borrow_mut().send(event)
    }

    fn cancel_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for id in [
            tasks.show_timer,
            tasks.visible_frame,
            tasks.ready_frame,
            tasks.fade_timer,
        ]
        .into_iter()
        .flatten()
        {
            self.scheduler.cancel(id);
        }
    }

    fn teardown(&self) {
        self.cancel_all();
        self.send(LoaderEvent::Teardown);
        self.state.set(LoadingState::HIDDEN);
    }

    fn begin(this: &Rc<Self>) {
        this.cancel_all();
        this.state.set(LoadingState::HIDDEN);
        this.machine.borrow_mut().send(LoaderEvent::Navigate);
        debug!("NavigationLoader - pending");

        let weak = Rc::downgrade(this);
        let show_timer = this.scheduler.set_timeout(
            this.timings.show_delay(),
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    LoaderInner::on_show_delay(&inner);
                }
            }),
        );

        let weak = Rc::downgrade(this);
        let ready_frame = this.scheduler.request_animation_frame(Box::new(move || {
            // Second frame: the new route has painted
            if let Some(inner) = weak.upgrade() {
                let weak = Rc::downgrade(&inner);
                let id = inner.scheduler.request_animation_frame(Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        LoaderInner::on_content_ready(&inner);
                    }
                }));
                inner.tasks.borrow_mut().ready_frame = Some(id);
            }
        }));

        let mut tasks = this.tasks.borrow_mut();
        tasks.show_timer = Some(show_timer);
        tasks.ready_frame = Some(ready_frame);
        trace!(?show_timer, ?ready_frame, "loader tasks scheduled");
    }

    fn on_show_delay(this: &Rc<Self>) {
        this.tasks.borrow_mut().show_timer = None;
        if this.send(LoaderEvent::ShowDelayElapsed) != Some(LoaderPhase::Visible) {
            return;
        }
        debug!("NavigationLoader - visible");
        this.state.set(LoadingState {
            should_render: true,
            is_visible: false,
        });

        // Mount first, fade in on the next frame so the transition runs
        let weak: Weak<Self> = Rc::downgrade(this);
        let id = this.scheduler.request_animation_frame(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.tasks.borrow_mut().visible_frame = None;
                if inner.machine.borrow().is_in(LoaderPhase::Visible) {
                    inner.state.set(LoadingState {
                        should_render: true,
                        is_visible: true,
                    });
                }
            }
        }));
        this.tasks.borrow_mut().visible_frame = Some(id);
    }

    fn on_content_ready(this: &Rc<Self>) {
        this.tasks.borrow_mut().ready_frame = None;
        match this.send(LoaderEvent::ContentReady) {
            Some(LoaderPhase::Idle) => {
                if let Some(id) = this.tasks.borrow_mut().show_timer.take() {
                    this.scheduler.cancel(id);
                }
                debug!("NavigationLoader - content ready before show delay");
            }
            Some(LoaderPhase::FadingOut) => {
                if let Some(id) = this.tasks.borrow_mut().visible_frame.take() {
                    this.scheduler.cancel(id);
                }
                debug!("NavigationLoader - fading out");
                this.state.set(LoadingState {
                    should_render: true,
                    is_visible: false,
                });

                let weak = Rc::downgrade(this);
                let id = this.scheduler.set_timeout(
                    this.timings.fade_out(),
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            inner.tasks.borrow_mut().fade_timer = None;
                            if inner.send(LoaderEvent::FadeOutElapsed).is_some() {
                                debug!("NavigationLoader - idle");
                                inner.state.set(LoadingState::HIDDEN);
                            }
                        }
                    }),
                );
                this.tasks.borrow_mut().fade_timer = Some(id);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use scorpion_core::ManualScheduler;

    fn active_loader() -> (Rc<ManualScheduler>, NavigationLoader) {
        let scheduler = Rc::new(ManualScheduler::new());
        let loader = NavigationLoader::new(scheduler.clone(), NavTimings::default());
        loader.set_active(true);
        (scheduler, loader)
    }

    #[test]
    fn test_machine_transitions() {
        let mut machine = build_machine();
        assert_eq!(machine.send(LoaderEvent::ShowDelayElapsed), None);
        assert_eq!(machine.send(LoaderEvent::Navigate), Some(LoaderPhase::Pending));
        assert_eq!(
            machine.send(LoaderEvent::ShowDelayElapsed),
            Some(LoaderPhase::Visible)
        );
        assert_eq!(machine.send(LoaderEvent::Navigate), Some(LoaderPhase::Pending));
        assert_eq!(machine.send(LoaderEvent::ContentReady), Some(LoaderPhase::Idle));
        assert_eq!(machine.send(LoaderEvent::FadeOutElapsed), None);
        assert_eq!(machine.send(LoaderEvent::Teardown), Some(LoaderPhase::Idle));
    }

    #[test]
    fn test_inactive_loader_ignores_navigation() {
        let scheduler = Rc::new(ManualScheduler::new());
        let loader = NavigationLoader::new(scheduler.clone(), NavTimings::default());
        loader.on_path_change();
        assert_eq!(loader.phase(), LoaderPhase::Idle);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_fast_navigation_never_renders() {
        let (scheduler, loader) = active_loader();
        loader.on_path_change();
        assert_eq!(loader.phase(), LoaderPhase::Pending);

        scheduler.advance_with_frames(Duration::from_millis(2000), Duration::from_millis(16));
        assert_eq!(loader.phase(), LoaderPhase::Idle);
        assert_eq!(loader.state(), LoadingState::HIDDEN);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_slow_navigation_mounts_then_fades_in() {
        let (scheduler, loader) = active_loader();
        loader.on_path_change();

        scheduler.advance(Duration::from_millis(999));
        assert_eq!(loader.state(), LoadingState::HIDDEN);

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(loader.phase(), LoaderPhase::Visible);
        assert_eq!(
            loader.state(),
            LoadingState {
                should_render: true,
                is_visible: false
            }
        );
    }

    #[test]
    fn test_deactivating_hides_overlay() {
        let (scheduler, loader) = active_loader();
        loader.on_path_change();
        scheduler.advance(Duration::from_millis(1000));
        assert!(loader.state().should_render);

        loader.set_active(false);
        assert_eq!(loader.phase(), LoaderPhase::Idle);
        assert_eq!(loader.state(), LoadingState::HIDDEN);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_drop_cancels_pending_tasks() {
        let (scheduler, loader) = active_loader();
        loader.on_path_change();
        assert!(!scheduler.is_idle());
        drop(loader);
        assert!(scheduler.is_idle());
    }
}
