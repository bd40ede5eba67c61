//! `setTimeout` and `requestAnimationFrame` scheduling

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo::render::AnimationFrame;
use gloo::timers::callback::Timeout;
use scorpion_core::scheduler::Callback;
use scorpion_core::{Scheduler, TaskId};
use slotmap::SlotMap;
use tracing::trace;

use crate::url::timeout_millis;

enum Pending {
    Timer(Timeout),
    Frame(AnimationFrame),
}

type Tasks = RefCell<SlotMap<TaskId, Option<Pending>>>;

/// Browser event-loop scheduler.
///
/// Handles are kept until their callback runs; dropping a handle cancels the
/// browser task, so [`Scheduler::cancel`] just removes it.
pub struct WebScheduler {
    tasks: Rc<Tasks>,
    origin: f64,
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

impl WebScheduler {
    pub fn new() -> Self {
        Self {
            tasks: Rc::new(RefCell::new(SlotMap::with_key())),
            origin: performance_now(),
        }
    }

    fn schedule(&self, make: impl FnOnce(Box<dyn FnOnce()>) -> Pending) -> TaskId {
        // Reserve the id first so the browser callback can release its entry
        let id = self.tasks.borrow_mut().insert(None);
        let weak: Weak<Tasks> = Rc::downgrade(&self.tasks);
        let release = Box::new(move || {
            if let Some(tasks) = weak.upgrade() {
                let _fired = tasks.borrow_mut().remove(id);
            }
        });
        let pending = make(release);
        if let Some(slot) = self.tasks.borrow_mut().get_mut(id) {
            *slot = Some(pending);
        }
        id
    }

    /// Number of scheduled browser tasks
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Default for WebScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for WebScheduler {
    fn now(&self) -> Duration {
        Duration::from_secs_f64(((performance_now() - self.origin) / 1000.0).max(0.0))
    }

    fn set_timeout(&self, delay: Duration, callback: Callback) -> TaskId {
        let millis = timeout_millis(delay);
        let id = self.schedule(move |release| {
            Pending::Timer(Timeout::new(millis, move || {
                release();
                callback();
            }))
        });
        trace!(?id, millis, "set_timeout");
        id
    }

    fn request_animation_frame(&self, callback: Callback) -> TaskId {
        let id = self.schedule(move |release| {
            Pending::Frame(gloo::render::request_animation_frame(move |_timestamp| {
                release();
                callback();
            }))
        });
        trace!(?id, "request_animation_frame");
        id
    }

    fn cancel(&self, id: TaskId) {
        if self.tasks.borrow_mut().remove(id).is_some() {
            trace!(?id, "cancel");
        }
    }
}
