//! Timer and animation-frame scheduling
//!
//! Every deferred callback in the orchestration layer goes through a
//! [`Scheduler`] and is identified by a [`TaskId`] so the effect that started it
//! can cancel it on its next run or on unmount.
//!
//! [`ManualScheduler`] runs on a virtual clock: nothing fires until the caller
//! advances time or runs a frame, which makes race-prone sequences (rapid
//! navigation, late timers) reproducible in tests and in the headless CLI.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a pending timer or animation-frame callback
    pub struct TaskId;
}

/// A deferred callback
pub type Callback = Box<dyn FnOnce()>;

/// Cooperative, single-threaded scheduler.
pub trait Scheduler {
    /// Time elapsed since the scheduler started
    fn now(&self) -> Duration;

    /// Run `callback` once after `delay`
    fn set_timeout(&self, delay: Duration, callback: Callback) -> TaskId;

    /// Run `callback` before the next paint
    fn request_animation_frame(&self, callback: Callback) -> TaskId;

    /// Cancel a pending task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, id: TaskId);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskKind {
    Timer { due: Duration },
    Frame { frame: u64 },
}

struct Task {
    kind: TaskKind,
    seq: u64,
    callback: Callback,
}

/// Deterministic scheduler driven by explicit `advance` / `run_frame` calls.
pub struct ManualScheduler {
    tasks: RefCell<SlotMap<TaskId, Task>>,
    now: Cell<Duration>,
    /// Index of the next frame to run
    frame: Cell<u64>,
    seq: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            tasks: RefCell::new(SlotMap::with_key()),
            now: Cell::new(Duration::ZERO),
            frame: Cell::new(0),
            seq: Cell::new(0),
        }
    }

    fn insert(&self, kind: TaskKind, callback: Callback) -> TaskId {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.tasks.borrow_mut().insert(Task {
            kind,
            seq,
            callback,
        })
    }

    /// Advance the virtual clock, firing due timers in (due time, insertion) order.
    ///
    /// Timers scheduled by a callback fire within the same call if they fall
    /// due before the target time. Animation frames are not run.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;

        loop {
            let next = {
                let tasks = self.tasks.borrow();
                tasks
                    .iter()
                    .filter_map(|(id, task)| match task.kind {
                        TaskKind::Timer { due } if due <= target => Some((due, task.seq, id)),
                        _ => None,
                    })
                    .min()
            };

            let Some((due, _, id)) = next else {
                break;
            };

            self.now.set(due);
            let task = self.tasks.borrow_mut().remove(id);
            if let Some(task) = task {
                tracing::trace!(?id, ?due, "firing timer");
                (task.callback)();
            }
        }

        self.now.set(target);
    }

    /// Run one animation frame.
    ///
    /// Only callbacks requested before this call run; callbacks requested while
    /// the frame runs wait for the next frame. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let frame = self.frame.get();
        self.frame.set(frame + 1);

        let mut due: SmallVec<[(u64, TaskId); 8]> = self
            .tasks
            .borrow()
            .iter()
            .filter_map(|(id, task)| match task.kind {
                TaskKind::Frame { frame: f } if f <= frame => Some((task.seq, id)),
                _ => None,
            })
            .collect();
        due.sort_unstable();

        let mut ran = 0;
        for (_, id) in due {
            // An earlier callback in this frame may have cancelled it
            let task = self.tasks.borrow_mut().remove(id);
            if let Some(task) = task {
                (task.callback)();
                ran += 1;
            }
        }
        ran
    }

    /// Advance time in `frame_interval` steps, running a frame after each step,
    /// the way a browser interleaves timers and paints.
    pub fn advance_with_frames(&self, by: Duration, frame_interval: Duration) {
        if frame_interval.is_zero() {
            self.advance(by);
            self.run_frame();
            return;
        }

        let mut remaining = by;
        while !remaining.is_zero() {
            let step = remaining.min(frame_interval);
            self.advance(step);
            self.run_frame();
            remaining -= step;
        }
    }

    /// Number of pending timers
    pub fn pending_timers(&self) -> usize {
        self.tasks
            .borrow()
            .values()
            .filter(|t| matches!(t.kind, TaskKind::Timer { .. }))
            .count()
    }

    /// Number of pending animation-frame callbacks
    pub fn pending_frames(&self) -> usize {
        self.tasks
            .borrow()
            .values()
            .filter(|t| matches!(t.kind, TaskKind::Frame { .. }))
            .count()
    }

    /// Check whether a task is still pending
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.borrow().contains_key(id)
    }

    /// Check if nothing is scheduled
    pub fn is_idle(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Number of frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame.get()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn set_timeout(&self, delay: Duration, callback: Callback) -> TaskId {
        let due = self.now.get() + delay;
        let id = self.insert(TaskKind::Timer { due }, callback);
        tracing::trace!(?id, ?due, "timer scheduled");
        id
    }

    fn request_animation_frame(&self, callback: Callback) -> TaskId {
        let frame = self.frame.get();
        self.insert(TaskKind::Frame { frame }, callback)
    }

    fn cancel(&self, id: TaskId) {
        if self.tasks.borrow_mut().remove(id).is_some() {
            tracing::trace!(?id, "task cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Callback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        let make = move |label: &'static str| -> Callback {
            let log = log_clone.clone();
            Box::new(move || log.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let scheduler = ManualScheduler::new();
        let (log, make) = recorder();

        scheduler.set_timeout(Duration::from_millis(300), make("late"));
        scheduler.set_timeout(Duration::from_millis(100), make("early"));
        scheduler.set_timeout(Duration::from_millis(100), make("early-second"));

        scheduler.advance(Duration::from_millis(99));
        assert!(log.borrow().is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*log.borrow(), vec!["early", "early-second"]);

        scheduler.advance(Duration::from_millis(500));
        assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
        assert_eq!(scheduler.now(), Duration::from_millis(600));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let scheduler = ManualScheduler::new();
        let (log, make) = recorder();

        let id = scheduler.set_timeout(Duration::from_millis(10), make("cancelled"));
        scheduler.cancel(id);
        assert!(!scheduler.is_pending(id));

        scheduler.advance(Duration::from_secs(1));
        assert!(log.borrow().is_empty());
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_frame_requested_during_frame_runs_next_frame() {
        let scheduler = Rc::new(ManualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let s = scheduler.clone();
        let l = log.clone();
        scheduler.request_animation_frame(Box::new(move || {
            l.borrow_mut().push("outer");
            let l2 = l.clone();
            s.request_animation_frame(Box::new(move || l2.borrow_mut().push("inner")));
        }));

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(*log.borrow(), vec!["outer"]);
        assert_eq!(scheduler.pending_frames(), 1);

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_timer_scheduled_by_timer_fires_within_advance() {
        let scheduler = Rc::new(ManualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let s = scheduler.clone();
        let l = log.clone();
        scheduler.set_timeout(
            Duration::from_millis(100),
            Box::new(move || {
                l.borrow_mut().push(s.now().as_millis());
                let l2 = l.clone();
                let s2 = s.clone();
                s.set_timeout(
                    Duration::from_millis(50),
                    Box::new(move || l2.borrow_mut().push(s2.now().as_millis())),
                );
            }),
        );

        scheduler.advance(Duration::from_millis(200));
        assert_eq!(*log.borrow(), vec![100, 150]);
    }

    #[test]
    fn test_advance_with_frames_interleaves() {
        let scheduler = ManualScheduler::new();
        let (log, make) = recorder();

        scheduler.request_animation_frame(make("frame"));
        scheduler.set_timeout(Duration::from_millis(20), make("timer"));

        scheduler.advance_with_frames(Duration::from_millis(32), Duration::from_millis(16));
        assert_eq!(*log.borrow(), vec!["frame", "timer"]);
        assert_eq!(scheduler.frame_count(), 2);
    }
}
