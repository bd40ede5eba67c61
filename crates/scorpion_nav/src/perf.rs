//! Route-change timing
//!
//! Records when the layout mounted and when each route change happened,
//! measured on the scheduler clock. Logs at `debug`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use scorpion_core::Scheduler;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Performance tracking (`[perf]`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerfOptions {
    /// Defaults to on in debug builds only
    pub enabled: bool,
}

impl Default for PerfOptions {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
        }
    }
}

/// Collected timings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfMetrics {
    pub mounted_at: Duration,
    pub now: Duration,
    pub total: Duration,
    pub route_changes: u32,
    pub last_route: Option<String>,
    pub last_route_at: Option<Duration>,
}

pub struct PerfTracker {
    enabled: bool,
    scheduler: Rc<dyn Scheduler>,
    mounted_at: Duration,
    route_changes: Cell<u32>,
    last_route: RefCell<Option<(String, Duration)>>,
}

impl PerfTracker {
    pub fn new(scheduler: Rc<dyn Scheduler>, options: PerfOptions) -> Self {
        let mounted_at = scheduler.now();
        Self {
            enabled: options.enabled,
            scheduler,
            mounted_at,
            route_changes: Cell::new(0),
            last_route: RefCell::new(None),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a route change. Returns its timestamp while enabled.
    pub fn track_route_change(&self, path: &str) -> Option<Duration> {
        if !self.enabled {
            return None;
        }
        let at = self.scheduler.now();
        self.route_changes.set(self.route_changes.get() + 1);
        if let Some((previous, since)) = self.last_route.borrow().as_ref() {
            debug!(from = %previous, to = path, after = ?(at - *since), "route change");
        } else {
            debug!(to = path, ?at, "route change");
        }
        *self.last_route.borrow_mut() = Some((path.to_string(), at));
        Some(at)
    }

    pub fn metrics(&self) -> PerfMetrics {
        let now = self.scheduler.now();
        let last = self.last_route.borrow().clone();
        PerfMetrics {
            mounted_at: self.mounted_at,
            now,
            total: now.saturating_sub(self.mounted_at),
            route_changes: self.route_changes.get(),
            last_route_at: last.as_ref().map(|(_, at)| *at),
            last_route: last.map(|(path, _)| path),
        }
    }

    /// Log the lifetime of the tracked layout
    pub fn unmount(&self) {
        if self.enabled {
            let metrics = self.metrics();
            debug!(total = ?metrics.total, routes = metrics.route_changes, "layout lifecycle");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorpion_core::ManualScheduler;

    #[test]
    fn test_disabled_records_nothing() {
        let scheduler = Rc::new(ManualScheduler::new());
        let perf = PerfTracker::new(scheduler, PerfOptions { enabled: false });
        assert_eq!(perf.track_route_change("/a"), None);
        assert_eq!(perf.metrics().route_changes, 0);
    }

    #[test]
    fn test_records_route_changes_on_scheduler_clock() {
        let scheduler = Rc::new(ManualScheduler::new());
        scheduler.advance(Duration::from_millis(10));
        let perf = PerfTracker::new(scheduler.clone(), PerfOptions { enabled: true });

        scheduler.advance(Duration::from_millis(90));
        assert_eq!(perf.track_route_change("/a"), Some(Duration::from_millis(100)));
        scheduler.advance(Duration::from_millis(50));
        perf.track_route_change("/b");

        let metrics = perf.metrics();
        assert_eq!(metrics.mounted_at, Duration::from_millis(10));
        assert_eq!(metrics.total, Duration::from_millis(140));
        assert_eq!(metrics.route_changes, 2);
        assert_eq!(metrics.last_route.as_deref(), Some("/b"));
        assert_eq!(metrics.last_route_at, Some(Duration::from_millis(150)));
    }
}
