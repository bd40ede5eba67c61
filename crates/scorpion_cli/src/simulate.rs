//! Headless navigation replay
//!
//! Mounts an [`AppLayout`] on the in-memory host and drives it on the virtual
//! clock. Frames tick every 16ms. `ready_after` withholds frames for that long
//! after each navigation, which is how slow page content is simulated: the
//! loader only learns the page is ready once frames run again.

use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use scorpion_core::{HeadlessHost, ManualScheduler, MemoryStore, Scheduler};
use scorpion_nav::{AppLayout, LayoutSnapshot, MAIN_CONTENT_SELECTOR};
use scorpion_theme::{
    ThemeName, ThemeStore, RETRO_DARK_KEY, SCHEMA_VERSION_KEY, THEME_NAME_KEY,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SiteConfig;

/// Frame interval of the simulated display
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Header height used when the scenario doesn't give one
pub const DEFAULT_HEADER_HEIGHT: f64 = 56.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepParseError {
    #[error("step `{0}` must look like <url>@<ms>")]
    MissingAt(String),

    #[error("step `{0}` has an empty url")]
    EmptyUrl(String),

    #[error("step `{step}` has an invalid time: {reason}")]
    InvalidTime { step: String, reason: String },
}

/// One navigation at an offset from mount
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub url: String,
    pub at: Duration,
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (url, ms) = s
            .rsplit_once('@')
            .ok_or_else(|| StepParseError::MissingAt(s.to_string()))?;
        if url.is_empty() {
            return Err(StepParseError::EmptyUrl(s.to_string()));
        }
        let ms: u64 = ms.trim().parse().map_err(|e: std::num::ParseIntError| {
            StepParseError::InvalidTime {
                step: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            url: url.to_string(),
            at: Duration::from_millis(ms),
        })
    }
}

/// A replayable navigation session
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub width: f64,
    pub start: String,
    pub theme: ThemeName,
    pub retro_dark: bool,
    pub steps: Vec<Step>,
    pub ready_after: Duration,
    pub header_height: f64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            width: 1280.0,
            start: "/".to_string(),
            theme: ThemeName::Retro,
            retro_dark: false,
            steps: Vec::new(),
            ready_after: Duration::ZERO,
            header_height: DEFAULT_HEADER_HEIGHT,
        }
    }
}

impl Scenario {
    /// Replay the scenario and return a snapshot after mount, after every
    /// step, and once everything has settled.
    pub fn run(&self, config: &SiteConfig) -> Vec<LayoutSnapshot> {
        let storage = MemoryStore::with_entries([
            (SCHEMA_VERSION_KEY, config.theme.schema_version.as_str()),
            (THEME_NAME_KEY, self.theme.as_str()),
            (RETRO_DARK_KEY, if self.retro_dark { "true" } else { "false" }),
        ]);
        let headless = HeadlessHost::with_storage(self.width, storage);
        headless
            .document
            .insert_element(&config.header.selector, self.header_height);
        headless.document.insert_element(MAIN_CONTENT_SELECTOR, 0.0);

        let host = headless.host();
        let theme = Rc::new(ThemeStore::load(
            host.storage.clone(),
            host.document.clone(),
            config.theme.clone(),
        ));
        let layout = AppLayout::mount(host, theme, config.nav_config(), &self.start);
        info!(start = %self.start, width = self.width, "simulation mounted");

        let mut clock = Clock::new(&headless.scheduler);
        clock.navigated(self.ready_after);

        let mut snapshots = vec![layout.snapshot()];

        let mut steps = self.steps.clone();
        steps.sort_by_key(|step| step.at);
        for step in &steps {
            clock.run_until(step.at);
            debug!(url = %step.url, at_ms = step.at.as_millis() as u64, "simulated navigation");
            layout.navigate(&step.url);
            clock.navigated(self.ready_after);
            snapshots.push(layout.snapshot());
        }

        let settle = self.ready_after
            + config.timings.show_delay()
            + config.timings.fade_out()
            + FRAME_INTERVAL * 4;
        clock.run_until(headless.scheduler.now() + settle);
        snapshots.push(layout.snapshot());

        layout.unmount();
        snapshots
    }
}

/// Virtual clock driver
struct Clock<'a> {
    scheduler: &'a ManualScheduler,
    frames_resume_at: Duration,
}

impl<'a> Clock<'a> {
    fn new(scheduler: &'a ManualScheduler) -> Self {
        Self {
            scheduler,
            frames_resume_at: Duration::ZERO,
        }
    }

    fn navigated(&mut self, ready_after: Duration) {
        self.frames_resume_at = self.scheduler.now() + ready_after;
    }

    fn run_until(&mut self, target: Duration) {
        while self.scheduler.now() < target {
            let step = FRAME_INTERVAL.min(target - self.scheduler.now());
            self.scheduler.advance(step);
            if self.scheduler.now() >= self.frames_resume_at {
                self.scheduler.run_frame();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_step() {
        assert_eq!(
            "/components/buttons@250".parse::<Step>(),
            Ok(Step {
                url: "/components/buttons".to_string(),
                at: Duration::from_millis(250),
            })
        );
        // Only the last `@` separates the time
        assert_eq!(
            "/a@b@10".parse::<Step>().map(|s| s.url),
            Ok("/a@b".to_string())
        );
    }

    #[test]
    fn test_parse_step_errors() {
        assert_eq!(
            "/components".parse::<Step>(),
            Err(StepParseError::MissingAt("/components".to_string()))
        );
        assert_eq!(
            "@10".parse::<Step>(),
            Err(StepParseError::EmptyUrl("@10".to_string()))
        );
        assert!(matches!(
            "/x@soon".parse::<Step>(),
            Err(StepParseError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_clock_withholds_frames() {
        let scheduler = ManualScheduler::new();
        let mut clock = Clock::new(&scheduler);
        clock.navigated(Duration::from_millis(100));

        clock.run_until(Duration::from_millis(64));
        assert_eq!(scheduler.frame_count(), 0);

        clock.run_until(Duration::from_millis(160));
        assert!(scheduler.frame_count() > 0);
        assert_eq!(scheduler.now(), Duration::from_millis(160));
    }
}
