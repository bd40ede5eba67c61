//! Navigation configuration
//!
//! Every timing and threshold here is an empirically chosen UX constant.
//! Defaults match the shipped site.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::perf::PerfOptions;
use crate::scroll_reset::ScrollResetOptions;

/// Viewport width thresholds in CSS pixels (`[breakpoints]`)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Widths below this are "mobile"
    pub mobile: f64,
    /// Widths below this are "tablet or below"
    pub tablet: f64,
}

impl Breakpoints {
    pub const DEFAULT: Self = Self {
        mobile: 768.0,
        tablet: 1024.0,
    };
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Loader and sidebar timings in milliseconds (`[timings]`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavTimings {
    /// How long a navigation may take before the loading overlay mounts
    pub show_delay_ms: u64,
    /// Fade-out duration before the overlay unmounts
    pub fade_out_ms: u64,
    /// Delay before sidebar open/close transitions are enabled
    pub transition_guard_ms: u64,
}

impl NavTimings {
    pub const DEFAULT: Self = Self {
        show_delay_ms: 1000,
        fade_out_ms: 300,
        transition_guard_ms: 50,
    };

    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    pub fn transition_guard(&self) -> Duration {
        Duration::from_millis(self.transition_guard_ms)
    }
}

impl Default for NavTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Measured header (`[header]`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Selector of the app header element
    pub selector: String,
    /// Root CSS custom property receiving the height
    pub property: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            selector: "header[data-app-header]".to_string(),
            property: "--retro-header-h".to_string(),
        }
    }
}

/// Everything [`AppLayout`](crate::AppLayout) needs besides the host and theme
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub breakpoints: Breakpoints,
    pub timings: NavTimings,
    pub scroll: ScrollResetOptions,
    pub header: HeaderConfig,
    pub perf: PerfOptions,
}
