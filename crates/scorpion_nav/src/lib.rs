//! Scorpion Navigation
//!
//! Route-driven orchestration for the documentation site shell.
//!
//! # Components
//!
//! - [`BreakpointObserver`]: reactive "viewport below N px" flags
//! - [`ScrollResetController`]: scroll back to the top on route changes
//! - [`NavigationLoader`]: debounced, auto-fading loading overlay
//! - [`Sidebar`]: responsive sidebar with collapsible link groups
//! - [`HeaderHeightTracker`]: header height as a CSS custom property
//! - [`AppLayout`]: owns all of the above and wires them to the router and
//!   the theme store
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use scorpion_core::HeadlessHost;
//! use scorpion_nav::{AppLayout, NavConfig};
//! use scorpion_theme::{ThemeConfig, ThemeStore};
//!
//! let headless = HeadlessHost::new(1280.0);
//! let host = headless.host();
//! let theme = Rc::new(ThemeStore::load(
//!     host.storage.clone(),
//!     host.document.clone(),
//!     ThemeConfig::default(),
//! ));
//!
//! let layout = AppLayout::mount(host, theme, NavConfig::default(), "/");
//! layout.navigate("/components/buttons");
//!
//! // Content painted within two frames: no loading overlay
//! headless.scheduler.advance_with_frames(Duration::from_millis(1500), Duration::from_millis(16));
//! assert!(!layout.loader().state().should_render);
//! assert_eq!(layout.snapshot().page_title, "Buttons");
//! ```

pub mod breakpoint;
pub mod config;
pub mod header;
pub mod layout;
pub mod loader;
pub mod perf;
pub mod route;
pub mod routes;
pub mod scroll_reset;
pub mod sidebar;

pub use breakpoint::{device_class_for_width, BreakpointObserver, DeviceClass};
pub use config::{Breakpoints, HeaderConfig, NavConfig, NavTimings};
pub use header::HeaderHeightTracker;
pub use layout::{AppLayout, LayoutSnapshot, MAIN_CONTENT_SELECTOR};
pub use loader::{LoaderPhase, LoadingState, NavigationLoader};
pub use perf::{PerfMetrics, PerfOptions, PerfTracker};
pub use route::{Location, Router};
pub use routes::{NavGroup, NavLink, Route, HOME_LINK, NAV_GROUPS, NOT_FOUND, ROUTES};
pub use scroll_reset::{ScrollResetController, ScrollResetOptions};
pub use sidebar::{Sidebar, SidebarState};
