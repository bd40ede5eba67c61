//! App layout orchestrator
//!
//! [`AppLayout`] owns every navigation controller for one running app and wires
//! them to the router and the theme store:
//!
//! - Every location change goes to the scroll reset controller
//! - Path changes go to the loading indicator (retro only), the retro focus
//!   handling and the performance tracker
//! - Theme changes re-gate the loader and header tracker and recompute which
//!   breakpoint collapses the sidebar
//!
//! Unmounting (or dropping) the layout cancels every timer, observer, listener
//! and scroll lock it started.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use scorpion_core::{Host, Subscription, TaskId};
use scorpion_theme::{use_app_theme, ThemeName, ThemeState, ThemeStore};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::breakpoint::BreakpointObserver;
use crate::config::NavConfig;
use crate::header::HeaderHeightTracker;
use crate::loader::{LoaderPhase, LoadingState, NavigationLoader};
use crate::perf::{PerfMetrics, PerfTracker};
use crate::route::{Location, Router};
use crate::routes::{self, NAV_GROUPS};
use crate::scroll_reset::ScrollResetController;
use crate::sidebar::{Sidebar, SidebarState};

/// Focus target after a route change in the retro layout
pub const MAIN_CONTENT_SELECTOR: &str = "#main-content";

/// Serializable view of the whole layout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Scheduler clock in milliseconds
    pub at_ms: u64,
    pub theme: ThemeState,
    pub location: String,
    pub page_title: String,
    pub loader: LoadingState,
    pub loader_phase: LoaderPhase,
    pub compact_nav: bool,
    pub sidebar: SidebarState,
    pub sidebar_open: bool,
    pub backdrop_visible: bool,
    pub header_height: Option<String>,
}

struct LayoutInner {
    host: Host,
    theme: Rc<ThemeStore>,
    router: Router,
    mobile: BreakpointObserver,
    tablet: BreakpointObserver,
    sidebar: Sidebar,
    loader: NavigationLoader,
    scroll: ScrollResetController,
    header: HeaderHeightTracker,
    perf: PerfTracker,
    applied_theme: Cell<Option<ThemeName>>,
    focus_frame: Cell<Option<TaskId>>,
    subscriptions: RefCell<SmallVec<[Subscription; 4]>>,
    mounted: Cell<bool>,
}

/// The mounted application shell.
pub struct AppLayout {
    inner: Rc<LayoutInner>,
}

impl fmt::Debug for AppLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppLayout")
            .field("location", &self.inner.router.location())
            .field("theme", &self.inner.theme.get())
            .field("mounted", &self.inner.mounted.get())
            .finish()
    }
}

impl AppLayout {
    /// Mount at `url` using the theme store provided by the enclosing
    /// [`ThemeProvider`](scorpion_theme::ThemeProvider).
    ///
    /// # Panics
    ///
    /// Panics outside a theme provider.
    #[track_caller]
    pub fn mount_in_provider(host: Host, config: NavConfig, url: &str) -> Self {
        Self::mount(host, use_app_theme(), config, url)
    }

    /// Mount at `url`.
    pub fn mount(host: Host, theme: Rc<ThemeStore>, config: NavConfig, url: &str) -> Self {
        let location = Location::parse(url);
        info!(%location, theme = %theme.theme(), "AppLayout::mount");

        let NavConfig {
            breakpoints,
            timings,
            scroll,
            header,
            perf,
        } = config;

        let inner = Rc::new(LayoutInner {
            mobile: BreakpointObserver::mobile(host.viewport.clone(), &breakpoints),
            tablet: BreakpointObserver::tablet_or_below(host.viewport.clone(), &breakpoints),
            sidebar: Sidebar::mount(
                host.document.clone(),
                host.scheduler.clone(),
                NAV_GROUPS,
                &location.path,
                timings.transition_guard(),
            ),
            loader: NavigationLoader::new(host.scheduler.clone(), timings),
            scroll: ScrollResetController::new(
                host.document.clone(),
                host.scheduler.clone(),
                scroll,
            ),
            header: HeaderHeightTracker::new(host.document.clone(), host.viewport.clone(), header),
            perf: PerfTracker::new(host.scheduler.clone(), perf),
            router: Router::new(location.clone()),
            host,
            theme,
            applied_theme: Cell::new(None),
            focus_frame: Cell::new(None),
            subscriptions: RefCell::new(SmallVec::new()),
            mounted: Cell::new(true),
        });

        inner.mobile.mount();
        inner.tablet.mount();

        let subscriptions = {
            let on_breakpoint = |weak: Weak<LayoutInner>| {
                move |_: &Option<bool>| {
                    if let Some(inner) = weak.upgrade() {
                        inner.sync_compact();
                    }
                }
            };
            let weak = Rc::downgrade(&inner);
            let on_theme = move |state: &ThemeState| {
                if let Some(inner) = weak.upgrade() {
                    LayoutInner::apply_theme(&inner, state.theme_name);
                }
            };
            [
                inner.mobile.subscribe(on_breakpoint(Rc::downgrade(&inner))),
                inner.tablet.subscribe(on_breakpoint(Rc::downgrade(&inner))),
                inner.theme.subscribe(on_theme),
            ]
        };
        inner.subscriptions.borrow_mut().extend(subscriptions);

        LayoutInner::apply_theme(&inner, inner.theme.theme());
        inner.scroll.on_route_change(&location);
        inner.perf.track_route_change(&location.path);

        Self { inner }
    }

    // ========== Reads ==========

    pub fn location(&self) -> Location {
        self.inner.router.location()
    }

    pub fn router(&self) -> &Router {
        &self.inner.router
    }

    pub fn theme(&self) -> &Rc<ThemeStore> {
        &self.inner.theme
    }

    pub fn loader(&self) -> &NavigationLoader {
        &self.inner.loader
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.inner.sidebar
    }

    pub fn scroll_reset(&self) -> &ScrollResetController {
        &self.inner.scroll
    }

    pub fn header(&self) -> &HeaderHeightTracker {
        &self.inner.header
    }

    pub fn mobile(&self) -> &BreakpointObserver {
        &self.inner.mobile
    }

    pub fn tablet_or_below(&self) -> &BreakpointObserver {
        &self.inner.tablet
    }

    /// Whether the sidebar collapses into an overlay
    pub fn compact_nav(&self) -> bool {
        self.inner.compact_nav()
    }

    pub fn perf_metrics(&self) -> PerfMetrics {
        self.inner.perf.metrics()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        let inner = &self.inner;
        let location = inner.router.location();
        let sidebar = inner.sidebar.state();
        LayoutSnapshot {
            at_ms: inner.host.scheduler.now().as_millis() as u64,
            theme: inner.theme.get(),
            page_title: routes::resolve(&location.path).title.to_string(),
            location: location.to_string(),
            loader: inner.loader.state(),
            loader_phase: inner.loader.phase(),
            compact_nav: inner.compact_nav(),
            sidebar_open: sidebar.is_open(),
            backdrop_visible: sidebar.backdrop_visible(),
            sidebar,
            header_height: inner.header.current_value(),
        }
    }

    // ========== Actions ==========

    /// Navigate to `url`
    pub fn navigate(&self, url: &str) {
        LayoutInner::navigate(&self.inner, url);
    }

    /// A sidebar link was clicked
    pub fn select_link(&self, href: &str) {
        self.inner.sidebar.select_link(href);
        self.navigate(href);
    }

    /// Header menu button
    pub fn toggle_sidebar(&self) {
        self.inner.sidebar.toggle();
    }

    pub fn click_backdrop(&self) {
        self.inner.sidebar.click_backdrop();
    }

    pub fn toggle_group(&self, id: &str) -> Option<bool> {
        self.inner.sidebar.toggle_group(id)
    }

    /// Tear down every timer, observer, listener and scroll lock.
    pub fn unmount(&self) {
        self.inner.unmount();
    }
}

impl Drop for AppLayout {
    fn drop(&mut self) {
        self.inner.unmount();
    }
}

impl LayoutInner {
    fn compact_nav(&self) -> bool {
        if self.theme.theme().is_retro() {
            self.tablet.is_below()
        } else {
            self.mobile.is_below()
        }
    }

    fn sync_compact(&self) {
        if self.mounted.get() {
            self.sidebar.set_compact(self.compact_nav());
        }
    }

    fn navigate(this: &Rc<Self>, url: &str) {
        if !this.mounted.get() {
            warn!(url, "navigate called on an unmounted layout");
            return;
        }
        let Some(previous) = this.router.navigate(url) else {
            return;
        };
        let location = this.router.location();
        debug!(from = %previous, to = %location, "AppLayout::navigate");

        if previous.path != location.path {
            this.scroll.on_route_change(&location);
            this.loader.on_path_change();
            if this.theme.theme().is_retro() {
                Self::schedule_focus_main(this);
            }
            this.perf.track_route_change(&location.path);
        }
    }

    fn apply_theme(this: &Rc<Self>, theme: ThemeName) {
        if !this.mounted.get() {
            return;
        }
        let previous = this.applied_theme.replace(Some(theme));
        if previous == Some(theme) {
            return;
        }
        debug!(%theme, "AppLayout - applying theme");

        if theme.is_retro() {
            this.header.activate();
            if let Err(err) = this.host.document.set_manual_scroll_restoration() {
                warn!(%err, "failed to disable history scroll restoration");
            }
            this.loader.set_active(true);
            this.loader.on_path_change();
            if previous.is_some() {
                this.scroll.reset_scroll();
            }
            Self::schedule_focus_main(this);
        } else {
            this.header.deactivate();
            this.loader.set_active(false);
            this.cancel_focus();
        }
        this.sync_compact();
    }

    /// Focus the main region two frames out, after the scroll reset has run
    fn schedule_focus_main(this: &Rc<Self>) {
        this.cancel_focus();
        let scheduler = &this.host.scheduler;
        let weak = Rc::downgrade(this);
        let id = scheduler.request_animation_frame(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let weak = Rc::downgrade(&inner);
            let id = inner
                .host
                .scheduler
                .request_animation_frame(Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.focus_frame.set(None);
                        if !inner.host.document.focus(MAIN_CONTENT_SELECTOR) {
                            debug!("main content not found, focus skipped");
                        }
                    }
                }));
            inner.focus_frame.set(Some(id));
        }));
        this.focus_frame.set(Some(id));
    }

    fn cancel_focus(&self) {
        if let Some(id) = self.focus_frame.take() {
            self.host.scheduler.cancel(id);
        }
    }

    fn unmount(&self) {
        if !self.mounted.replace(false) {
            return;
        }
        info!(location = %self.router.location(), "AppLayout::unmount");

        self.subscriptions.borrow_mut().clear();
        self.cancel_focus();
        self.loader.teardown();
        self.scroll.unmount();
        self.header.deactivate();
        self.sidebar.unmount();
        self.mobile.unmount();
        self.tablet.unmount();
        self.perf.unmount();
    }
}
