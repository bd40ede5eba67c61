//! JavaScript entry point

use std::rc::Rc;

use scorpion_core::Host;
use scorpion_nav::{AppLayout, NavConfig};
use scorpion_theme::{ThemeConfig, ThemeStore};
use tracing::info;
use wasm_bindgen::prelude::*;

use crate::document::WebDocument;
use crate::scheduler::WebScheduler;
use crate::storage::LocalStorage;
use crate::url::current_url;
use crate::viewport::WebViewport;

/// Host services backed by the current browser window
pub fn web_host() -> Host {
    Host {
        storage: Rc::new(LocalStorage::new()),
        document: Rc::new(WebDocument::new()),
        viewport: Rc::new(WebViewport::new()),
        scheduler: Rc::new(WebScheduler::new()),
    }
}

fn window_url() -> String {
    web_sys::window()
        .map(|w| w.location())
        .map(|l| {
            current_url(
                &l.pathname().unwrap_or_default(),
                &l.search().unwrap_or_default(),
                &l.hash().unwrap_or_default(),
            )
        })
        .unwrap_or_else(|| "/".to_string())
}

fn to_js_error(err: serde_json::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A mounted site layout, owned by JavaScript
#[wasm_bindgen]
pub struct ScorpionApp {
    layout: AppLayout,
}

#[wasm_bindgen]
impl ScorpionApp {
    /// Load the persisted theme and mount at the window's current location
    pub fn mount() -> ScorpionApp {
        let host = web_host();
        let theme = Rc::new(ThemeStore::load(
            host.storage.clone(),
            host.document.clone(),
            ThemeConfig::default(),
        ));
        let url = window_url();
        info!(%url, "ScorpionApp::mount");
        ScorpionApp {
            layout: AppLayout::mount(host, theme, NavConfig::default(), &url),
        }
    }

    /// Report a router navigation
    pub fn navigate(&self, url: &str) {
        self.layout.navigate(url);
    }

    pub fn toggle_theme(&self) {
        self.layout.theme().toggle_theme();
    }

    pub fn toggle_retro_dark(&self) {
        self.layout.theme().toggle_retro_dark();
    }

    pub fn toggle_sidebar(&self) {
        self.layout.toggle_sidebar();
    }

    /// A sidebar link was clicked
    pub fn select_link(&self, href: &str) {
        self.layout.select_link(href);
    }

    pub fn click_backdrop(&self) {
        self.layout.click_backdrop();
    }

    /// Toggle a sidebar group; returns the new expansion, `undefined` for unknown ids
    pub fn toggle_group(&self, id: &str) -> Option<bool> {
        self.layout.toggle_group(id)
    }

    /// Current layout state as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.layout.snapshot()).map_err(to_js_error)
    }

    /// Tear down every timer, observer and listener
    pub fn unmount(&self) {
        self.layout.unmount();
    }
}
