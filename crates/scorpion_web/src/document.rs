//! DOM access on `document.documentElement` and `document.body`

use std::cell::RefCell;
use std::rc::Rc;

use scorpion_core::{
    DocumentHost, HostError, ListenerId, Result, ScrollBehavior, ScrollPosition, ScrollTarget,
};
use slotmap::SlotMap;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, ResizeObserver, ScrollRestoration, ScrollToOptions};

use crate::url::style_value;

struct Observer {
    observer: ResizeObserver,
    _closure: Closure<dyn FnMut(js_sys::Array, ResizeObserver)>,
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// The page document
#[derive(Default)]
pub struct WebDocument {
    observers: RefCell<SlotMap<ListenerId, Observer>>,
}

fn window() -> Option<web_sys::Window> {
    web_sys::window()
}

fn document() -> Option<web_sys::Document> {
    window().and_then(|w| w.document())
}

fn root() -> Option<HtmlElement> {
    document()
        .and_then(|d| d.document_element())
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl WebDocument {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentHost for WebDocument {
    fn set_root_attribute(&self, name: &str, value: &str) {
        if let Some(Err(e)) = root().map(|r| r.set_attribute(name, value)) {
            warn!(name, error = %describe(e), "set_root_attribute failed");
        }
    }

    fn remove_root_attribute(&self, name: &str) {
        if let Some(Err(e)) = root().map(|r| r.remove_attribute(name)) {
            warn!(name, error = %describe(e), "remove_root_attribute failed");
        }
    }

    fn toggle_root_class(&self, class: &str, on: bool) {
        if let Some(Err(e)) = root().map(|r| r.class_list().toggle_with_force(class, on)) {
            warn!(class, error = %describe(e), "toggle_root_class failed");
        }
    }

    fn set_root_style_property(&self, name: &str, value: &str) {
        if let Some(Err(e)) = root().map(|r| r.style().set_property(name, value)) {
            warn!(name, error = %describe(e), "set_root_style_property failed");
        }
    }

    fn has_element(&self, selector: &str) -> bool {
        query(selector).is_some()
    }

    fn element_height(&self, selector: &str) -> Option<f64> {
        query(selector).map(|e| e.get_bounding_client_rect().height())
    }

    fn scroll_position(&self, target: &ScrollTarget) -> Option<ScrollPosition> {
        match target {
            ScrollTarget::Root => {
                let window = window()?;
                Some(ScrollPosition::new(
                    window.scroll_x().ok()?,
                    window.scroll_y().ok()?,
                ))
            }
            ScrollTarget::Element(selector) => {
                let element = query(selector)?;
                Some(ScrollPosition::new(
                    f64::from(element.scroll_left()),
                    f64::from(element.scroll_top()),
                ))
            }
        }
    }

    fn scroll_to(
        &self,
        target: &ScrollTarget,
        position: ScrollPosition,
        behavior: ScrollBehavior,
    ) -> Result<()> {
        let options = ScrollToOptions::new();
        options.set_left(position.x);
        options.set_top(position.y);
        options.set_behavior(match behavior {
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });

        match target {
            ScrollTarget::Root => window()
                .ok_or_else(|| HostError::Scroll("no window".to_string()))?
                .scroll_to_with_scroll_to_options(&options),
            ScrollTarget::Element(selector) => query(selector)
                .ok_or_else(|| HostError::ElementNotFound(selector.clone()))?
                .scroll_to_with_scroll_to_options(&options),
        }
        Ok(())
    }

    fn observe_resize(&self, selector: &str, callback: Rc<dyn Fn()>) -> Option<ListenerId> {
        let element = query(selector)?;
        let closure = Closure::<dyn FnMut(js_sys::Array, ResizeObserver)>::new(
            move |_entries: js_sys::Array, _observer: ResizeObserver| callback(),
        );
        let observer = match ResizeObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(e) => {
                warn!(selector, error = %describe(e), "ResizeObserver unavailable");
                return None;
            }
        };
        observer.observe(&element);
        Some(self.observers.borrow_mut().insert(Observer {
            observer,
            _closure: closure,
        }))
    }

    fn unobserve_resize(&self, id: ListenerId) {
        let _removed = self.observers.borrow_mut().remove(id);
    }

    fn body_overflow(&self) -> Option<String> {
        let body = document()?.body()?;
        body.style()
            .get_property_value("overflow")
            .ok()
            .and_then(|v| style_value(&v))
    }

    fn set_body_overflow(&self, value: Option<&str>) {
        let Some(body) = document().and_then(|d| d.body()) else {
            return;
        };
        let style = body.style();
        let result = match value {
            Some(value) => style.set_property("overflow", value),
            None => style.remove_property("overflow").map(|_| ()),
        };
        if let Err(e) = result {
            warn!(error = %describe(e), "set_body_overflow failed");
        }
    }

    fn focus(&self, selector: &str) -> bool {
        query(selector)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            .map(|e| e.focus().is_ok())
            .unwrap_or(false)
    }

    fn set_manual_scroll_restoration(&self) -> Result<()> {
        let history = window()
            .ok_or_else(|| HostError::Scroll("no window".to_string()))?
            .history()
            .map_err(|e| HostError::Scroll(describe(e)))?;
        history
            .set_scroll_restoration(ScrollRestoration::Manual)
            .map_err(|e| HostError::Scroll(describe(e)))
    }
}
