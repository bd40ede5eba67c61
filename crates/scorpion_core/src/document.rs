//! Document root and element access
//!
//! The orchestration layer talks to the page only through [`DocumentHost`]:
//! marker attributes and classes on the root element, CSS custom properties,
//! scroll positions, element measurement and body scroll locking.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::error::{HostError, Result};
use crate::viewport::ListenerId;

/// How a programmatic scroll moves
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Jump immediately
    #[default]
    Auto,
    /// Animate the scroll
    Smooth,
}

/// Scroll offset of a container in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

impl ScrollPosition {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }
}

/// A scrollable container
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollTarget {
    /// The page's root scrolling element
    Root,
    /// The first element matching a selector
    Element(String),
}

/// Access to the document for one running app.
///
/// Root writes are infallible from the caller's point of view; hosts that can
/// fail log and carry on.
pub trait DocumentHost {
    /// Set an attribute on the root element
    fn set_root_attribute(&self, name: &str, value: &str);

    /// Remove an attribute from the root element
    fn remove_root_attribute(&self, name: &str);

    /// Add (`on == true`) or remove a class on the root element
    fn toggle_root_class(&self, class: &str, on: bool);

    /// Set a CSS custom property on the root element's inline style
    fn set_root_style_property(&self, name: &str, value: &str);

    /// Whether a selector matches any element
    fn has_element(&self, selector: &str) -> bool;

    /// Rendered height of the first element matching a selector
    fn element_height(&self, selector: &str) -> Option<f64>;

    /// Current scroll offset of a container, `None` if it does not exist
    fn scroll_position(&self, target: &ScrollTarget) -> Option<ScrollPosition>;

    /// Scroll a container. Animated scrolling may be rejected by the host.
    fn scroll_to(
        &self,
        target: &ScrollTarget,
        position: ScrollPosition,
        behavior: ScrollBehavior,
    ) -> Result<()>;

    /// Call `callback` whenever the matched element changes size.
    ///
    /// Returns `None` if nothing matches the selector.
    fn observe_resize(&self, selector: &str, callback: Rc<dyn Fn()>) -> Option<ListenerId>;

    /// Disconnect a resize observer
    fn unobserve_resize(&self, id: ListenerId);

    /// Current inline `overflow` of the body
    fn body_overflow(&self) -> Option<String>;

    /// Set (or clear with `None`) the inline `overflow` of the body
    fn set_body_overflow(&self, value: Option<&str>);

    /// Move keyboard focus to the first matching element. Returns whether it existed.
    fn focus(&self, selector: &str) -> bool;

    /// Stop the browser from restoring scroll positions on history navigation
    fn set_manual_scroll_restoration(&self) -> Result<()>;
}

#[derive(Clone, Copy, Debug, Default)]
struct ElementState {
    height: f64,
    scroll: ScrollPosition,
}

/// In-memory document used headless and in tests.
#[derive(Default)]
pub struct MemoryDocument {
    attributes: RefCell<BTreeMap<String, String>>,
    classes: RefCell<BTreeSet<String>>,
    style: RefCell<BTreeMap<String, String>>,
    elements: RefCell<FxHashMap<String, ElementState>>,
    root_scroll: Cell<ScrollPosition>,
    body_overflow: RefCell<Option<String>>,
    focused: RefCell<Option<String>>,
    manual_restoration: Cell<bool>,
    reject_smooth_scroll: Cell<bool>,
    reject_scroll: Cell<bool>,
    scroll_calls: Cell<usize>,
    resize_observers: RefCell<SlotMap<ListenerId, (String, Rc<dyn Fn()>)>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Test/headless controls ==========

    /// Add an element (or replace its height)
    pub fn insert_element(&self, selector: &str, height: f64) {
        self.elements
            .borrow_mut()
            .entry(selector.to_string())
            .or_default()
            .height = height;
    }

    /// Remove an element
    pub fn remove_element(&self, selector: &str) {
        self.elements.borrow_mut().remove(selector);
    }

    /// Resize an element, firing its resize observers
    pub fn set_element_height(&self, selector: &str, height: f64) {
        self.insert_element(selector, height);

        let callbacks: Vec<Rc<dyn Fn()>> = self
            .resize_observers
            .borrow()
            .values()
            .filter(|(s, _)| s == selector)
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Simulate the user scrolling a container
    pub fn user_scroll(&self, target: &ScrollTarget, position: ScrollPosition) {
        match target {
            ScrollTarget::Root => self.root_scroll.set(position),
            ScrollTarget::Element(selector) => {
                if let Some(el) = self.elements.borrow_mut().get_mut(selector) {
                    el.scroll = position;
                }
            }
        }
    }

    /// Reject `ScrollBehavior::Smooth`, as older engines do
    pub fn set_reject_smooth_scroll(&self, reject: bool) {
        self.reject_smooth_scroll.set(reject);
    }

    /// Reject every scroll request
    pub fn set_reject_scroll(&self, reject: bool) {
        self.reject_scroll.set(reject);
    }

    // ========== Inspection ==========

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    pub fn style_property(&self, name: &str) -> Option<String> {
        self.style.borrow().get(name).cloned()
    }

    pub fn focused(&self) -> Option<String> {
        self.focused.borrow().clone()
    }

    pub fn manual_scroll_restoration(&self) -> bool {
        self.manual_restoration.get()
    }

    /// Number of successful programmatic scrolls
    pub fn scroll_calls(&self) -> usize {
        self.scroll_calls.get()
    }

    pub fn resize_observer_count(&self) -> usize {
        self.resize_observers.borrow().len()
    }
}

impl DocumentHost for MemoryDocument {
    fn set_root_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn remove_root_attribute(&self, name: &str) {
        self.attributes.borrow_mut().remove(name);
    }

    fn toggle_root_class(&self, class: &str, on: bool) {
        let mut classes = self.classes.borrow_mut();
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn set_root_style_property(&self, name: &str, value: &str) {
        self.style
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn has_element(&self, selector: &str) -> bool {
        self.elements.borrow().contains_key(selector)
    }

    fn element_height(&self, selector: &str) -> Option<f64> {
        self.elements.borrow().get(selector).map(|el| el.height)
    }

    fn scroll_position(&self, target: &ScrollTarget) -> Option<ScrollPosition> {
        match target {
            ScrollTarget::Root => Some(self.root_scroll.get()),
            ScrollTarget::Element(selector) => {
                self.elements.borrow().get(selector).map(|el| el.scroll)
            }
        }
    }

    fn scroll_to(
        &self,
        target: &ScrollTarget,
        position: ScrollPosition,
        behavior: ScrollBehavior,
    ) -> Result<()> {
        if self.reject_scroll.get() {
            return Err(HostError::Scroll("scrolling disabled".to_string()));
        }
        if behavior == ScrollBehavior::Smooth && self.reject_smooth_scroll.get() {
            return Err(HostError::Scroll(
                "smooth scrolling unsupported".to_string(),
            ));
        }

        match target {
            ScrollTarget::Root => self.root_scroll.set(position),
            ScrollTarget::Element(selector) => {
                let mut elements = self.elements.borrow_mut();
                let el = elements
                    .get_mut(selector)
                    .ok_or_else(|| HostError::ElementNotFound(selector.clone()))?;
                el.scroll = position;
            }
        }
        self.scroll_calls.set(self.scroll_calls.get() + 1);
        Ok(())
    }

    fn observe_resize(&self, selector: &str, callback: Rc<dyn Fn()>) -> Option<ListenerId> {
        if !self.has_element(selector) {
            return None;
        }
        Some(
            self.resize_observers
                .borrow_mut()
                .insert((selector.to_string(), callback)),
        )
    }

    fn unobserve_resize(&self, id: ListenerId) {
        self.resize_observers.borrow_mut().remove(id);
    }

    fn body_overflow(&self) -> Option<String> {
        self.body_overflow.borrow().clone()
    }

    fn set_body_overflow(&self, value: Option<&str>) {
        *self.body_overflow.borrow_mut() = value.map(str::to_string);
    }

    fn focus(&self, selector: &str) -> bool {
        if !self.has_element(selector) {
            return false;
        }
        *self.focused.borrow_mut() = Some(selector.to_string());
        true
    }

    fn set_manual_scroll_restoration(&self) -> Result<()> {
        self.manual_restoration.set(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_markers() {
        let doc = MemoryDocument::new();
        doc.set_root_attribute("data-theme", "retro");
        doc.toggle_root_class("theme-retro", true);
        assert_eq!(doc.attribute("data-theme").as_deref(), Some("retro"));
        assert!(doc.has_class("theme-retro"));

        doc.toggle_root_class("theme-retro", false);
        doc.remove_root_attribute("data-theme");
        assert!(!doc.has_class("theme-retro"));
        assert_eq!(doc.attribute("data-theme"), None);
    }

    #[test]
    fn test_smooth_scroll_rejection() {
        let doc = MemoryDocument::new();
        doc.user_scroll(&ScrollTarget::Root, ScrollPosition::new(0.0, 400.0));
        doc.set_reject_smooth_scroll(true);

        let err = doc
            .scroll_to(&ScrollTarget::Root, ScrollPosition::ORIGIN, ScrollBehavior::Smooth)
            .unwrap_err();
        assert!(matches!(err, HostError::Scroll(_)));
        assert_eq!(
            doc.scroll_position(&ScrollTarget::Root),
            Some(ScrollPosition::new(0.0, 400.0))
        );

        doc.scroll_to(&ScrollTarget::Root, ScrollPosition::ORIGIN, ScrollBehavior::Auto)
            .unwrap();
        assert_eq!(doc.scroll_position(&ScrollTarget::Root), Some(ScrollPosition::ORIGIN));
    }

    #[test]
    fn test_scroll_missing_element() {
        let doc = MemoryDocument::new();
        let target = ScrollTarget::Element("#missing".to_string());
        assert!(doc.scroll_position(&target).is_none());
        assert!(matches!(
            doc.scroll_to(&target, ScrollPosition::ORIGIN, ScrollBehavior::Auto),
            Err(HostError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_resize_observers_fire_for_matching_selector() {
        let doc = MemoryDocument::new();
        doc.insert_element("header", 64.0);
        doc.insert_element("main", 900.0);

        let fired = Rc::new(Cell::new(0));
        let fired_clone = fired.clone();
        let id = doc
            .observe_resize("header", Rc::new(move || fired_clone.set(fired_clone.get() + 1)))
            .unwrap();

        doc.set_element_height("main", 1000.0);
        assert_eq!(fired.get(), 0);

        doc.set_element_height("header", 80.0);
        assert_eq!(fired.get(), 1);

        doc.unobserve_resize(id);
        doc.set_element_height("header", 96.0);
        assert_eq!(fired.get(), 1);
        assert!(doc.observe_resize("footer", Rc::new(|| {})).is_none());
    }
}
