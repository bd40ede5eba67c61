//! Headless host services working together

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use scorpion_core::{
    provide, try_use_context, DocumentHost, HeadlessHost, KeyValueStore, MediaQuery, MemoryStore,
    Scheduler, ScrollBehavior, ScrollPosition, ScrollTarget, Signal, ViewportHost,
};

#[test]
fn media_listener_fires_only_on_flip() {
    let headless = HeadlessHost::new(1280.0);
    let host = headless.host();
    let hits = Rc::new(Cell::new(0));

    let h = hits.clone();
    let id = host
        .viewport
        .add_media_listener(MediaQuery::below(768.0), Rc::new(move || h.set(h.get() + 1)));

    headless.viewport.resize(1000.0);
    assert_eq!(hits.get(), 0);
    headless.viewport.resize(767.0);
    assert_eq!(hits.get(), 1);
    headless.viewport.resize(500.0);
    assert_eq!(hits.get(), 1);
    headless.viewport.resize(768.0);
    assert_eq!(hits.get(), 2);

    host.viewport.remove_listener(id);
    headless.viewport.resize(100.0);
    assert_eq!(hits.get(), 2);
    assert_eq!(headless.viewport.listener_count(), 0);
}

#[test]
fn signal_driven_by_scheduled_timer() {
    let headless = HeadlessHost::new(1024.0);
    let signal = Signal::new(0u32);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let s = seen.clone();
    let _subscription = signal.subscribe(move |v| s.borrow_mut().push(*v));

    for (delay, value) in [(30, 2u32), (10, 1), (20, 1)] {
        let signal = signal.clone();
        headless.scheduler.set_timeout(
            Duration::from_millis(delay),
            Box::new(move || {
                signal.set(value);
            }),
        );
    }

    headless.scheduler.advance(Duration::from_millis(100));
    // The 20ms write repeats the current value and is not notified
    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert!(headless.scheduler.is_idle());
}

#[test]
fn storage_failures_are_reported_not_applied() {
    let store = MemoryStore::with_entries([("theme-name", "retro")]);
    store.set_fail_writes(true);

    assert!(store.set("theme-name", "modern").is_err());
    assert_eq!(store.get("theme-name"), Ok(Some("retro".to_string())));

    store.set_unavailable(true);
    assert!(store.get("theme-name").is_err());
}

#[test]
fn scroll_requests_are_recorded() {
    let headless = HeadlessHost::new(1280.0);
    let document = headless.document.clone();
    document.user_scroll(&ScrollTarget::Root, ScrollPosition::new(0.0, 900.0));

    document
        .scroll_to(&ScrollTarget::Root, ScrollPosition::default(), ScrollBehavior::Auto)
        .unwrap();
    assert_eq!(
        document.scroll_position(&ScrollTarget::Root),
        Some(ScrollPosition::default())
    );

    document.set_reject_smooth_scroll(true);
    assert!(document
        .scroll_to(&ScrollTarget::Root, ScrollPosition::default(), ScrollBehavior::Smooth)
        .is_err());
    assert_eq!(
        document.scroll_position(&ScrollTarget::Element("#missing".to_string())),
        None
    );
}

#[test]
fn nested_providers_shadow_and_restore() {
    struct Locale(&'static str);

    assert!(try_use_context::<Locale>().is_none());
    let outer = provide(Rc::new(Locale("en")));
    {
        let _inner = provide(Rc::new(Locale("ko")));
        assert_eq!(try_use_context::<Locale>().map(|l| l.0), Some("ko"));
    }
    assert_eq!(try_use_context::<Locale>().map(|l| l.0), Some("en"));
    drop(outer);
    assert!(try_use_context::<Locale>().is_none());
}
