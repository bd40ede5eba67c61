//! Headless replay scenarios

use std::time::Duration;

use pretty_assertions::assert_eq;
use scorpion_cli::{Scenario, SiteConfig, Step};
use scorpion_nav::{LoaderPhase, LoadingState};
use scorpion_theme::ThemeName;

fn step(s: &str) -> Step {
    s.parse().unwrap()
}

#[test]
fn fast_pages_never_show_the_overlay() {
    let scenario = Scenario {
        steps: vec![step("/components/buttons@100"), step("/foundations@400")],
        ..Scenario::default()
    };

    let snapshots = scenario.run(&SiteConfig::default());
    assert_eq!(snapshots.len(), 4);
    for snapshot in &snapshots {
        assert!(!snapshot.loader.should_render, "at {}ms", snapshot.at_ms);
    }

    let last = snapshots.last().unwrap();
    assert_eq!(last.location, "/foundations");
    assert_eq!(last.loader_phase, LoaderPhase::Idle);
    assert_eq!(last.header_height.as_deref(), Some("56px"));
}

#[test]
fn slow_page_shows_overlay_then_settles() {
    let scenario = Scenario {
        steps: vec![
            step("/components/buttons@100"),
            // Same page, so the pending transition keeps running
            step("/components/buttons#variants@1300"),
        ],
        ready_after: Duration::from_millis(1500),
        ..Scenario::default()
    };

    let snapshots = scenario.run(&SiteConfig::default());

    let during = &snapshots[2];
    assert_eq!(during.at_ms, 1300);
    assert_eq!(during.page_title, "Buttons");
    assert_eq!(during.loader_phase, LoaderPhase::Visible);
    assert!(during.loader.should_render);

    let last = snapshots.last().unwrap();
    assert_eq!(last.loader_phase, LoaderPhase::Idle);
    assert_eq!(last.loader, LoadingState::HIDDEN);
}

#[test]
fn modern_theme_has_no_loader_or_header_height() {
    let scenario = Scenario {
        width: 900.0,
        theme: ThemeName::Modern,
        steps: vec![step("/components/forms@50")],
        ready_after: Duration::from_millis(2000),
        ..Scenario::default()
    };

    let snapshots = scenario.run(&SiteConfig::default());
    for snapshot in &snapshots {
        assert_eq!(snapshot.loader, LoadingState::HIDDEN);
        assert_eq!(snapshot.header_height, None);
        // 900px is above the mobile breakpoint
        assert!(!snapshot.compact_nav);
    }
}

#[test]
fn retro_collapses_sidebar_below_tablet() {
    let scenario = Scenario {
        width: 900.0,
        ..Scenario::default()
    };

    let snapshots = scenario.run(&SiteConfig::default());
    let first = &snapshots[0];
    assert!(first.compact_nav);
    assert!(!first.sidebar_open);
    assert!(!first.backdrop_visible);
}

#[test]
fn configured_timings_are_used() {
    let config = SiteConfig::from_toml(
        r#"
        [timings]
        show_delay_ms = 200
        "#,
    )
    .unwrap();
    let scenario = Scenario {
        start: "/components/cards".to_string(),
        steps: vec![step("/components/cards#top@300")],
        ready_after: Duration::from_millis(1000),
        ..Scenario::default()
    };

    let snapshots = scenario.run(&config);
    assert_eq!(snapshots[1].loader_phase, LoaderPhase::Visible);
}
