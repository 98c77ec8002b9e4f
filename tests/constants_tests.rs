// Host-side tests for the DOM contract and CSS value formatting.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use glam::Vec2;
use lantern_core::{constants::AMBIENT_TRACK_ID, DeviceClass, PointerSample};

#[test]
fn selectors_match_their_attributes() {
    assert_eq!(REVEAL_TARGET_SELECTOR, format!("[{}]", REVEAL_ID_ATTR));
    assert_eq!(TRACK_TOGGLE_SELECTOR, format!("[{}]", TRACK_TOGGLE_ATTR));
    assert!(TRACK_SELECTOR.starts_with("audio"));
    assert!(TRACK_SELECTOR.contains(TRACK_ID_ATTR));
}

#[test]
fn css_variables_are_custom_properties() {
    let vars = [
        VAR_MOUSE_X,
        VAR_MOUSE_Y,
        VAR_FLASHLIGHT_RADIUS,
        VAR_FLASHLIGHT_OPACITY,
        VAR_BACKGROUND,
        VAR_SUNRISE_OPACITY,
        VAR_PROGRESS_WIDTH,
        VAR_PROGRESS_OPACITY,
    ];
    for v in vars {
        assert!(v.starts_with("--"), "{} is not a custom property", v);
    }
    let mut sorted = vars.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), vars.len());
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        MUTE_BUTTON_ID,
        LOADING_OVERLAY_ID,
        ENTER_BUTTON_ID,
        INTRO_BANNER_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    // Ambient track id lives in markup as a data attribute, not an element id
    assert!(!ids.contains(&AMBIENT_TRACK_ID));
}

#[test]
fn px_and_pct_formatting() {
    assert_eq!(px(180.0), "180.0px");
    assert_eq!(px(DeviceClass::Touch.flashlight_radius_px()), "100.0px");
    assert_eq!(pct(0.0), "0.00%");
    assert_eq!(pct(33.333), "33.33%");
}

#[test]
fn pointer_sample_maps_to_flashlight_percentages() {
    let sample = PointerSample {
        x: 200.0,
        y: 150.0,
        timestamp_ms: 0.0,
    };
    let [x, y] = sample.to_viewport_percent(Vec2::new(800.0, 600.0));
    assert_eq!(pct(x), "25.00%");
    assert_eq!(pct(y), "25.00%");

    // Degenerate viewport centers the flashlight
    let [x, y] = sample.to_viewport_percent(Vec2::ZERO);
    assert_eq!(pct(x), "50.00%");
    assert_eq!(pct(y), "50.00%");
}
