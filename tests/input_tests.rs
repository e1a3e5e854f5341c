// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn aspect_of_regular_canvas() {
    let a = aspect_of(Vec2::new(1600.0, 900.0)).unwrap();
    assert!((a - 16.0 / 9.0).abs() < 1e-6);
}

#[test]
fn aspect_of_collapsed_canvas_is_none() {
    assert_eq!(aspect_of(Vec2::new(0.0, 600.0)), None);
    assert_eq!(aspect_of(Vec2::new(800.0, 0.0)), None);
    assert_eq!(aspect_of(Vec2::new(0.5, 0.5)), None);
}

#[test]
fn first_aspect_always_counts_as_changed() {
    assert!(aspect_changed(None, 1.0));
}

#[test]
fn tiny_aspect_jitter_is_ignored() {
    assert!(!aspect_changed(Some(1.5), 1.5 + 1e-6));
    assert!(aspect_changed(Some(1.5), 1.6));
}

#[test]
fn release_outside_canvas_is_clamped() {
    let viewport = Vec2::new(800.0, 600.0);
    assert_eq!(
        clamp_to_viewport(Vec2::new(-20.0, 650.0), viewport),
        Vec2::new(0.0, 600.0)
    );
    assert_eq!(
        clamp_to_viewport(Vec2::new(400.0, 300.0), viewport),
        Vec2::new(400.0, 300.0)
    );
}
