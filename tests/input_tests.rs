// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn normalized_maps_corners_and_center() {
    assert_eq!(normalized(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(normalized(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(normalized(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn mouse_target_is_pitch_then_yaw() {
    // Right edge, vertical center: pure yaw.
    let t = mouse_target(800.0, 300.0, 800.0, 600.0);
    assert_eq!(t, Vec2::new(0.0, 0.5));
    // Top edge, horizontal center: pure pitch.
    let t = mouse_target(400.0, 0.0, 800.0, 600.0);
    assert_eq!(t, Vec2::new(0.5, 0.0));
}

#[test]
fn mouse_target_handles_degenerate_viewport() {
    let t = mouse_target(0.0, 0.0, 0.0, 0.0);
    assert!(t.is_finite());
}

#[test]
fn touch_drag_accumulates_and_clamps() {
    let mut p = PointerTarget::default();
    p.on_touch_start(1, 100.0, 100.0);
    assert!(p.is_dragging());

    // A tenth of the width to the right: yaw += 0.2.
    p.on_touch_move(1, 180.0, 100.0, 800.0, 600.0);
    assert!((p.target.y - 0.2).abs() < 1e-6);
    assert_eq!(p.target.x, 0.0);

    // Dragging up raises pitch.
    p.on_touch_move(1, 180.0, 40.0, 800.0, 600.0);
    assert!((p.target.x - 0.2).abs() < 1e-6);

    // Huge drag saturates at the limit.
    p.on_touch_move(1, 5000.0, -5000.0, 800.0, 600.0);
    assert_eq!(p.target, Vec2::splat(0.8));
}

#[test]
fn first_move_without_start_only_records_position() {
    let mut p = PointerTarget::default();
    p.on_touch_move(1, 300.0, 300.0, 800.0, 600.0);
    assert_eq!(p.target, Vec2::ZERO);
    assert!(p.is_dragging());
}

#[test]
fn multi_touch_is_ignored_and_end_clears() {
    let mut p = PointerTarget::default();
    p.on_touch_start(2, 10.0, 10.0);
    assert!(!p.is_dragging());

    p.on_touch_start(1, 10.0, 10.0);
    p.on_touch_move(2, 400.0, 10.0, 800.0, 600.0);
    assert_eq!(p.target, Vec2::ZERO);

    p.on_touch_end();
    assert!(!p.is_dragging());
    p.on_touch_move(1, 400.0, 10.0, 800.0, 600.0);
    assert_eq!(p.target, Vec2::ZERO, "a fresh gesture starts from its own first point");
}

#[test]
fn mouse_overrides_touch_target() {
    let mut p = PointerTarget::default();
    p.on_touch_start(1, 0.0, 0.0);
    p.on_touch_move(1, 400.0, 0.0, 800.0, 600.0);
    p.on_mouse_move(400.0, 300.0, 800.0, 600.0);
    assert_eq!(p.target, Vec2::ZERO);
}
