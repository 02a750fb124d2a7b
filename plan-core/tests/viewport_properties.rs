//! Property-style tests for the viewport controller (plan-core).
//!
//! Sweeps event sequences and checks the invariants every transition must
//! keep: clamped scale, additive panning, and exact resets.

use plan_core::transform::{clamp_scale, DEFAULT_OFFSET, MAX_SCALE, MIN_SCALE};
use plan_core::{
    DisplayOptions, Point, SurfaceSize, ViewTransform, ViewportChange,
    ViewportController, ViewportEvent,
};

fn in_range(scale: f64) -> bool {
    (MIN_SCALE..=MAX_SCALE).contains(&scale)
}

/// Deterministic pseudo-random walk over host events.
fn event_walk(seed: u64, len: usize) -> Vec<ViewportEvent> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        state >> 33
    };
    (0..len)
        .map(|_| {
            #[allow(clippy::cast_precision_loss)]
            let coord = (next() % 800) as f64;
            match next() % 6 {
                0 => ViewportEvent::PointerDown(Point::new(coord, coord / 2.0)),
                1 => ViewportEvent::PointerMove(Point::new(coord / 3.0, coord)),
                2 => ViewportEvent::PointerUp,
                3 => ViewportEvent::PointerLeave,
                4 => ViewportEvent::Wheel {
                    delta_y: coord - 400.0,
                },
                _ => ViewportEvent::Resize(SurfaceSize::new(coord + 1.0, 300.0, 2.0)),
            }
        })
        .collect()
}

#[test]
fn test_scale_stays_clamped_for_any_event_sequence() {
    for seed in 0..50 {
        let mut vc = ViewportController::default();
        for event in event_walk(seed, 200) {
            vc.apply(&event);
            assert!(in_range(vc.scale()), "seed {seed}: scale {}", vc.scale());
        }
    }
}

#[test]
fn test_initial_scale_is_clamped() {
    for requested in [-5.0, 0.0, 1.0, 2.0, 10.0, 50.0, 51.0, 1e9, f64::NAN] {
        let options = DisplayOptions {
            scale: requested,
            ..DisplayOptions::default()
        };
        let vc = ViewportController::new(&options);
        assert!(in_range(vc.scale()));
        assert!((vc.initial_scale() - clamp_scale(requested)).abs() < f64::EPSILON);
    }
}

#[test]
fn test_drag_is_additive() {
    let mut vc = ViewportController::default();
    let start = vc.offset();
    vc.pointer_down(Point::new(200.0, 200.0));
    vc.pointer_move(Point::new(210.0, 190.0));
    vc.pointer_move(Point::new(260.0, 230.0));
    vc.pointer_up();
    assert_eq!(vc.offset(), start + Point::new(60.0, 30.0));

    vc.pointer_down(Point::new(0.0, 0.0));
    vc.pointer_move(Point::new(-20.0, 5.0));
    vc.pointer_leave();
    assert_eq!(vc.offset(), start + Point::new(40.0, 35.0));
    assert!(!vc.is_dragging());
}

#[test]
fn test_reset_after_any_sequence() {
    for seed in 0..20 {
        let mut vc = ViewportController::default();
        for event in event_walk(seed, 100) {
            vc.apply(&event);
        }
        assert_eq!(vc.reset(), ViewportChange::Redraw);
        assert!((vc.scale() - vc.initial_scale()).abs() < f64::EPSILON);
        assert_eq!(vc.offset(), DEFAULT_OFFSET);
    }
}

#[test]
fn test_button_zoom_round_trips_inside_range() {
    let mut vc = ViewportController::default();
    vc.zoom_in();
    vc.zoom_in();
    vc.zoom_out();
    vc.zoom_out();
    assert!((vc.scale() - 10.0).abs() < 1e-9);
}

#[test]
fn test_pointer_maps_back_to_plan() {
    let view = ViewTransform::new(12.5, Point::new(-30.0, 80.0));
    for (x, y) in [(0.0, 0.0), (40.0, 30.0), (13.25, 7.5)] {
        let plan = Point::new(x, y);
        let back = view.surface_to_plan(view.plan_to_surface(plan));
        assert!((back.x - plan.x).abs() < 1e-9);
        assert!((back.y - plan.y).abs() < 1e-9);
    }
}
