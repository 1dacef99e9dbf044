// Host-side tests for the orbit/scroll state machine and input queue.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use showroom_core::constants::{MAX_DISTANCE, MAX_POLAR_ANGLE, MIN_DISTANCE};
use showroom_core::{InputEvent, InputQueue, InteractionController, InteractionMode, Orbit};
use std::f32::consts::{PI, TAU};

fn detail() -> InteractionController {
    let mut c = InteractionController::default();
    c.enter_detail();
    c
}

#[test]
fn canonical_orbit_sits_at_the_detail_preset() {
    let orbit = Orbit::canonical();
    let eye = orbit.eye();
    assert!((eye - glam::Vec3::new(4.0, 2.0, 4.0)).length() < 1e-4);
    assert!((orbit.distance - 6.0).abs() < 1e-5);
    assert!((orbit.polar - (1.0f32 / 3.0).acos()).abs() < 1e-5);
    assert_eq!(orbit.yaw, 0.0);
}

#[test]
fn scroll_drives_ambient_yaw() {
    let mut c = InteractionController::default();
    assert_eq!(c.mode(), InteractionMode::Ambient);
    c.set_scroll_fraction(0.0);
    assert_eq!(c.yaw(), 0.0);
    c.set_scroll_fraction(0.5);
    assert!((c.yaw() - PI).abs() < 1e-5);
    c.set_scroll_fraction(1.0);
    assert!((c.yaw() - TAU).abs() < 1e-5);
}

#[test]
fn scroll_is_clamped_and_non_finite_ignored() {
    let mut c = InteractionController::default();
    c.set_scroll_fraction(0.25);
    c.set_scroll_fraction(f32::NAN);
    assert_eq!(c.state().scroll_fraction, 0.25);
    c.set_scroll_fraction(3.0);
    assert_eq!(c.state().scroll_fraction, 1.0);
    c.set_scroll_fraction(-2.0);
    assert_eq!(c.state().scroll_fraction, 0.0);
}

#[test]
fn ambient_ignores_drag_and_wheel() {
    let mut c = InteractionController::default();
    let before = c.state().orbit;
    c.drag(0.3, 0.2);
    c.wheel(500.0);
    assert_eq!(c.state().orbit, before);
}

#[test]
fn drag_directions() {
    let mut c = detail();
    let polar0 = c.polar();
    c.drag(0.1, 0.0);
    assert!(c.yaw() > 0.0);
    c.drag(0.0, -0.05);
    assert!(c.polar() < polar0);
    c.drag(0.0, 0.02);
    let p = c.polar();
    c.drag(0.0, 0.01);
    assert!(c.polar() >= p);
}

#[test]
fn wheel_moves_camera_away_on_positive_delta() {
    let mut c = detail();
    let d0 = c.distance();
    c.wheel(100.0);
    assert!(c.distance() > d0);
    c.wheel(-200.0);
    assert!(c.distance() < d0);
}

#[test]
fn zoom_and_polar_stay_clamped_under_random_input() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut c = detail();
        for _ in 0..200 {
            match rng.gen_range(0..3) {
                0 => c.wheel(rng.gen_range(-5000.0..5000.0)),
                1 => c.drag(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)),
                _ => c.wheel(if rng.gen_bool(0.5) { 1e9 } else { -1e9 }),
            }
            assert!(c.distance() >= MIN_DISTANCE && c.distance() <= MAX_DISTANCE);
            assert!(c.polar() >= 0.0 && c.polar() <= MAX_POLAR_ANGLE);
        }
    }
}

#[test]
fn extreme_and_non_finite_input() {
    let mut c = detail();
    c.wheel(f32::INFINITY);
    c.drag(f32::NAN, 0.1);
    assert_eq!(c.state().orbit, Orbit::canonical());
    c.wheel(1e12);
    assert_eq!(c.distance(), MAX_DISTANCE);
    c.wheel(-1e12);
    assert_eq!(c.distance(), MIN_DISTANCE);
    c.drag(0.0, -100.0);
    assert_eq!(c.polar(), 0.0);
    assert!(c.state().orbit.eye().is_finite());
}

#[test]
fn reset_and_transitions_restore_the_canonical_orbit() {
    let mut c = detail();
    c.drag(0.4, 0.1);
    c.wheel(300.0);
    c.reset();
    assert_eq!(c.state().orbit, Orbit::canonical());

    c.drag(0.4, 0.1);
    c.enter_ambient();
    assert_eq!(c.mode(), InteractionMode::Ambient);
    assert_eq!(c.state().orbit, Orbit::canonical());
    c.enter_detail();
    assert_eq!(c.state().orbit, Orbit::canonical());
}

#[test]
fn bob_advances_in_every_mode_without_touching_the_orbit() {
    let mut c = detail();
    let orbit = c.state().orbit;
    c.tick(1.0);
    assert!((c.bob_offset() - (0.5f32).sin() * 0.1).abs() < 1e-6);
    assert_eq!(c.state().orbit, orbit);
    c.tick(-1.0);
    c.tick(f32::NAN);
    assert_eq!(c.state().elapsed, 1.0);
    c.enter_ambient();
    c.tick(1.0);
    assert!((c.bob_offset() - (1.0f32).sin() * 0.1).abs() < 1e-6);
}

#[test]
fn queue_coalesces_consecutive_events() {
    let mut q = InputQueue::new();
    q.push(InputEvent::Scroll(0.1));
    q.push(InputEvent::Scroll(0.4));
    q.push(InputEvent::Drag { dx: 0.1, dy: 0.0 });
    q.push(InputEvent::Drag { dx: 0.1, dy: -0.2 });
    q.push(InputEvent::Wheel(f32::NAN));
    q.push(InputEvent::Wheel(50.0));
    q.push(InputEvent::Wheel(25.0));
    q.push(InputEvent::Scroll(0.9));
    let events: Vec<_> = q.drain().collect();
    assert_eq!(
        events,
        vec![
            InputEvent::Scroll(0.4),
            InputEvent::Drag { dx: 0.2, dy: -0.2 },
            InputEvent::Wheel(75.0),
            InputEvent::Scroll(0.9),
        ]
    );
    assert!(q.is_empty());
}

#[test]
fn controller_drains_queue_in_order() {
    let mut c = detail();
    let mut q = InputQueue::new();
    q.push(InputEvent::Drag { dx: 0.25, dy: 0.0 });
    q.push(InputEvent::Reset);
    q.push(InputEvent::Scroll(0.5));
    c.drain(&mut q);
    assert_eq!(c.state().orbit, Orbit::canonical());
    assert_eq!(c.state().scroll_fraction, 0.5);
    assert_eq!(q.len(), 0);
}

#[test]
fn discarding_orientation_keeps_scroll() {
    let mut q = InputQueue::new();
    q.push(InputEvent::Drag { dx: 0.3, dy: 0.1 });
    q.push(InputEvent::Scroll(0.25));
    q.push(InputEvent::Wheel(400.0));
    q.push(InputEvent::Reset);
    q.discard_orientation();
    let events: Vec<_> = q.drain().collect();
    assert_eq!(events, vec![InputEvent::Scroll(0.25)]);
}
