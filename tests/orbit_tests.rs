#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod camera {
    include!("../src/core/camera.rs");
}
mod orbit {
    include!("../src/core/orbit.rs");
}

use camera::Camera;
use glam::Vec3;
use orbit::*;

#[test]
fn spherical_round_trip_preserves_offset() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    let back = Spherical::from_offset(v).to_offset();
    assert!((back - v).length() < 1e-5);
    assert_eq!(Spherical::from_offset(Vec3::ZERO), Spherical::default());
}

#[test]
fn drag_orbits_horizontally_at_constant_distance() {
    let mut c = OrbitControls::default();
    let target = Vec3::new(0.0, 0.5, 0.0);
    c.target = target;
    let mut pos = Vec3::new(0.0, 0.5, 4.0);

    c.handle_drag(120.0, 80.0, 600.0);
    for _ in 0..200 {
        pos = c.update(pos);
    }
    assert!(((pos - target).length() - 4.0).abs() < 1e-3);
    // Polar angle locked to the horizon
    assert!((pos.y - target.y).abs() < 1e-3);
    assert!(pos.x.abs() > 0.1);
}

fn azimuth(p: Vec3) -> f32 {
    p.x.atan2(p.z)
}

#[test]
fn damping_decays_rotation_step() {
    let mut c = OrbitControls::default();
    c.handle_drag(100.0, 0.0, 500.0);
    let mut pos = Vec3::new(0.0, 0.0, 3.0);
    let next = c.update(pos);
    let first_step = (azimuth(next) - azimuth(pos)).abs();
    assert!(first_step > 0.0);
    pos = next;
    let next = c.update(pos);
    assert!((azimuth(next) - azimuth(pos)).abs() < first_step);
    pos = next;
    for _ in 0..1000 {
        pos = c.update(pos);
    }
    let last = c.update(pos);
    assert!((azimuth(last) - azimuth(pos)).abs() < 1e-6);
    assert!(last.is_finite());
}

#[test]
fn disabled_controls_ignore_input() {
    let mut c = OrbitControls::new(false);
    c.handle_drag(300.0, 300.0, 500.0);
    c.handle_wheel(120.0);
    let pos = Vec3::new(0.0, 0.0, 3.0);
    assert!((c.update(pos) - pos).length() < 1e-5);
}

#[test]
fn zoom_is_off_by_default() {
    let mut c = OrbitControls::default();
    c.dolly(2.0);
    c.handle_wheel(100.0);
    let pos = c.update(Vec3::new(0.0, 0.0, 3.0));
    assert!((pos.length() - 3.0).abs() < 1e-4);

    c.enable_zoom = true;
    c.dolly(2.0);
    let pos = c.update(Vec3::new(0.0, 0.0, 3.0));
    assert!((pos.length() - 6.0).abs() < 1e-4);

    c.handle_wheel(-100.0);
    let pos = c.update(Vec3::new(0.0, 0.0, 3.0));
    assert!((pos.length() - 3.0 * constants::ORBIT_ZOOM_SCALE).abs() < 1e-4);
}

#[test]
fn camera_ignores_degenerate_viewport() {
    let mut cam = Camera::default();
    assert!(cam.set_viewport(800, 400));
    assert!((cam.aspect - 2.0).abs() < 1e-6);
    assert!(!cam.set_viewport(800, 400));
    assert!(!cam.set_viewport(0, 300));
    assert!(!cam.set_viewport(300, 0));
    assert!((cam.aspect - 2.0).abs() < 1e-6);
    assert_eq!(cam.viewport(), (800, 400));
    assert!(cam.view_projection(Vec3::ZERO).is_finite());
}
