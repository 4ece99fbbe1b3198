// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_constants_are_within_reasonable_bounds() {
    assert!(CAMERA_FOV_Y_DEGREES > 0.0 && CAMERA_FOV_Y_DEGREES < 180.0);
    assert!(CAMERA_NEAR > 0.0);
    assert!(CAMERA_FAR > CAMERA_NEAR);
    // Framing pulls back past a tight fit and aims barely above the floor
    assert!(FRAMING_DISTANCE_MARGIN > 1.0);
    assert!(FRAMING_TARGET_HEIGHT_FRACTION > 0.0 && FRAMING_TARGET_HEIGHT_FRACTION < 0.5);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn orbit_is_horizontal_and_damped() {
    assert!((ORBIT_POLAR_ANGLE - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert!(ORBIT_DAMPING_FACTOR > 0.0 && ORBIT_DAMPING_FACTOR < 1.0);
    assert!(SPIN_PER_FRAME > 0.0);
}

#[test]
fn theme_background_is_darker_in_dark_mode() {
    let light = background_for_theme(false);
    let dark = background_for_theme(true);
    assert_eq!(light, BACKGROUND_LIGHT);
    assert_eq!(dark, BACKGROUND_DARK);
    for i in 0..3 {
        assert!(dark[i] < light[i]);
        assert!((0.0..=1.0).contains(&dark[i]) && (0.0..=1.0).contains(&light[i]));
    }
}

#[test]
fn assets_follow_the_variant_naming_scheme() {
    assert!(MANUAL_ASSETS.contains(&INITIAL_ASSET));
    for asset in MANUAL_ASSETS {
        assert!(asset.starts_with(VARIANT_PREFIX));
        assert!(asset.ends_with(VARIANT_EXTENSION));
    }
    assert!(ASSET_BASE.starts_with('/') && ASSET_BASE.ends_with('/'));
}
