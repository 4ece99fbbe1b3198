// Orbit-style camera controls around a fixed target.
//
// Follows the familiar three.js orbit behaviour: pointer drags accumulate a
// spherical delta that `update` applies (damped) to the camera offset. The
// polar angle is clamped to `[min_polar, max_polar]`; with both set to π/2
// the user can only orbit horizontally.

use super::constants::{
    ORBIT_DAMPING_FACTOR, ORBIT_EPS, ORBIT_POLAR_ANGLE, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SCALE,
};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Spherical coordinates with Y up: `theta` is the azimuth around Y measured
/// from +Z, `phi` the polar angle from +Y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }

    /// Keep phi strictly inside (0, π) so the basis never degenerates.
    pub fn make_safe(&mut self) {
        self.phi = self.phi.clamp(ORBIT_EPS, PI - ORBIT_EPS);
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enabled: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_zoom: bool,
    pub rotate_speed: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    delta: Spherical,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enabled: true,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            enable_zoom: false,
            rotate_speed: ORBIT_ROTATE_SPEED,
            min_polar: ORBIT_POLAR_ANGLE,
            max_polar: ORBIT_POLAR_ANGLE,
            delta: Spherical::default(),
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    /// Default controls, accepting input only when `enabled`.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta.phi -= angle;
    }

    /// Pointer drag of `dx`/`dy` pixels over an element `height` pixels tall.
    pub fn handle_drag(&mut self, dx: f32, dy: f32, height: f32) {
        if !self.enabled || height <= 0.0 {
            return;
        }
        self.rotate_left(TAU * dx * self.rotate_speed / height);
        self.rotate_up(TAU * dy * self.rotate_speed / height);
    }

    /// Zoom by `factor` (>1 moves away). No-op while zoom is disabled.
    pub fn dolly(&mut self, factor: f32) {
        if !self.enabled || !self.enable_zoom || factor <= 0.0 {
            return;
        }
        self.scale *= factor;
    }

    /// Mouse wheel step: scrolling down moves away, up moves closer.
    pub fn handle_wheel(&mut self, delta_y: f32) {
        if delta_y > 0.0 {
            self.dolly(1.0 / ORBIT_ZOOM_SCALE);
        } else if delta_y < 0.0 {
            self.dolly(ORBIT_ZOOM_SCALE);
        }
    }

    /// Apply pending rotation to `camera_position` and return the new one.
    pub fn update(&mut self, camera_position: Vec3) -> Vec3 {
        let mut s = Spherical::from_offset(camera_position - self.target);

        if self.enable_damping {
            s.theta += self.delta.theta * self.damping_factor;
            s.phi += self.delta.phi * self.damping_factor;
        } else {
            s.theta += self.delta.theta;
            s.phi += self.delta.phi;
        }
        s.phi = s.phi.clamp(self.min_polar, self.max_polar);
        s.make_safe();
        s.radius *= self.scale;

        let position = self.target + s.to_offset();

        if self.enable_damping {
            self.delta.theta *= 1.0 - self.damping_factor;
            self.delta.phi *= 1.0 - self.damping_factor;
        } else {
            self.delta = Spherical::default();
        }
        self.scale = 1.0;
        position
    }
}
