// Perspective camera shared by the viewer state and the renderer.
//
// Platform-free so the framing and resize rules can be tested on the host.

use super::constants::{CAMERA_FAR, CAMERA_FOV_Y_DEGREES, CAMERA_NEAR, CAMERA_START_POSITION};
use glam::{Mat4, Vec3};

/// Right-handed perspective camera. The look-at target is owned by the
/// orbit controls, so it is passed in when building the view matrix.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    viewport: (u32, u32),
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::from_array(CAMERA_START_POSITION),
            up: Vec3::Y,
            fov_y_degrees: CAMERA_FOV_Y_DEGREES,
            aspect: 1.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            viewport: (0, 0),
        }
    }
}

impl Camera {
    #[inline]
    pub fn fov_y_radians(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }

    /// Last non-degenerate viewport applied, in pixels.
    #[inline]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Match the aspect ratio to a surface of `width` x `height` pixels.
    ///
    /// A zero dimension (collapsed container, layout not settled yet) is
    /// ignored and the previous aspect ratio stays in effect. Returns true
    /// when the viewport changed.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if self.viewport == (width, height) {
            return false;
        }
        self.viewport = (width, height);
        self.aspect = width as f32 / height as f32;
        true
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self, target: Vec3) -> Mat4 {
        Mat4::look_at_rh(self.position, target, self.up)
    }

    pub fn view_projection(&self, target: Vec3) -> Mat4 {
        self.projection_matrix() * self.view_matrix(target)
    }
}
