use super::constants::{FRAMING_DISTANCE_MARGIN, FRAMING_TARGET_HEIGHT_FRACTION};
use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut b = Self::EMPTY;
        for p in points {
            b.expand(p);
        }
        b
    }

    #[inline]
    pub fn expand(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }
}

/// Camera distance that fits the largest box dimension in the vertical
/// field of view, with a margin.
#[inline]
pub fn camera_distance(size: Vec3, fov_y_degrees: f32) -> f32 {
    let max_dim = size.max_element();
    let fov = fov_y_degrees.to_radians();
    max_dim / (2.0 * (fov / 2.0).tan()) * FRAMING_DISTANCE_MARGIN
}

#[inline]
pub fn target_height(size: Vec3) -> f32 {
    size.y * FRAMING_TARGET_HEIGHT_FRACTION
}

/// Recentring translation as used by the viewer: moves the model by
/// `position - center`. Equals `-center` only while `position` is zero.
#[inline]
pub fn recenter(position: Vec3, center: Vec3) -> Vec3 {
    position + (position - center)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFraming {
    pub camera_z: f32,
    pub target_y: f32,
}

/// Camera framing policy. With `freeze_after_first_load` every model after
/// the first shares the first model's framing.
#[derive(Clone, Debug)]
pub struct Framing {
    pub freeze_after_first_load: bool,
    frozen: Option<CameraFraming>,
    computations: u32,
}

impl Framing {
    pub fn new(freeze_after_first_load: bool) -> Self {
        Self {
            freeze_after_first_load,
            frozen: None,
            computations: 0,
        }
    }

    pub fn frame(&mut self, size: Vec3, fov_y_degrees: f32) -> CameraFraming {
        if self.freeze_after_first_load {
            if let Some(f) = self.frozen {
                return f;
            }
        }
        let f = CameraFraming {
            camera_z: camera_distance(size, fov_y_degrees),
            target_y: target_height(size),
        };
        self.computations += 1;
        self.frozen = Some(f);
        f
    }

    #[inline]
    pub fn current(&self) -> Option<CameraFraming> {
        self.frozen
    }

    /// How many times the framing was derived from a bounding box.
    #[inline]
    pub fn computations(&self) -> u32 {
        self.computations
    }
}
