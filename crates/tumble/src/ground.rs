//! Static ground: an infinite plane with zero mass.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Infinite static plane `{ x : normal · x = offset }`.
///
/// The plane never moves and has no mass; contacts push only the dynamic body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    normal: Vec3,
    offset: f32,
}

impl GroundPlane {
    /// Build a plane whose normal is local +Z rotated by `rotation`.
    ///
    /// `offset` is the plane's distance from the origin along that normal.
    #[must_use]
    pub fn from_rotation(rotation: Quat, offset: f32) -> Self {
        Self {
            normal: (rotation * Vec3::Z).normalize(),
            offset,
        }
    }

    /// A level plane at `height` with its normal pointing up (+Y).
    #[must_use]
    pub fn horizontal(height: f32) -> Self {
        Self {
            normal: Vec3::Y,
            offset: height,
        }
    }

    /// The rotation that turns a +Z-facing plane into a floor.
    #[must_use]
    pub fn floor_rotation() -> Quat {
        Quat::from_rotation_x(-FRAC_PI_2)
    }

    /// Unit normal pointing out of the solid half-space.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Distance of the plane from the origin along its normal.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Signed distance of `point` above the plane (negative when below).
    #[must_use]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.offset
    }
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self::horizontal(0.0)
    }
}
