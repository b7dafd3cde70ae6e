//! The dynamic body: a solid cuboid with uniform density.
//!
//! Everything a step needs lives on the body itself: pose, velocities, mass and
//! shape. Inertia is derived from mass and half-extents on demand.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Signs of the eight corners of a unit box, in a fixed order.
///
/// Corner iteration order is part of the determinism contract: the contact
/// solver visits corners in exactly this order.
pub const CORNER_SIGNS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// A dynamic cuboid rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    /// Center of mass in world space
    pub position: Vec3,
    /// Orientation (unit quaternion, body to world)
    pub orientation: Quat,
    /// Linear velocity in world space
    pub linear_velocity: Vec3,
    /// Angular velocity in world space (radians per second)
    pub angular_velocity: Vec3,
    mass: f32,
    half_extents: Vec3,
}

impl RigidBody {
    /// Create a cuboid at the origin, at rest, with identity orientation.
    #[must_use]
    pub fn cuboid(mass: f32, half_extents: Vec3) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass,
            half_extents,
        }
    }

    /// Create a cube with equal half-extents.
    #[must_use]
    pub fn cube(mass: f32, half_size: f32) -> Self {
        Self::cuboid(mass, Vec3::splat(half_size))
    }

    /// Builder: place the body at `position`.
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder: set the body's orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation.normalize();
        self
    }

    /// Mass of the body.
    #[must_use]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Half-extents along the local axes.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Inverse mass (zero for a massless body, which never moves under impulses).
    #[must_use]
    pub fn inverse_mass(&self) -> f32 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Inverse inertia tensor in body space (diagonal for a cuboid).
    #[must_use]
    pub fn inverse_inertia_local(&self) -> Vec3 {
        let size_sq = (self.half_extents * 2.0) * (self.half_extents * 2.0);
        let inertia = Vec3::new(
            size_sq.y + size_sq.z,
            size_sq.x + size_sq.z,
            size_sq.x + size_sq.y,
        ) * (self.mass / 12.0);
        Vec3::select(inertia.cmpgt(Vec3::ZERO), inertia.recip(), Vec3::ZERO)
    }

    /// Inverse inertia tensor rotated into world space: `R * I⁻¹ * Rᵀ`.
    #[must_use]
    pub fn inverse_inertia_world(&self) -> Mat3 {
        let rotation = Mat3::from_quat(self.orientation);
        rotation * Mat3::from_diagonal(self.inverse_inertia_local()) * rotation.transpose()
    }

    /// Offsets from the center of mass to each corner, in world space.
    #[must_use]
    pub fn corner_arms(&self) -> [Vec3; 8] {
        CORNER_SIGNS.map(|sign| self.orientation * (sign * self.half_extents))
    }

    /// World-space corner positions.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        self.corner_arms().map(|arm| self.position + arm)
    }

    /// Rotate a body-space direction into world space.
    #[must_use]
    pub fn to_world_direction(&self, local: Vec3) -> Vec3 {
        self.orientation * local
    }

    /// Velocity of the material point at offset `arm` from the center of mass.
    #[must_use]
    pub fn velocity_at(&self, arm: Vec3) -> Vec3 {
        self.linear_velocity + self.angular_velocity.cross(arm)
    }

    /// Apply an impulse at offset `arm` from the center of mass.
    ///
    /// `inverse_inertia` is the world-space inverse inertia; callers applying
    /// many impulses in a row compute it once.
    pub fn apply_impulse(&mut self, impulse: Vec3, arm: Vec3, inverse_inertia: &Mat3) {
        self.linear_velocity += impulse * self.inverse_mass();
        self.angular_velocity += *inverse_inertia * arm.cross(impulse);
    }

    /// Magnitude of the linear velocity.
    #[must_use]
    pub fn linear_speed(&self) -> f32 {
        self.linear_velocity.length()
    }

    /// Zero both linear and angular velocity.
    pub fn stop(&mut self) {
        self.linear_velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    /// Move the body to `position` and bring it to rest. Orientation is kept.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.stop();
    }
}
