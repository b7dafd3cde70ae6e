//! World configuration: gravity, contact material and solver settings.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::WorldConfigError;

/// Standard gravity used by the default world (units/s²).
pub const STANDARD_GRAVITY: f32 = 9.82;

/// Configuration for a [`PhysicsWorld`](crate::PhysicsWorld).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravitational acceleration
    pub gravity: Vec3,
    /// Coulomb friction coefficient between body and ground
    pub friction: f32,
    /// Coefficient of restitution for impacts faster than `restitution_threshold`
    pub restitution: f32,
    /// Approach speed below which contacts are fully inelastic
    pub restitution_threshold: f32,
    /// Fraction of linear velocity lost per second
    pub linear_damping: f32,
    /// Fraction of angular velocity lost per second
    pub angular_damping: f32,
    /// Sequential impulse passes per step
    pub solver_iterations: u32,
    /// Corners closer than this to the plane take part in the contact solve
    pub contact_margin: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -STANDARD_GRAVITY, 0.0),
            friction: 0.5,
            restitution: 0.3,
            restitution_threshold: 1.0,
            linear_damping: 0.01,
            angular_damping: 0.05,
            solver_iterations: 10,
            contact_margin: 0.02,
        }
    }
}

impl WorldConfig {
    /// Check that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<(), WorldConfigError> {
        if !self.gravity.is_finite() {
            return Err(WorldConfigError::NonFiniteGravity(self.gravity));
        }
        for (name, value) in [
            ("friction", self.friction),
            ("restitution", self.restitution),
            ("restitution_threshold", self.restitution_threshold),
            ("contact_margin", self.contact_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WorldConfigError::InvalidCoefficient { name, value });
            }
        }
        for (name, value) in [
            ("linear_damping", self.linear_damping),
            ("angular_damping", self.angular_damping),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(WorldConfigError::InvalidDamping { name, value });
            }
        }
        if self.solver_iterations == 0 {
            return Err(WorldConfigError::NoSolverIterations);
        }
        Ok(())
    }
}
