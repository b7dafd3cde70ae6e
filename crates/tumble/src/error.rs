//! Errors raised when a physics world is built from invalid parameters.

use thiserror::Error;

/// A [`WorldConfig`](crate::WorldConfig) or body parameter that cannot produce a stable simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldConfigError {
    /// Gravity contains NaN or infinite components.
    #[error("gravity must be finite, got {0:?}")]
    NonFiniteGravity(glam::Vec3),

    /// A coefficient that must be non-negative and finite is not.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidCoefficient {
        /// Name of the offending field
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Damping must lie in `[0, 1)`.
    #[error("{name} must lie in [0, 1), got {value}")]
    InvalidDamping {
        /// Name of the offending field
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// The solver needs at least one iteration.
    #[error("solver_iterations must be at least 1")]
    NoSolverIterations,

    /// Dynamic bodies need positive mass and positive half-extents.
    #[error("body must have positive mass and extents (mass {mass}, half extents {half_extents:?})")]
    DegenerateBody {
        /// Body mass
        mass: f32,
        /// Body half-extents
        half_extents: glam::Vec3,
    },
}
