//! # Tumble
//!
//! Fixed-step rigid-body substrate for a single box tumbling onto a ground plane.
//!
//! Tumble is deliberately small: one dynamic cuboid, one static infinite plane,
//! corner contacts and a sequential-impulse solver. That is enough to throw a
//! die, let it bounce and slide, and read back a resting pose.
//!
//! - **Deterministic**: identical inputs produce bit-identical states (see [`hash_world`])
//! - **Fixed step**: callers advance the world by a constant `dt`
//! - **Label-agnostic**: nothing here knows what the faces of the box mean
//!
//! ## Quick Start
//!
//! ```
//! use glam::Vec3;
//! use tumble::{GroundPlane, PhysicsWorld, RigidBody, WorldConfig};
//!
//! let body = RigidBody::cube(1.0, 0.5).with_position(Vec3::new(0.0, 5.0, 0.0));
//! let mut world = PhysicsWorld::new(WorldConfig::default(), GroundPlane::horizontal(0.0), body)
//!     .expect("default config is valid");
//!
//! for _ in 0..300 {
//!     world.step(1.0 / 60.0);
//! }
//!
//! // Resting on a face: centre sits one half-extent above the plane.
//! assert!((world.body().position.y - 0.5).abs() < 0.05);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod body;
pub mod config;
pub mod contact;
pub mod error;
pub mod ground;
pub mod hash;
pub mod world;

// Re-exports for convenience
pub use body::RigidBody;
pub use config::WorldConfig;
pub use contact::{box_plane_contacts, Contact};
pub use error::WorldConfigError;
pub use ground::GroundPlane;
pub use hash::hash_world;
pub use world::{PhysicsWorld, StepStats};

/// Axis-aligned bounding box.
///
/// Used to describe the region in which a body counts as "in play".
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Minimum corner
    pub min: glam::Vec3,
    /// Maximum corner
    pub max: glam::Vec3,
}

impl Bounds {
    /// Create a cube of the given half extent, centered at origin.
    #[must_use]
    pub fn cube(half_extent: f32) -> Self {
        Self::from_min_max(glam::Vec3::splat(-half_extent), glam::Vec3::splat(half_extent))
    }

    /// Create bounds from min/max corners.
    #[must_use]
    pub fn from_min_max(min: glam::Vec3, max: glam::Vec3) -> Self {
        Self { min, max }
    }

    /// Check if a point is inside the bounds.
    #[must_use]
    pub fn contains(&self, point: glam::Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
