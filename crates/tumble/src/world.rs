//! The physics world: one dynamic box, one static ground plane, fixed steps.
//!
//! # Step Order
//!
//! 1. Gravity is added to the linear velocity
//! 2. Corner contacts are gathered and the impulse solver runs
//! 3. Position and orientation are integrated (semi-implicit Euler)
//! 4. Any remaining penetration is removed by moving the body along the plane normal
//! 5. Damping is applied
//!
//! The world does not own a clock: callers pick the step size and call
//! [`PhysicsWorld::step`] once per tick.

use glam::Quat;
use tracing::trace;

use crate::body::RigidBody;
use crate::config::WorldConfig;
use crate::contact::{box_plane_contacts, solve_contacts};
use crate::error::WorldConfigError;
use crate::ground::GroundPlane;

/// Per-step diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    /// Corners in contact with the ground this step
    pub contacts: usize,
    /// Total normal impulse applied by the ground
    pub normal_impulse: f32,
    /// Depth the body was pushed out of the ground after integration
    pub penetration: f32,
}

/// A single dynamic box over a static ground plane.
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    config: WorldConfig,
    ground: GroundPlane,
    body: RigidBody,
    /// Steps taken so far
    tick: u64,
    /// Simulated seconds
    time: f64,
}

impl PhysicsWorld {
    /// Create a world from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or the body has no mass or volume.
    pub fn new(
        config: WorldConfig,
        ground: GroundPlane,
        body: RigidBody,
    ) -> Result<Self, WorldConfigError> {
        config.validate()?;
        let mass = body.mass();
        let half_extents = body.half_extents();
        if !(mass.is_finite() && mass > 0.0) || !half_extents.cmpgt(glam::Vec3::ZERO).all() {
            return Err(WorldConfigError::DegenerateBody { mass, half_extents });
        }

        Ok(Self {
            config,
            ground,
            body,
            tick: 0,
            time: 0.0,
        })
    }

    /// Advance the world by `dt` seconds.
    ///
    /// A non-positive or non-finite `dt` leaves the world untouched.
    pub fn step(&mut self, dt: f32) -> StepStats {
        if !(dt.is_finite() && dt > 0.0) {
            return StepStats::default();
        }

        let body = &mut self.body;
        body.linear_velocity += self.config.gravity * dt;

        let contacts = box_plane_contacts(body, &self.ground, self.config.contact_margin);
        let summary = if contacts.is_empty() {
            None
        } else {
            Some(solve_contacts(body, &self.ground, &contacts, &self.config))
        };

        body.position += body.linear_velocity * dt;
        body.orientation =
            (Quat::from_scaled_axis(body.angular_velocity * dt) * body.orientation).normalize();

        let penetration = self.resolve_penetration();

        let body = &mut self.body;
        body.linear_velocity *= (1.0 - self.config.linear_damping).powf(dt);
        body.angular_velocity *= (1.0 - self.config.angular_damping).powf(dt);

        self.tick += 1;
        self.time += f64::from(dt);

        let stats = StepStats {
            contacts: summary.map_or(0, |s| s.contacts),
            normal_impulse: summary.map_or(0.0, |s| s.normal_impulse),
            penetration,
        };
        trace!(
            tick = self.tick,
            contacts = stats.contacts,
            normal_impulse = stats.normal_impulse,
            penetration = stats.penetration,
            "physics step"
        );
        stats
    }

    /// Push the body out of the ground so its deepest corner lies on the plane.
    fn resolve_penetration(&mut self) -> f32 {
        let deepest = self
            .body
            .corners()
            .into_iter()
            .map(|corner| self.ground.signed_distance(corner))
            .fold(f32::INFINITY, f32::min);

        if deepest < 0.0 {
            self.body.position -= self.ground.normal() * deepest;
            -deepest
        } else {
            0.0
        }
    }

    /// The dynamic body.
    #[must_use]
    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    /// Mutable access to the dynamic body (for teleports and launches).
    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    /// The static ground.
    #[must_use]
    pub fn ground(&self) -> &GroundPlane {
        &self.ground
    }

    /// The world configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Number of steps taken.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated time in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Height of the body's center above the ground.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.ground.signed_distance(self.body.position)
    }
}
