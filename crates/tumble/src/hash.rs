//! State hashing for determinism verification.
//!
//! Two worlds built from the same configuration and driven with the same
//! inputs must produce identical hashes after every step.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use glam::{Quat, Vec3};

use crate::body::RigidBody;
use crate::PhysicsWorld;

/// Compute a deterministic hash of world state.
///
/// This hash includes:
/// - Current tick and simulated time
/// - Ground plane
/// - Full body state (pose, velocities, mass, shape)
#[must_use]
pub fn hash_world(world: &PhysicsWorld) -> u64 {
    let mut hasher = DefaultHasher::new();

    world.tick().hash(&mut hasher);

    // Hash time as bits to avoid float comparison issues
    world.time().to_bits().hash(&mut hasher);

    hash_vec3(world.ground().normal(), &mut hasher);
    world.ground().offset().to_bits().hash(&mut hasher);

    hash_body(world.body(), &mut hasher);

    hasher.finish()
}

/// Hash a body by converting every float to bits.
fn hash_body<H: Hasher>(body: &RigidBody, hasher: &mut H) {
    hash_vec3(body.position, hasher);
    hash_quat(body.orientation, hasher);
    hash_vec3(body.linear_velocity, hasher);
    hash_vec3(body.angular_velocity, hasher);
    body.mass().to_bits().hash(hasher);
    hash_vec3(body.half_extents(), hasher);
}

fn hash_vec3<H: Hasher>(v: Vec3, hasher: &mut H) {
    v.x.to_bits().hash(hasher);
    v.y.to_bits().hash(hasher);
    v.z.to_bits().hash(hasher);
}

fn hash_quat<H: Hasher>(q: Quat, hasher: &mut H) {
    q.x.to_bits().hash(hasher);
    q.y.to_bits().hash(hasher);
    q.z.to_bits().hash(hasher);
    q.w.to_bits().hash(hasher);
}
