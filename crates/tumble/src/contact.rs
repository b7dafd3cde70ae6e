//! Box-versus-plane contacts and the sequential impulse solver.
//!
//! Each box corner within the contact margin of the plane becomes one contact
//! point. The solver iterates over those points in corner order, accumulating
//! a clamped normal impulse and a friction impulse bounded by the Coulomb cone.

use glam::Vec3;

use crate::body::RigidBody;
use crate::config::WorldConfig;
use crate::ground::GroundPlane;

/// A single corner touching (or about to touch) the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index into [`CORNER_SIGNS`](crate::body::CORNER_SIGNS)
    pub corner: usize,
    /// Offset from the body's center of mass to the corner (world space)
    pub arm: Vec3,
    /// Signed distance of the corner above the plane
    pub separation: f32,
}

/// Collect every corner of `body` whose separation from `ground` is at most `margin`.
#[must_use]
pub fn box_plane_contacts(body: &RigidBody, ground: &GroundPlane, margin: f32) -> Vec<Contact> {
    body.corner_arms()
        .into_iter()
        .enumerate()
        .filter_map(|(corner, arm)| {
            let separation = ground.signed_distance(body.position + arm);
            (separation <= margin).then_some(Contact {
                corner,
                arm,
                separation,
            })
        })
        .collect()
}

/// Impulse totals from one solve, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolveSummary {
    /// Contacts that took part
    pub contacts: usize,
    /// Sum of accumulated normal impulses
    pub normal_impulse: f32,
    /// Sum of accumulated friction impulse magnitudes
    pub friction_impulse: f32,
}

/// Solver state for one contact point.
struct ContactRow {
    arm: Vec3,
    normal_mass: f32,
    bounce: f32,
    normal_impulse: f32,
    friction_impulse: Vec3,
}

/// Resolve velocities at the given contacts so the body stops approaching the plane.
///
/// Restitution targets are fixed from the approach speed before the first
/// iteration, so repeated passes converge instead of pumping energy in.
pub fn solve_contacts(
    body: &mut RigidBody,
    ground: &GroundPlane,
    contacts: &[Contact],
    config: &WorldConfig,
) -> SolveSummary {
    let normal = ground.normal();
    let inverse_mass = body.inverse_mass();
    let inverse_inertia = body.inverse_inertia_world();

    let effective_mass = |arm: Vec3, direction: Vec3| {
        let torque_arm = arm.cross(direction);
        inverse_mass + (inverse_inertia * torque_arm).dot(torque_arm)
    };

    let mut rows: Vec<ContactRow> = contacts
        .iter()
        .map(|contact| {
            let approach = body.velocity_at(contact.arm).dot(normal);
            let bounce = if approach < -config.restitution_threshold {
                -config.restitution * approach
            } else {
                0.0
            };
            ContactRow {
                arm: contact.arm,
                normal_mass: effective_mass(contact.arm, normal),
                bounce,
                normal_impulse: 0.0,
                friction_impulse: Vec3::ZERO,
            }
        })
        .collect();

    for _ in 0..config.solver_iterations {
        for row in &mut rows {
            if row.normal_mass <= 0.0 {
                continue;
            }

            // Normal: push until the corner separates at the bounce speed
            let normal_speed = body.velocity_at(row.arm).dot(normal);
            let lambda = (row.bounce - normal_speed) / row.normal_mass;
            let accumulated = (row.normal_impulse + lambda).max(0.0);
            let applied = accumulated - row.normal_impulse;
            row.normal_impulse = accumulated;
            body.apply_impulse(normal * applied, row.arm, &inverse_inertia);

            // Friction: cancel sliding, bounded by the Coulomb cone
            let velocity = body.velocity_at(row.arm);
            let tangential = velocity - normal * velocity.dot(normal);
            let slip = tangential.length();
            if slip <= f32::EPSILON {
                continue;
            }
            let direction = tangential / slip;
            let tangent_mass = effective_mass(row.arm, direction);
            if tangent_mass <= 0.0 {
                continue;
            }
            let limit = config.friction * row.normal_impulse;
            let desired = row.friction_impulse - direction * (slip / tangent_mass);
            let clamped = desired.clamp_length_max(limit);
            let applied = clamped - row.friction_impulse;
            row.friction_impulse = clamped;
            body.apply_impulse(applied, row.arm, &inverse_inertia);
        }
    }

    SolveSummary {
        contacts: rows.len(),
        normal_impulse: rows.iter().map(|row| row.normal_impulse).sum(),
        friction_impulse: rows.iter().map(|row| row.friction_impulse.length()).sum(),
    }
}
