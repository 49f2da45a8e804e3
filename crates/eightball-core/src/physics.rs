//! Physics stepper: velocity integration, cloth damping, rail and
//! ball-ball collision response.
//!
//! Equal-mass elastic model: on contact the velocity components along the
//! collision normal are exchanged (scaled by restitution) and the balls
//! are separated symmetrically. Pair detection runs over positions
//! snapshotted at the start of the pass, in ascending id order, so the
//! outcome never depends on iteration order within a tick.

use glam::Vec2;

use crate::registry::BallRegistry;
use crate::table::Table;

/// Velocity retention per fixed tick (table-cloth friction).
pub const DAMPING_PER_TICK: f32 = 0.985;
/// Below this speed a ball snaps to exactly zero velocity.
pub const REST_EPSILON: f32 = 0.015;
/// Energy retained in the normal direction on a rail bounce.
pub const RAIL_RESTITUTION: f32 = 0.95;
/// Fraction of the closing normal component exchanged in a ball-ball
/// collision. 1.0 is the full equal-mass elastic swap.
pub const BALL_RESTITUTION: f32 = 1.0;
/// Substeps per fixed tick. At full shot speed a ball covers several
/// diameters per tick; substepping keeps each move well under one radius
/// so contacts are never skipped.
pub const SUBSTEPS: u32 = 8;

/// Advance every active ball by one fixed tick.
pub fn step(registry: &mut BallRegistry, table: &Table, dt: f32) {
    debug_assert!(dt > 0.0);
    debug_assert!(table.ball_radius > 0.0);

    let sub_dt = dt / SUBSTEPS as f32;
    let damping = DAMPING_PER_TICK.powf(1.0 / SUBSTEPS as f32);
    for _ in 0..SUBSTEPS {
        integrate(registry, sub_dt);
        resolve_rails(registry, table);
        resolve_ball_collisions(registry, table.ball_radius);
        apply_damping(registry, damping);
    }
    snap_resting(registry);
}

fn integrate(registry: &mut BallRegistry, dt: f32) {
    for id in crate::balls::BallId::all() {
        let ball = registry.get_mut(id);
        if ball.pocketed {
            continue;
        }
        ball.pos += ball.vel * dt;
    }
}

/// Reflect the normal velocity component off any rail the ball would
/// cross, and clamp the position back inside the bounds.
fn resolve_rails(registry: &mut BallRegistry, table: &Table) {
    let max_x = table.half_width - table.ball_radius;
    let max_y = table.half_length - table.ball_radius;

    for id in crate::balls::BallId::all() {
        let ball = registry.get_mut(id);
        if ball.pocketed {
            continue;
        }
        if ball.pos.x < -max_x {
            ball.pos.x = -max_x;
            ball.vel.x = ball.vel.x.abs() * RAIL_RESTITUTION;
        } else if ball.pos.x > max_x {
            ball.pos.x = max_x;
            ball.vel.x = -ball.vel.x.abs() * RAIL_RESTITUTION;
        }
        if ball.pos.y < -max_y {
            ball.pos.y = -max_y;
            ball.vel.y = ball.vel.y.abs() * RAIL_RESTITUTION;
        } else if ball.pos.y > max_y {
            ball.pos.y = max_y;
            ball.vel.y = -ball.vel.y.abs() * RAIL_RESTITUTION;
        }
    }
}

fn resolve_ball_collisions(registry: &mut BallRegistry, radius: f32) {
    // Snapshot active ids and positions so every pair is judged against
    // the same tick's state.
    let snapshot: Vec<(crate::balls::BallId, Vec2)> =
        registry.all_active().map(|b| (b.id, b.pos)).collect();
    let min_dist = radius * 2.0;

    for i in 0..snapshot.len() {
        for j in (i + 1)..snapshot.len() {
            let (id_a, pos_a) = snapshot[i];
            let (id_b, pos_b) = snapshot[j];
            let delta = pos_b - pos_a;
            let dist = delta.length();
            if dist >= min_dist || dist <= f32::EPSILON {
                continue;
            }

            let normal = delta / dist;
            let overlap = min_dist - dist;
            let separation = normal * (overlap * 0.5);
            registry.get_mut(id_a).pos -= separation;
            registry.get_mut(id_b).pos += separation;

            // Exchange the approaching normal components (equal masses).
            let va = registry.get(id_a).vel;
            let vb = registry.get(id_b).vel;
            let closing = (va - vb).dot(normal);
            if closing > 0.0 {
                let impulse = normal * closing * BALL_RESTITUTION;
                registry.get_mut(id_a).vel = va - impulse;
                registry.get_mut(id_b).vel = vb + impulse;
            }
        }
    }
}

fn apply_damping(registry: &mut BallRegistry, factor: f32) {
    for id in crate::balls::BallId::all() {
        let ball = registry.get_mut(id);
        if !ball.pocketed {
            ball.vel *= factor;
        }
    }
}

/// Snap crawling balls to exactly zero so "at rest" is unambiguous.
fn snap_resting(registry: &mut BallRegistry) {
    for id in crate::balls::BallId::all() {
        let ball = registry.get_mut(id);
        if !ball.pocketed && ball.speed() < REST_EPSILON {
            ball.vel = Vec2::ZERO;
        }
    }
}

/// Total kinetic energy of the active balls (unit mass).
pub fn kinetic_energy(registry: &BallRegistry) -> f32 {
    registry
        .all_active()
        .map(|b| 0.5 * b.vel.length_squared())
        .sum()
}
