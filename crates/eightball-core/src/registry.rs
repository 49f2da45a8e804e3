//! Ball registry: the exclusive owner of authoritative ball state.
//!
//! Gameplay state lives here, never on render objects. The renderer reads
//! positions out each frame; nothing outside the core mutates them.

use glam::Vec2;

use crate::balls::{rack_positions, BallId};
use crate::table::Table;

/// Authoritative state of one ball.
#[derive(Debug, Clone, Copy)]
pub struct BallState {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub pocketed: bool,
}

impl BallState {
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Flat storage for all 16 balls, indexed by ball number. Iteration order
/// is always ascending id (cue first), which keeps physics pair iteration
/// deterministic.
pub struct BallRegistry {
    balls: [BallState; 16],
}

impl BallRegistry {
    /// Build a registry racked on the given table.
    pub fn racked(table: &Table) -> Self {
        let mut registry = Self {
            balls: std::array::from_fn(|i| BallState {
                id: BallId(i as u8),
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                pocketed: false,
            }),
        };
        registry.reset(table);
        registry
    }

    /// Re-rack all 16 balls: cue on its spot, 1-15 in the triangle.
    /// Only permitted between matches.
    pub fn reset(&mut self, table: &Table) {
        let rack = rack_positions(table.rack_apex(), table.ball_radius);
        for ball in &mut self.balls {
            ball.vel = Vec2::ZERO;
            ball.pocketed = false;
            ball.pos = if ball.id.is_cue() {
                table.cue_spot()
            } else {
                rack[(ball.id.0 - 1) as usize]
            };
        }
    }

    pub fn get(&self, id: BallId) -> &BallState {
        &self.balls[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: BallId) -> &mut BallState {
        &mut self.balls[id.0 as usize]
    }

    /// All non-pocketed balls, ascending id.
    pub fn all_active(&self) -> impl Iterator<Item = &BallState> {
        self.balls.iter().filter(|b| !b.pocketed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BallState> {
        self.balls.iter()
    }

    /// Mark a ball pocketed. Idempotent; a pocketed ball keeps zero
    /// velocity and drops out of stepping, collisions and rendering.
    pub fn set_pocketed(&mut self, id: BallId) {
        let ball = &mut self.balls[id.0 as usize];
        ball.pocketed = true;
        ball.vel = Vec2::ZERO;
    }

    /// Return the cue ball to play after a scratch. The cue ball is the
    /// only ball that ever leaves the pocketed state.
    pub fn respot_cue(&mut self, spot: Vec2) {
        let cue = &mut self.balls[0];
        cue.pocketed = false;
        cue.pos = spot;
        cue.vel = Vec2::ZERO;
    }

    /// True if any active ball is moving faster than `epsilon`.
    pub fn in_motion(&self, epsilon: f32) -> bool {
        self.all_active().any(|b| b.speed() > epsilon)
    }

    pub fn active_count(&self) -> usize {
        self.all_active().count()
    }
}
