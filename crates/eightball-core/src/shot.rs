//! Aiming and shot controller: Idle -> Aiming -> InFlight -> Idle.

use glam::Vec2;

use crate::state::PlayerId;

/// Initial cue-ball speed at power 100.
pub const MAX_SHOT_SPEED: f32 = 10.0;
/// Aim points closer than this to the cue ball are degenerate and the
/// commit is rejected (a zero direction would produce NaN velocity).
pub const DEGENERATE_AIM_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotPhase {
    /// Waiting for the active player to start aiming. Entered only while
    /// all balls are at rest.
    Idle,
    /// Direction and power are being adjusted.
    Aiming,
    /// The cue ball has been struck; input is ignored until motion stops.
    InFlight,
}

/// A committed shot, consumed immediately by the orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct Shot {
    /// Unit direction of travel on the table plane.
    pub dir: Vec2,
    /// 0-100, mapped linearly onto `MAX_SHOT_SPEED`.
    pub power: u8,
    pub by: PlayerId,
}

impl Shot {
    pub fn velocity(&self) -> Vec2 {
        self.dir * (self.power as f32 / 100.0) * MAX_SHOT_SPEED
    }
}

pub struct ShotController {
    phase: ShotPhase,
    target: Vec2,
}

impl ShotController {
    pub fn new() -> Self {
        Self {
            phase: ShotPhase::Idle,
            target: Vec2::ZERO,
        }
    }

    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    /// Arm the controller. No-op unless idle with the table at rest.
    pub fn begin_aim(&mut self, at_rest: bool) -> bool {
        if self.phase != ShotPhase::Idle || !at_rest {
            return false;
        }
        self.phase = ShotPhase::Aiming;
        true
    }

    /// Record the current aim target. Ignored outside `Aiming`.
    pub fn aim_at(&mut self, target: Vec2) {
        if self.phase == ShotPhase::Aiming {
            self.target = target;
        }
    }

    /// Release the shot. Returns `None` and leaves all state untouched if
    /// the controller is not aiming or the aim is degenerate (target on
    /// top of the cue ball).
    pub fn commit(&mut self, cue_pos: Vec2, power: u8, by: PlayerId) -> Option<Shot> {
        if self.phase != ShotPhase::Aiming {
            return None;
        }
        let offset = self.target - cue_pos;
        if offset.length() < DEGENERATE_AIM_EPSILON {
            return None;
        }
        self.phase = ShotPhase::InFlight;
        Some(Shot {
            dir: offset.normalize(),
            power: power.min(100),
            by,
        })
    }

    /// Called once per tick with the registry's motion state. Returns true
    /// exactly once per shot, when flight ends, so end-of-shot rules run
    /// exactly once.
    pub fn settle(&mut self, at_rest: bool) -> bool {
        if self.phase == ShotPhase::InFlight && at_rest {
            self.phase = ShotPhase::Idle;
            return true;
        }
        false
    }

    /// Drop back to idle without settling (match reset).
    pub fn abort(&mut self) {
        self.phase = ShotPhase::Idle;
        self.target = Vec2::ZERO;
    }
}

impl Default for ShotController {
    fn default() -> Self {
        Self::new()
    }
}
