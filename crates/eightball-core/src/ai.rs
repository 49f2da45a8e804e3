//! AI opponent: straight-line shot selection with a visible thinking
//! delay. Uses only what a human can see (ball positions, table
//! geometry, remaining-ball lists), never future physics outcomes.

use glam::Vec2;

use crate::balls::BallId;
use crate::registry::BallRegistry;
use crate::rng::Rng;
use crate::state::Player;
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Observable thinking delay, in fixed ticks.
    fn think_ticks(self) -> u32 {
        match self {
            Difficulty::Easy => 90,
            Difficulty::Medium => 60,
            Difficulty::Hard => 30,
        }
    }

    /// 0..1; the remainder becomes aim jitter.
    fn accuracy(self) -> f32 {
        match self {
            Difficulty::Easy => 0.6,
            Difficulty::Medium => 0.8,
            Difficulty::Hard => 0.95,
        }
    }
}

/// A fully decided shot: where to aim and how hard.
#[derive(Debug, Clone, Copy)]
pub struct PlannedShot {
    pub target: Vec2,
    pub power: u8,
}

pub struct AiOpponent {
    difficulty: Difficulty,
    /// Ticks left before the planned shot is committed. `None` when not
    /// thinking; doubles as the reentrancy guard.
    thinking: Option<u32>,
    rng: Rng,
}

impl AiOpponent {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            thinking: None,
            rng: Rng::new(seed),
        }
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.is_some()
    }

    /// Abandon any pending decision (match reset).
    pub fn reset(&mut self) {
        self.thinking = None;
    }

    /// Advance the AI by one tick while it is the AI's turn and the table
    /// is at rest. Starts the thinking delay on first call, counts it
    /// down, and yields the shot exactly once when the delay expires.
    /// Calls while already thinking just continue the countdown.
    pub fn tick(
        &mut self,
        registry: &BallRegistry,
        table: &Table,
        player: &Player,
    ) -> Option<PlannedShot> {
        match self.thinking {
            None => {
                self.thinking = Some(self.difficulty.think_ticks());
                None
            }
            Some(0) => {
                self.thinking = None;
                self.plan(registry, table, player)
            }
            Some(n) => {
                self.thinking = Some(n - 1);
                None
            }
        }
    }

    /// Pick the candidate ball closest to a pocket and aim through it at
    /// that pocket via the ghost-ball point.
    fn plan(
        &mut self,
        registry: &BallRegistry,
        table: &Table,
        player: &Player,
    ) -> Option<PlannedShot> {
        let candidates = self.candidates(registry, player);
        let cue_pos = registry.get(BallId::CUE).pos;

        let mut best: Option<(Vec2, Vec2, f32)> = None; // (ball pos, pocket, dist)
        for id in candidates {
            let pos = registry.get(id).pos;
            let (pocket_idx, dist) = table.nearest_pocket(pos);
            if best.map_or(true, |(_, _, d)| dist < d) {
                best = Some((pos, table.pockets()[pocket_idx], dist));
            }
        }
        let (ball_pos, pocket, dist) = best?;

        // Ghost-ball point: where the cue ball must arrive to push the
        // target straight at the pocket.
        let to_pocket = (pocket - ball_pos).normalize_or_zero();
        let mut target = ball_pos - to_pocket * (table.ball_radius * 2.0);

        // Lower difficulties scatter the aim point.
        let jitter = (1.0 - self.difficulty.accuracy()) * table.ball_radius * 4.0;
        target += Vec2::new(self.rng.signed_unit(), self.rng.signed_unit()) * jitter;
        if (target - cue_pos).length_squared() < f32::EPSILON {
            return None;
        }

        let power = (dist * 50.0).clamp(20.0, 100.0) as u8;
        Some(PlannedShot { target, power })
    }

    /// Balls the AI may legally go for: its remaining group, the 8-ball
    /// once the group is cleared, or any numbered ball before groups are
    /// assigned.
    fn candidates(&self, registry: &BallRegistry, player: &Player) -> Vec<BallId> {
        if player.group.is_some() {
            if player.remaining.is_empty() {
                vec![BallId::EIGHT]
            } else {
                player.remaining.clone()
            }
        } else {
            registry
                .all_active()
                .filter(|b| !b.id.is_cue() && b.id != BallId::EIGHT)
                .map(|b| b.id)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balls::BallGroup;
    use crate::state::Player;

    fn setup() -> (Table, BallRegistry, Player) {
        let table = Table::standard();
        let registry = BallRegistry::racked(&table);
        let player = Player::new("AI", 1.0);
        (table, registry, player)
    }

    fn think_through(
        ai: &mut AiOpponent,
        registry: &BallRegistry,
        table: &Table,
        player: &Player,
    ) -> PlannedShot {
        for _ in 0..200 {
            if let Some(shot) = ai.tick(registry, table, player) {
                return shot;
            }
        }
        panic!("AI never committed a shot");
    }

    #[test]
    fn thinking_delay_runs_before_the_shot() {
        let (table, registry, player) = setup();
        let mut ai = AiOpponent::new(Difficulty::Medium, 1);

        assert!(ai.tick(&registry, &table, &player).is_none());
        assert!(ai.is_thinking());
        let mut ticks = 1;
        while ai.tick(&registry, &table, &player).is_none() {
            ticks += 1;
            assert!(ticks < 200, "delay never expired");
        }
        assert_eq!(ticks, 61, "medium difficulty thinks for 60 ticks");
        assert!(!ai.is_thinking());
    }

    #[test]
    fn targets_own_group_ball_nearest_a_pocket() {
        let (table, mut registry, mut player) = setup();
        player.assign_group(BallGroup::Solid);
        // Park solid 2 right next to a corner pocket.
        let pocket = table.pockets()[5];
        registry.get_mut(BallId(2)).pos = pocket + Vec2::new(-0.12, -0.12);

        let mut ai = AiOpponent::new(Difficulty::Hard, 1);
        let shot = think_through(&mut ai, &registry, &table, &player);

        let dist = shot.target.distance(registry.get(BallId(2)).pos);
        assert!(
            dist < table.ball_radius * 4.0,
            "aim point should be near ball 2, was {} away",
            dist
        );
    }

    #[test]
    fn targets_eight_ball_once_group_cleared() {
        let (table, registry, mut player) = setup();
        player.assign_group(BallGroup::Stripe);
        player.remaining.clear();

        let mut ai = AiOpponent::new(Difficulty::Hard, 1);
        let shot = think_through(&mut ai, &registry, &table, &player);

        let dist = shot.target.distance(registry.get(BallId::EIGHT).pos);
        assert!(dist < table.ball_radius * 6.0);
    }

    #[test]
    fn power_is_clamped_between_20_and_100() {
        let (table, mut registry, mut player) = setup();
        player.assign_group(BallGroup::Solid);

        // A ball practically hanging in the pocket: minimum power.
        let pocket = table.pockets()[0];
        registry.get_mut(BallId(1)).pos = pocket + Vec2::new(0.11, 0.0);
        let mut ai = AiOpponent::new(Difficulty::Hard, 1);
        let shot = think_through(&mut ai, &registry, &table, &player);
        assert!((20..=100).contains(&shot.power));
        assert_eq!(shot.power, 20, "near-pocket ball takes minimum power");
    }

    #[test]
    fn reset_clears_pending_thought() {
        let (table, registry, player) = setup();
        let mut ai = AiOpponent::new(Difficulty::Easy, 1);
        ai.tick(&registry, &table, &player);
        assert!(ai.is_thinking());
        ai.reset();
        assert!(!ai.is_thinking());
    }
}
