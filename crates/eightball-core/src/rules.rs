//! Pocketing detection and 8-ball rules: per-tick pocket sweeps, a
//! per-shot ledger, and end-of-shot evaluation of fouls, scoring, group
//! assignment and win conditions.

use crate::balls::{BallGroup, BallId};
use crate::registry::BallRegistry;
use crate::state::{MatchState, PlayerId};
use crate::table::Table;

/// A ball dropping into a pocket, recorded at the tick it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PocketEvent {
    pub ball: BallId,
    pub pocket: usize,
}

/// What the completed shot amounted to, evaluated once motion stops.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShotOutcome {
    /// The cue ball went down: foul, cue respotted, turn passed.
    pub cue_scratch: bool,
    /// Own-group balls scored by the shooter this shot.
    pub scored: u32,
    /// Group assigned to the shooter this shot, if any.
    pub assigned: Option<BallGroup>,
    /// Shooter keeps the table for the next shot.
    pub keep_turn: bool,
    /// Set when this shot ended the match.
    pub winner: Option<PlayerId>,
}

pub struct RulesEngine {
    /// Balls pocketed since the last end-of-shot evaluation.
    ledger: Vec<PocketEvent>,
}

impl RulesEngine {
    pub fn new() -> Self {
        Self { ledger: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.ledger.clear();
    }

    /// Per-tick pass over post-physics positions: capture every active
    /// ball within a pocket's capture radius. Returns the events new this
    /// tick; they are also added to the shot ledger.
    pub fn sweep(&mut self, registry: &mut BallRegistry, table: &Table) -> Vec<PocketEvent> {
        let captured: Vec<PocketEvent> = registry
            .all_active()
            .filter_map(|ball| {
                table
                    .capturing_pocket(ball.pos)
                    .map(|pocket| PocketEvent { ball: ball.id, pocket })
            })
            .collect();

        for event in &captured {
            registry.set_pocketed(event.ball);
            log::info!("ball {} pocketed into pocket {}", event.ball.0, event.pocket);
        }
        self.ledger.extend(captured.iter().copied());
        captured
    }

    /// End-of-shot evaluation. Runs once per shot, after motion stops and
    /// a final authoritative `sweep` has been taken. Consumes the ledger.
    pub fn resolve(
        &mut self,
        state: &mut MatchState,
        registry: &mut BallRegistry,
        table: &Table,
    ) -> ShotOutcome {
        let shooter = state.current;
        let pockets = std::mem::take(&mut self.ledger);

        let mut outcome = ShotOutcome::default();
        outcome.cue_scratch = pockets.iter().any(|e| e.ball.is_cue());
        let eight_down = pockets.iter().any(|e| e.ball == BallId::EIGHT);

        // The 8-ball decides the match before any of this shot's group
        // balls count: the group must have been cleared on a previous
        // shot, and a simultaneous scratch always loses.
        if eight_down {
            let legal = state.player(shooter).cleared_group() && !outcome.cue_scratch;
            let winner = if legal { shooter } else { shooter.other() };
            state.winner = Some(winner);
            outcome.winner = Some(winner);
            remove_from_remaining(state, &pockets);
            return outcome;
        }

        let solids: Vec<BallId> = group_balls(&pockets, BallGroup::Solid);
        let stripes: Vec<BallId> = group_balls(&pockets, BallGroup::Stripe);

        if state.player(shooter).group.is_none() {
            match (solids.is_empty(), stripes.is_empty()) {
                (false, true) => outcome.assigned = Some(BallGroup::Solid),
                (true, false) => outcome.assigned = Some(BallGroup::Stripe),
                // Both groups on one pre-assignment shot: the ambiguous
                // break. Groups stay open and nothing scores, but the
                // shooter legally pocketed balls and keeps the table.
                (false, false) => {
                    log::info!("mixed-group break: groups remain open");
                }
                (true, true) => {}
            }
            if let Some(group) = outcome.assigned {
                state.player_mut(shooter).assign_group(group);
                state.player_mut(shooter.other()).assign_group(group.opposite());
                // Balls already off the table never join a remaining list.
                remove_from_remaining(state, &pockets);
            }
        }

        // Score own-group balls; opponent balls leave their list unscored.
        if outcome.assigned.is_none() {
            remove_from_remaining(state, &pockets);
        }
        if let Some(group) = state.player(shooter).group {
            let own = if group == BallGroup::Solid { &solids } else { &stripes };
            outcome.scored = own.len() as u32;
            state.player_mut(shooter).score += outcome.scored;
        }

        if outcome.cue_scratch {
            state.player_mut(shooter).fouls += 1;
            registry.respot_cue(table.cue_spot());
        }

        let pre_assignment_pockets =
            state.player(shooter).group.is_none() && !(solids.is_empty() && stripes.is_empty());
        outcome.keep_turn =
            !outcome.cue_scratch && (outcome.scored > 0 || pre_assignment_pockets);
        if !outcome.keep_turn {
            state.pass_turn();
        }
        outcome
    }

}

/// Drop pocketed balls from whichever remaining list holds them.
fn remove_from_remaining(state: &mut MatchState, pockets: &[PocketEvent]) {
    for event in pockets {
        for player in [PlayerId::One, PlayerId::Two] {
            state
                .player_mut(player)
                .remaining
                .retain(|&id| id != event.ball);
        }
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn group_balls(pockets: &[PocketEvent], group: BallGroup) -> Vec<BallId> {
    pockets
        .iter()
        .map(|e| e.ball)
        .filter(|b| b.group() == group)
        .collect()
}
