//! Match and turn state: the two players, whose turn it is, shot power,
//! and the game-over flag. Owned by the orchestrator and handed to the
//! rules engine explicitly; nothing in the core is global.

use serde::Serialize;

use crate::balls::{BallGroup, BallId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub name: String,
    /// Assigned at the first legal pocket of the match, not at rack time.
    pub group: Option<BallGroup>,
    /// Own-group balls pocketed so far.
    pub score: u32,
    pub fouls: u32,
    /// Own-group balls still on the table. Empty until a group is
    /// assigned.
    pub remaining: Vec<BallId>,
    /// Reward multiplier from the player's VIP level.
    pub vip_multiplier: f32,
}

impl Player {
    pub fn new(name: &str, vip_multiplier: f32) -> Self {
        Self {
            name: name.to_string(),
            group: None,
            score: 0,
            fouls: 0,
            remaining: Vec::new(),
            vip_multiplier,
        }
    }

    /// Assign a group and populate the remaining-ball list from it.
    pub fn assign_group(&mut self, group: BallGroup) {
        debug_assert!(self.group.is_none(), "group assigned twice");
        debug_assert!(matches!(group, BallGroup::Solid | BallGroup::Stripe));
        self.remaining = group.members();
        self.group = Some(group);
    }

    /// True once the player's whole group is down (group must be
    /// assigned).
    pub fn cleared_group(&self) -> bool {
        self.group.is_some() && self.remaining.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct MatchState {
    players: [Player; 2],
    pub current: PlayerId,
    /// Shot power, 0-100. Adjusted in +/-5 steps by the arrow keys.
    pub power: u8,
    pub winner: Option<PlayerId>,
}

impl MatchState {
    pub fn new(player_one: Player, player_two: Player) -> Self {
        Self {
            players: [player_one, player_two],
            current: PlayerId::One,
            power: 50,
            winner: None,
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub fn game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn pass_turn(&mut self) {
        self.current = self.current.other();
    }

    pub fn adjust_power(&mut self, delta: i8) {
        self.power = (self.power as i16 + delta as i16).clamp(0, 100) as u8;
    }

    /// Reset scores, groups and turn order for a fresh rack. Player names
    /// and VIP levels survive across matches.
    pub fn reset(&mut self) {
        for player in &mut self.players {
            player.group = None;
            player.score = 0;
            player.fouls = 0;
            player.remaining.clear();
        }
        self.current = PlayerId::One;
        self.power = 50;
        self.winner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> MatchState {
        MatchState::new(Player::new("P1", 1.25), Player::new("P2", 1.0))
    }

    #[test]
    fn power_clamps_at_both_ends() {
        let mut state = fresh();
        for _ in 0..30 {
            state.adjust_power(5);
        }
        assert_eq!(state.power, 100);
        for _ in 0..30 {
            state.adjust_power(-5);
        }
        assert_eq!(state.power, 0);
    }

    #[test]
    fn group_assignment_fills_remaining() {
        let mut state = fresh();
        state.player_mut(PlayerId::One).assign_group(BallGroup::Stripe);
        let p1 = state.player(PlayerId::One);
        assert_eq!(p1.remaining.len(), 7);
        assert!(p1.remaining.contains(&BallId(9)));
        assert!(!p1.cleared_group());
    }

    #[test]
    fn turn_passes_between_two_players() {
        let mut state = fresh();
        assert_eq!(state.current, PlayerId::One);
        state.pass_turn();
        assert_eq!(state.current, PlayerId::Two);
        state.pass_turn();
        assert_eq!(state.current, PlayerId::One);
    }

    #[test]
    fn reset_clears_match_but_keeps_identity() {
        let mut state = fresh();
        state.player_mut(PlayerId::One).assign_group(BallGroup::Solid);
        state.player_mut(PlayerId::One).score = 3;
        state.winner = Some(PlayerId::One);
        state.reset();
        assert!(state.winner.is_none());
        assert_eq!(state.player(PlayerId::One).score, 0);
        assert!(state.player(PlayerId::One).group.is_none());
        assert_eq!(state.player(PlayerId::One).name, "P1");
    }
}
