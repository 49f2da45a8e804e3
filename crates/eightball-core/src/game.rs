//! Match orchestrator: owns all game state and drives one fixed tick of
//! input handling, physics, pocket detection and rules evaluation.

use glam::Vec2;

use crate::ai::{AiOpponent, Difficulty};
use crate::balls::BallId;
use crate::events::{kinds, GameEvent, Notification, PanelEntry, ScoreBoard};
use crate::input::{ControlEvent, ControlQueue};
use crate::meta::MetaState;
use crate::physics::{self, REST_EPSILON};
use crate::registry::{BallRegistry, BallState};
use crate::rules::RulesEngine;
use crate::shot::{ShotController, ShotPhase};
use crate::state::{MatchState, Player, PlayerId};
use crate::table::Table;

/// Simulation tick length. The browser's frame callback is resampled onto
/// this grid by the runner.
pub const FIXED_DT: f32 = 1.0 / 60.0;

/// Custom UI event kinds understood by the core.
pub mod ui_events {
    pub const NEW_MATCH: u32 = 1;
    pub const CHEST_PULL: u32 = 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    TwoPlayer,
    VersusAi(Difficulty),
}

pub struct PoolGame {
    table: Table,
    registry: BallRegistry,
    controller: ShotController,
    rules: RulesEngine,
    state: MatchState,
    /// Plays player two's turns in `VersusAi` mode.
    ai: Option<AiOpponent>,
    meta: MetaState,
    input: ControlQueue,
    events: Vec<GameEvent>,
    notifications: Vec<Notification>,
}

impl PoolGame {
    pub fn new(mode: GameMode, seed: u64) -> Self {
        let table = Table::standard();
        let registry = BallRegistry::racked(&table);
        let (p2_name, ai) = match mode {
            GameMode::TwoPlayer => ("Player 2", None),
            GameMode::VersusAi(difficulty) => {
                ("Computer", Some(AiOpponent::new(difficulty, seed ^ 0x5bd1)))
            }
        };
        let state = MatchState::new(Player::new("Player 1", 1.25), Player::new(p2_name, 1.0));

        Self {
            table,
            registry,
            controller: ShotController::new(),
            rules: RulesEngine::new(),
            state,
            ai,
            meta: MetaState::new(seed),
            input: ControlQueue::new(),
            events: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Queue a control event for the next tick.
    pub fn push_input(&mut self, event: ControlEvent) {
        self.input.push(event);
    }

    /// Run one fixed simulation tick.
    pub fn update(&mut self) {
        self.handle_input();
        physics::step(&mut self.registry, &self.table, FIXED_DT);

        for event in self.rules.sweep(&mut self.registry, &self.table) {
            self.events.push(GameEvent::new(
                kinds::BALL_POCKETED,
                event.ball.0 as f32,
                event.pocket as f32,
                0.0,
            ));
            if !event.ball.is_cue() {
                self.notifications
                    .push(Notification::success(format!("Ball {} in the pocket!", event.ball.0)));
            }
        }

        let at_rest = !self.registry.in_motion(REST_EPSILON);
        if self.controller.settle(at_rest) {
            self.finish_shot();
        }

        self.run_ai(at_rest);
    }

    fn handle_input(&mut self) {
        let events = self.input.drain();
        for event in events {
            match event {
                ControlEvent::Reset => {
                    self.reset_match();
                    return;
                }
                ControlEvent::Custom { kind, .. } if kind == ui_events::NEW_MATCH => {
                    self.reset_match();
                    return;
                }
                ControlEvent::Custom { kind, .. } if kind == ui_events::CHEST_PULL => {
                    let (_, notification) = self.meta.open_chest(PlayerId::One);
                    self.notifications.push(notification);
                    self.events.push(GameEvent::new(
                        kinds::COINS,
                        self.meta.wallet(PlayerId::One).coins as f32,
                        0.0,
                        0.0,
                    ));
                }
                ControlEvent::Custom { .. } => {}
                _ if self.gameplay_input_blocked() => {}
                ControlEvent::BeginAim => {
                    let at_rest = !self.registry.in_motion(REST_EPSILON);
                    self.controller.begin_aim(at_rest);
                }
                ControlEvent::AimAt { x, y } => {
                    self.controller.aim_at(Vec2::new(x, y));
                }
                ControlEvent::PowerDelta(delta) => {
                    self.state.adjust_power(delta);
                    self.events.push(GameEvent::new(
                        kinds::POWER,
                        self.state.power as f32,
                        0.0,
                        0.0,
                    ));
                }
                ControlEvent::Commit => {
                    self.try_commit();
                }
            }
        }
    }

    /// Human gameplay input is dropped after the match ends, while a shot
    /// is in flight, and for the whole of an AI turn (including the
    /// thinking delay).
    fn gameplay_input_blocked(&self) -> bool {
        self.state.game_over()
            || self.controller.phase() == ShotPhase::InFlight
            || (self.ai.is_some() && self.state.current == PlayerId::Two)
    }

    fn try_commit(&mut self) {
        let cue = self.registry.get(BallId::CUE);
        debug_assert!(!cue.pocketed, "committing a shot without a cue ball on the table");
        let cue_pos = cue.pos;
        if let Some(shot) = self
            .controller
            .commit(cue_pos, self.state.power, self.state.current)
        {
            self.registry.get_mut(BallId::CUE).vel = shot.velocity();
            self.notifications.push(Notification::info("Shot away!"));
        }
    }

    /// End-of-shot bookkeeping once all balls have stopped: a final
    /// authoritative pocket pass, then the rules evaluation.
    fn finish_shot(&mut self) {
        self.rules.sweep(&mut self.registry, &self.table);
        let shooter = self.state.current;
        let outcome = self
            .rules
            .resolve(&mut self.state, &mut self.registry, &self.table);

        if outcome.cue_scratch {
            self.notifications
                .push(Notification::error("Scratch! Cue ball respotted."));
        }
        if let Some(group) = outcome.assigned {
            self.notifications.push(Notification::info(format!(
                "{} is on {:?}s",
                self.state.player(shooter).name,
                group
            )));
        }
        self.events.push(GameEvent::new(
            kinds::SCORE,
            self.state.player(PlayerId::One).score as f32,
            self.state.player(PlayerId::Two).score as f32,
            0.0,
        ));

        if let Some(winner) = outcome.winner {
            let vip = self.state.player(winner).vip_multiplier;
            let (reward, reward_note) = self.meta.award_win(winner, vip);
            self.notifications.push(Notification::success(format!(
                "{} wins the match!",
                self.state.player(winner).name
            )));
            self.notifications.push(reward_note);
            self.events.push(GameEvent::new(
                kinds::GAME_OVER,
                winner.index() as f32 + 1.0,
                reward as f32,
                0.0,
            ));
        } else if !outcome.keep_turn {
            self.events.push(GameEvent::new(
                kinds::TURN_CHANGED,
                self.state.current.index() as f32 + 1.0,
                0.0,
                0.0,
            ));
        }
    }

    /// Let the AI take its turn: think, then aim and commit through the
    /// same controller path a human uses.
    fn run_ai(&mut self, at_rest: bool) {
        if self.state.game_over()
            || self.state.current != PlayerId::Two
            || self.controller.phase() != ShotPhase::Idle
            || !at_rest
        {
            return;
        }
        let Some(ai) = self.ai.as_mut() else { return };

        let player = self.state.player(PlayerId::Two);
        if let Some(planned) = ai.tick(&self.registry, &self.table, player) {
            self.controller.begin_aim(true);
            self.controller.aim_at(planned.target);
            self.state.power = planned.power;
            self.try_commit();
        }
    }

    pub fn reset_match(&mut self) {
        self.registry.reset(&self.table);
        self.state.reset();
        self.rules.clear();
        self.controller.abort();
        if let Some(ai) = self.ai.as_mut() {
            ai.reset();
        }
        self.notifications.push(Notification::info("New match!"));
        log::info!("match reset");
    }

    // -- Read access for the UI layer --

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn balls(&self) -> impl Iterator<Item = &BallState> {
        self.registry.iter()
    }

    pub fn phase(&self) -> ShotPhase {
        self.controller.phase()
    }

    pub fn match_state(&self) -> &MatchState {
        &self.state
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn scoreboard(&self) -> ScoreBoard {
        let entry = |id: PlayerId| {
            let player = self.state.player(id);
            let wallet = self.meta.wallet(id);
            PanelEntry {
                name: player.name.clone(),
                score: player.score,
                remaining: player.remaining.len(),
                group: player.group,
                coins: wallet.coins,
                gems: wallet.gems,
                gold_bars: wallet.gold_bars,
            }
        };
        ScoreBoard {
            player_one: entry(PlayerId::One),
            player_two: entry(PlayerId::Two),
            current: self.state.current,
            power: self.state.power,
            winner: self.state.winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balls::BallGroup;

    /// Collinear layout: cue ball behind ball `id`, both lined up on a
    /// corner pocket, target ball `ball_dist` from the pocket center.
    fn line_up(game: &mut PoolGame, id: BallId, ball_dist: f32, cue_dist: f32) -> Vec2 {
        let pocket = game.table.pockets()[0];
        let dir = Vec2::new(2.0, 1.0).normalize();
        let ball_pos = pocket + dir * ball_dist;
        let cue_pos = pocket + dir * cue_dist;
        game.registry.get_mut(id).pos = ball_pos;
        game.registry.get_mut(BallId::CUE).pos = cue_pos;
        ball_pos
    }

    fn shoot_at(game: &mut PoolGame, target: Vec2, power_delta: i8) {
        game.push_input(ControlEvent::BeginAim);
        game.push_input(ControlEvent::AimAt { x: target.x, y: target.y });
        if power_delta != 0 {
            for _ in 0..(power_delta.abs() / 5) {
                game.push_input(ControlEvent::PowerDelta(if power_delta > 0 { 5 } else { -5 }));
            }
        }
        game.push_input(ControlEvent::Commit);
    }

    fn run_until_rest(game: &mut PoolGame, max_ticks: u32) {
        for _ in 0..max_ticks {
            game.update();
            if game.phase() == ShotPhase::Idle {
                return;
            }
        }
        panic!("balls never came to rest");
    }

    #[test]
    fn shot_pockets_ball_and_scores() {
        let mut game = PoolGame::new(GameMode::TwoPlayer, 1);
        let target = line_up(&mut game, BallId(1), 0.3, 0.9);

        // Power 80 = default 50 plus six +5 steps.
        shoot_at(&mut game, target, 30);
        run_until_rest(&mut game, 1200);

        assert!(game.registry.get(BallId(1)).pocketed);
        let p1 = game.match_state().player(PlayerId::One);
        assert_eq!(p1.score, 1);
        assert_eq!(p1.group, Some(BallGroup::Solid));
        assert!(!p1.remaining.contains(&BallId(1)));
        // Legal pocket keeps the turn.
        assert_eq!(game.match_state().current, PlayerId::One);
    }

    #[test]
    fn commit_during_flight_is_ignored() {
        let mut game = PoolGame::new(GameMode::TwoPlayer, 1);
        let target = line_up(&mut game, BallId(1), 0.5, 1.1);

        shoot_at(&mut game, target, 0);
        game.update();
        assert_eq!(game.phase(), ShotPhase::InFlight);

        let vel_before = game.registry.get(BallId::CUE).vel;
        game.push_input(ControlEvent::BeginAim);
        game.push_input(ControlEvent::Commit);
        game.handle_input();
        assert_eq!(game.phase(), ShotPhase::InFlight);
        assert_eq!(game.registry.get(BallId::CUE).vel, vel_before);
    }

    #[test]
    fn cue_scratch_respots_and_passes_turn() {
        let mut game = PoolGame::new(GameMode::TwoPlayer, 1);
        // No target ball: drive the cue straight into the pocket.
        let pocket = game.table.pockets()[0];
        let dir = Vec2::new(2.0, 1.0).normalize();
        game.registry.get_mut(BallId::CUE).pos = pocket + dir * 0.5;

        shoot_at(&mut game, pocket, 30);
        run_until_rest(&mut game, 1200);

        let cue = game.registry.get(BallId::CUE);
        assert!(!cue.pocketed);
        assert_eq!(cue.pos, game.table.cue_spot());
        assert_eq!(cue.vel, Vec2::ZERO);
        assert_eq!(game.match_state().current, PlayerId::Two);
        assert_eq!(game.match_state().player(PlayerId::One).fouls, 1);
    }

    #[test]
    fn early_eight_ball_ends_the_match_and_blocks_shots() {
        let mut game = PoolGame::new(GameMode::TwoPlayer, 1);
        game.state.player_mut(PlayerId::One).assign_group(BallGroup::Solid);
        game.state.player_mut(PlayerId::Two).assign_group(BallGroup::Stripe);
        let target = line_up(&mut game, BallId::EIGHT, 0.3, 0.9);

        shoot_at(&mut game, target, 30);
        run_until_rest(&mut game, 1200);

        assert_eq!(game.match_state().winner, Some(PlayerId::Two));
        assert!(game.match_state().game_over());

        // Further shots are refused.
        let cue_pos = game.registry.get(BallId::CUE).pos;
        shoot_at(&mut game, cue_pos + Vec2::new(0.3, 0.0), 0);
        game.update();
        assert_eq!(game.phase(), ShotPhase::Idle);
        assert_eq!(game.registry.get(BallId::CUE).vel, Vec2::ZERO);
    }

    #[test]
    fn winner_collects_coin_reward() {
        let mut game = PoolGame::new(GameMode::TwoPlayer, 7);
        game.state.player_mut(PlayerId::One).assign_group(BallGroup::Solid);
        game.state.player_mut(PlayerId::Two).assign_group(BallGroup::Stripe);
        game.state.player_mut(PlayerId::One).remaining.clear();
        let target = line_up(&mut game, BallId::EIGHT, 0.3, 0.9);

        shoot_at(&mut game, target, 30);
        run_until_rest(&mut game, 1200);

        assert_eq!(game.match_state().winner, Some(PlayerId::One));
        assert!(game.meta.wallet(PlayerId::One).coins >= 500);
        let kinds_seen: Vec<f32> = game.drain_events().iter().map(|e| e.kind).collect();
        assert!(kinds_seen.contains(&kinds::GAME_OVER));
    }

    #[test]
    fn ai_takes_its_turn_unaided() {
        let mut game = PoolGame::new(GameMode::VersusAi(Difficulty::Hard), 3);
        game.state.pass_turn();
        assert_eq!(game.match_state().current, PlayerId::Two);

        // Thinking delay, then a committed shot sets the cue moving.
        let mut moved = false;
        for _ in 0..300 {
            game.update();
            if game.registry.get(BallId::CUE).speed() > 0.0 {
                moved = true;
                break;
            }
        }
        assert!(moved, "AI never shot");
        assert_eq!(game.phase(), ShotPhase::InFlight);
    }

    #[test]
    fn human_input_dropped_during_ai_turn() {
        let mut game = PoolGame::new(GameMode::VersusAi(Difficulty::Easy), 3);
        game.state.pass_turn();

        game.push_input(ControlEvent::BeginAim);
        game.push_input(ControlEvent::Commit);
        game.update();
        assert_eq!(game.phase(), ShotPhase::Idle);
        assert_eq!(game.registry.get(BallId::CUE).vel, Vec2::ZERO);
    }

    #[test]
    fn chest_pull_credits_player_one() {
        let mut game = PoolGame::new(GameMode::TwoPlayer, 5);
        game.push_input(ControlEvent::Custom {
            kind: ui_events::CHEST_PULL,
            a: 0.0,
            b: 0.0,
            c: 0.0,
        });
        game.update();

        let notes = game.drain_notifications();
        assert!(!notes.is_empty());
        let kinds_seen: Vec<f32> = game.drain_events().iter().map(|e| e.kind).collect();
        assert!(kinds_seen.contains(&kinds::COINS));
    }

    #[test]
    fn reset_event_re_racks_mid_match() {
        let mut game = PoolGame::new(GameMode::TwoPlayer, 1);
        let target = line_up(&mut game, BallId(1), 0.3, 0.9);
        shoot_at(&mut game, target, 30);
        run_until_rest(&mut game, 1200);
        assert!(game.registry.get(BallId(1)).pocketed);

        game.push_input(ControlEvent::Reset);
        game.update();
        assert!(!game.registry.get(BallId(1)).pocketed);
        assert_eq!(game.match_state().player(PlayerId::One).score, 0);
        assert_eq!(game.phase(), ShotPhase::Idle);
    }

    #[test]
    fn power_events_reflect_clamped_value() {
        let mut game = PoolGame::new(GameMode::TwoPlayer, 1);
        for _ in 0..30 {
            game.push_input(ControlEvent::PowerDelta(5));
        }
        game.update();
        assert_eq!(game.match_state().power, 100);
        let last_power = game
            .drain_events()
            .iter()
            .rev()
            .find(|e| e.kind == kinds::POWER)
            .map(|e| e.a);
        assert_eq!(last_power, Some(100.0));
    }
}
