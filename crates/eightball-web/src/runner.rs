//! Game runner that wires the pool core to the browser loop: fixed
//! timestep accumulation, flat buffers for the renderer, JSON for the
//! panel UI.

use eightball_core::{
    ControlEvent, FixedTimestep, GameEvent, GameMode, Notification, PoolGame, FIXED_DT,
};

/// Floats per ball in the render buffer:
/// number, x, y, radius, visible (1.0 / 0.0).
pub const BALL_FLOATS: usize = 5;

pub struct GameRunner {
    game: PoolGame,
    timestep: FixedTimestep,
    /// Flat ball states for the JS renderer, rebuilt every frame.
    ball_buffer: Vec<f32>,
    /// Game events accumulated over the frame's ticks.
    event_buffer: Vec<GameEvent>,
    /// Notifications pending pickup by the UI.
    pending_notifications: Vec<Notification>,
}

impl GameRunner {
    pub fn new(game: PoolGame) -> Self {
        Self {
            game,
            timestep: FixedTimestep::new(FIXED_DT),
            ball_buffer: Vec::with_capacity(16 * BALL_FLOATS),
            event_buffer: Vec::new(),
            pending_notifications: Vec::new(),
        }
    }

    pub fn from_mode(mode: GameMode, seed: u64) -> Self {
        Self::new(PoolGame::new(mode, seed))
    }

    pub fn push_input(&mut self, event: ControlEvent) {
        self.game.push_input(event);
    }

    /// Run one frame: as many fixed ticks as the elapsed time covers,
    /// then rebuild the outbound buffers.
    pub fn tick(&mut self, dt: f32) {
        self.event_buffer.clear();

        let ticks = self.timestep.advance(dt);
        for _ in 0..ticks {
            self.game.update();
            self.event_buffer.extend(self.game.drain_events());
            self.pending_notifications
                .extend(self.game.drain_notifications());
        }

        self.rebuild_ball_buffer();
    }

    fn rebuild_ball_buffer(&mut self) {
        self.ball_buffer.clear();
        for ball in self.game.balls() {
            self.ball_buffer.push(ball.id.0 as f32);
            self.ball_buffer.push(ball.pos.x);
            self.ball_buffer.push(ball.pos.y);
            self.ball_buffer.push(self.game.table().ball_radius);
            self.ball_buffer.push(if ball.pocketed { 0.0 } else { 1.0 });
        }
    }

    /// Notifications since the last call, as a JSON array.
    pub fn take_notifications(&mut self) -> String {
        let json = serde_json::to_string(&self.pending_notifications)
            .unwrap_or_else(|_| "[]".to_string());
        self.pending_notifications.clear();
        json
    }

    pub fn scoreboard_json(&self) -> String {
        serde_json::to_string(&self.game.scoreboard()).unwrap_or_else(|_| "{}".to_string())
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn balls_ptr(&self) -> *const f32 {
        self.ball_buffer.as_ptr()
    }

    pub fn ball_count(&self) -> u32 {
        (self.ball_buffer.len() / BALL_FLOATS) as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    pub fn table_width(&self) -> f32 {
        self.game.table().half_width * 2.0
    }

    pub fn table_height(&self) -> f32 {
        self.game.table().half_length * 2.0
    }
}
