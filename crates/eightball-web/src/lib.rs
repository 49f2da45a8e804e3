//! WASM exports for the pool game. JS drives `game_tick` from its frame
//! callback, feeds input through the `game_*` event functions, and reads
//! ball positions out of WASM memory via the pointer accessors.

pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use eightball_core::{ControlEvent, Difficulty, GameMode};

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

/// Key codes the bridge understands; everything else (escape included)
/// stays in the menu layer.
mod keys {
    pub const SPACE: u32 = 32;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_DOWN: u32 = 40;
}

/// `mode`: 0 = two human players, 1/2/3 = versus AI (easy/medium/hard).
#[wasm_bindgen]
pub fn game_init(mode: u32, seed: u32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mode = match mode {
        1 => GameMode::VersusAi(Difficulty::Easy),
        2 => GameMode::VersusAi(Difficulty::Medium),
        3 => GameMode::VersusAi(Difficulty::Hard),
        _ => GameMode::TwoPlayer,
    };
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(GameRunner::from_mode(mode, seed as u64));
    });
    log::info!("eightball: initialized ({:?})", mode);
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Input ----

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(ControlEvent::AimAt { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_down(_x: f32, _y: f32) {
    with_runner(|r| r.push_input(ControlEvent::BeginAim));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| {
        r.push_input(ControlEvent::AimAt { x, y });
        r.push_input(ControlEvent::Commit);
    });
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| match key_code {
        keys::SPACE => r.push_input(ControlEvent::BeginAim),
        keys::ARROW_UP => r.push_input(ControlEvent::PowerDelta(5)),
        keys::ARROW_DOWN => r.push_input(ControlEvent::PowerDelta(-5)),
        _ => {}
    });
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner(|r| {
        if key_code == keys::SPACE {
            r.push_input(ControlEvent::Commit);
        }
    });
}

#[wasm_bindgen]
pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(ControlEvent::Custom { kind, a, b, c }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_balls_ptr() -> *const f32 {
    with_runner(|r| r.balls_ptr())
}

#[wasm_bindgen]
pub fn get_ball_count() -> u32 {
    with_runner(|r| r.ball_count())
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len())
}

#[wasm_bindgen]
pub fn take_notifications() -> String {
    with_runner(|r| r.take_notifications())
}

#[wasm_bindgen]
pub fn get_scoreboard() -> String {
    with_runner(|r| r.scoreboard_json())
}

#[wasm_bindgen]
pub fn get_table_width() -> f32 {
    with_runner(|r| r.table_width())
}

#[wasm_bindgen]
pub fn get_table_height() -> f32 {
    with_runner(|r| r.table_height())
}
