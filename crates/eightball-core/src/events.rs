//! Outbound events and notifications for the UI layer.
//!
//! `GameEvent` is a flat Pod record read by JS out of WASM memory;
//! `Notification` and `ScoreBoard` travel as JSON through the bridge.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::state::PlayerId;

/// Transient on-screen message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient toast for the UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self { severity: Severity::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { severity: Severity::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, message: message.into() }
    }
}

/// Event kinds carried in `GameEvent::kind`.
pub mod kinds {
    pub const BALL_POCKETED: f32 = 1.0; // a = ball number, b = pocket index
    pub const TURN_CHANGED: f32 = 2.0; // a = player (1 or 2)
    pub const SCORE: f32 = 3.0; // a = player 1 score, b = player 2 score
    pub const GAME_OVER: f32 = 4.0; // a = winning player (1 or 2)
    pub const POWER: f32 = 5.0; // a = current power
    pub const COINS: f32 = 6.0; // a = player 1 coin balance
}

/// A game event communicated to the UI via a flat float buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Snapshot of the panel state the UI renders every frame.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBoard {
    pub player_one: PanelEntry,
    pub player_two: PanelEntry,
    pub current: PlayerId,
    pub power: u8,
    pub winner: Option<PlayerId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelEntry {
    pub name: String,
    pub score: u32,
    pub remaining: usize,
    pub group: Option<crate::balls::BallGroup>,
    pub coins: u64,
    pub gems: u64,
    pub gold_bars: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_serializes_with_lowercase_severity() {
        let n = Notification::success("ball 7 pocketed");
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains("\"success\""));
        assert!(json.contains("ball 7 pocketed"));
    }

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }
}
