//! Headless 8-ball pool core: a lightweight rigid-body table simulation,
//! turn-based rules, aiming/shot state machine, AI opponent and the
//! reward meta-game. Rendering, menus and asset caching live in the
//! surrounding web application; this crate only exposes state to read
//! and a typed input queue to write.

pub mod ai;
pub mod balls;
pub mod events;
pub mod game;
pub mod input;
pub mod meta;
pub mod physics;
pub mod registry;
pub mod rng;
pub mod rules;
pub mod shot;
pub mod state;
pub mod table;
pub mod time;

// Re-export key types at crate root for convenience
pub use ai::{AiOpponent, Difficulty, PlannedShot};
pub use balls::{rack_positions, BallGroup, BallId};
pub use events::{GameEvent, Notification, PanelEntry, ScoreBoard, Severity};
pub use game::{GameMode, PoolGame, FIXED_DT};
pub use input::{ControlEvent, ControlQueue};
pub use meta::{ChestReward, MetaState, Wallet};
pub use registry::{BallRegistry, BallState};
pub use rules::{PocketEvent, RulesEngine, ShotOutcome};
pub use shot::{Shot, ShotController, ShotPhase, MAX_SHOT_SPEED};
pub use state::{MatchState, Player, PlayerId};
pub use table::Table;
pub use time::FixedTimestep;
