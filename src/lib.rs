//! Merge Drop - A physics merge game in a box
//!
//! Core modules:
//! - `sim`: Simulation (vector math, collisions, rank table, world step)
//! - `board`: Game controller (drop queue, cursor mapping, status derivation)
//! - `game`: App shell logic (buttons, pointer gating, frame loop)
//! - `renderer`: Renderer-agnostic draw lists
//! - `settings`: Data-driven tunables

pub mod board;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use board::{Board, BoardSnapshot, GameStatus};
pub use game::{Game, PointerEvent};
pub use settings::{Settings, SettingsError};
pub use sim::{Ball, World, WorldConfig};

/// Game configuration constants
pub mod consts {
    /// Sub-steps per external tick (explicit Euler needs small steps to stay stable)
    pub const SUB_STEPS: u32 = 100;
    /// Number of upcoming ranks shown to the player
    pub const QUEUE_LEN: usize = 5;
    /// Queue refills draw uniformly from this many lowest ranks
    pub const QUEUE_DRAW_RANKS: usize = 3;
    /// Instability below this counts as a settled board
    pub const SETTLE_THRESHOLD: f32 = 1e-3;

    /// Render surface size in pixels
    pub const CANVAS_WIDTH: f32 = 360.0;
    pub const CANVAS_HEIGHT: f32 = 740.0;
    /// Box width as a fraction of the canvas width
    pub const BOX_WIDTH_FRACTION: f32 = 0.8;

    /// Pointer input above this canvas y is ignored (button strip)
    pub const DROP_ZONE_MIN_Y: f32 = 160.0;

    /// Shake impulse ranges
    pub const SHAKE_HORIZONTAL: f32 = 100.0;
    pub const SHAKE_UP_MIN: f32 = 300.0;
    pub const SHAKE_UP_SPAN: f32 = 200.0;
}
