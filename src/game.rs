//! App shell logic around a board
//!
//! Pointer gating, the Restart/Shake buttons, the per-frame update rule and
//! the status banners. Rendering and event capture stay with the host.

use crate::board::{Board, GameStatus, SeededDice};
use crate::consts::DROP_ZONE_MIN_Y;
use crate::settings::Settings;

/// Pointer events in input-surface offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Restart,
    Shake,
}

/// A clickable rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub label: &'static str,
    pub action: ButtonAction,
}

impl Button {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

pub const BUTTONS: [Button; 2] = [
    Button {
        x: 20.0,
        y: 20.0,
        width: 140.0,
        height: 60.0,
        color: 0x880000,
        label: "Restart",
        action: ButtonAction::Restart,
    },
    Button {
        x: 200.0,
        y: 20.0,
        width: 140.0,
        height: 60.0,
        color: 0x444444,
        label: "Shake",
        action: ButtonAction::Shake,
    },
];

/// Seed increment between restarts
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct Game {
    board: Board<SeededDice>,
    settings: Settings,
    seed: u64,
}

impl Game {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let board = Board::with_settings(&settings, SeededDice::new(seed));
        Self {
            board,
            settings,
            seed,
        }
    }

    pub fn board(&self) -> &Board<SeededDice> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board<SeededDice> {
        &mut self.board
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// Per-frame update. A won or lost board stays frozen until shaken or
    /// restarted.
    pub fn frame(&mut self, dt: f32) {
        if !self.board.status().is_finished() {
            self.board.tick(dt);
        }
    }

    /// Feed a pointer event. Returns true if a ball was dropped.
    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        let (x, y) = match event {
            PointerEvent::Down { x, y } | PointerEvent::Move { x, y } | PointerEvent::Up { x, y } => {
                (x, y)
            }
        };
        let layout = self.board.layout();
        let canvas_x = layout.x_offset_to_canvas(x);
        let canvas_y = layout.y_offset_to_canvas(y);
        let in_drop_zone = self.board.status().accepts_input() && canvas_y > DROP_ZONE_MIN_Y;

        match event {
            PointerEvent::Down { .. } | PointerEvent::Move { .. } => {
                if in_drop_zone {
                    self.board.point(x);
                }
                false
            }
            PointerEvent::Up { .. } => {
                let dropped = in_drop_zone && self.board.click(x);
                if let Some(button) = BUTTONS.iter().find(|b| b.contains(canvas_x, canvas_y)) {
                    self.press(button.action);
                }
                dropped
            }
        }
    }

    pub fn press(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::Restart => self.restart(),
            ButtonAction::Shake => {
                self.board.shake();
            }
        }
    }

    /// Fresh world and queue under the next seed
    pub fn restart(&mut self) {
        self.seed = self.seed.wrapping_add(SEED_STRIDE);
        log::info!("Restart (seed {:#x})", self.seed);
        self.board = Board::with_settings(&self.settings, SeededDice::new(self.seed));
    }

    pub fn banner(&self) -> Option<&'static str> {
        match self.board.status() {
            GameStatus::Won | GameStatus::Winning => Some("You won! Congratulations!"),
            GameStatus::Lost => Some("You lost.. Shake the board?"),
            GameStatus::Playable | GameStatus::Unstable => None,
        }
    }
}
