//! Game controller
//!
//! Owns a [`World`], the queue of upcoming ranks and the drop cursor, and
//! derives the game status once per tick:
//! 1. Advance the world by `sub_steps` equal steps
//! 2. Scan the input surface for free drop positions
//! 3. Measure instability against the previous tick
//! 4. Derive the status

pub mod dice;
pub mod layout;
pub mod status;

pub use dice::{Dice, SeededDice};
pub use layout::Layout;
pub use status::GameStatus;

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Ball, World};

/// Read-only view of a board for collaborators (render, logging, CLI)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub status: GameStatus,
    pub win: bool,
    pub queue: Vec<usize>,
    /// Cursor in world units
    pub cursor_x: f32,
    /// Free drop offsets on the input surface
    pub available: Vec<i32>,
    /// `None` when the ball count changed since the previous tick
    pub instability: Option<f32>,
    pub balls: Vec<Ball>,
}

pub struct Board<D: Dice = SeededDice> {
    world: World,
    layout: Layout,
    queue: VecDeque<usize>,
    /// Cursor in world units (clamped for the head rank)
    world_x: f32,
    /// Cursor in canvas pixels
    canvas_x: f32,
    available: Vec<i32>,
    last_pos: Vec<Vec2>,
    instability: f32,
    status: GameStatus,
    sub_steps: u32,
    settle_threshold: f32,
    dice: D,
}

impl Board<SeededDice> {
    /// Board with default settings and seeded dice
    pub fn new(seed: u64) -> Self {
        Self::with_settings(&Settings::default(), SeededDice::new(seed))
    }
}

impl<D: Dice> Board<D> {
    pub fn with_settings(settings: &Settings, mut dice: D) -> Self {
        let world = World::with_config(settings.world);
        let layout = Layout::new(
            settings.canvas_width,
            settings.canvas_height,
            world.width(),
            world.height(),
        );
        let queue = (0..settings.queue_len).map(|_| dice.next_rank()).collect();
        let world_x = world.width() / 2.0;
        let canvas_x = layout.x_world_to_canvas(world_x);

        Self {
            world,
            layout,
            queue,
            world_x,
            canvas_x,
            available: Vec::new(),
            last_pos: Vec::new(),
            instability: 0.0,
            status: GameStatus::Playable,
            sub_steps: settings.sub_steps,
            settle_threshold: settings.settle_threshold,
            dice,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access (scenario setup, tooling)
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn resize_client(&mut self, width: f32, height: f32) {
        self.layout.resize_client(width, height);
    }

    pub fn queue(&self) -> &VecDeque<usize> {
        &self.queue
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Free drop offsets (input surface x) for the head rank, as of the last tick
    pub fn available(&self) -> &[i32] {
        &self.available
    }

    pub fn instability(&self) -> f32 {
        self.instability
    }

    /// Cursor position in world units
    pub fn cursor(&self) -> f32 {
        self.world_x
    }

    /// Cursor position in canvas pixels
    pub fn cursor_canvas(&self) -> f32 {
        self.canvas_x
    }

    /// Advance one external tick and re-derive the status
    pub fn tick(&mut self, dt: f32) {
        let step = dt / self.sub_steps as f32;
        for _ in 0..self.sub_steps {
            self.world.step(step);
        }

        self.available = match self.queue.front() {
            Some(&rank) => self.scan_available(rank),
            None => Vec::new(),
        };
        self.instability = self.measure_instability();
        self.last_pos = self.world.balls().iter().map(|b| b.pos).collect();

        let status = GameStatus::derive(
            self.world.win(),
            self.available.len(),
            self.instability,
            self.settle_threshold,
        );
        if status != self.status {
            log::debug!("Status {} -> {}", self.status.as_str(), status.as_str());
            self.status = status;
        }
    }

    /// Move the cursor to an input-surface offset
    pub fn point(&mut self, offset_x: f32) {
        let Some(&rank) = self.queue.front() else {
            return;
        };
        self.world_x = self.layout.offset_to_world_x(offset_x, rank);
        self.canvas_x = self.layout.x_world_to_canvas(self.world_x);
    }

    /// Try to drop the head rank at `offset_x`.
    ///
    /// Returns false (world and queue untouched) when the queue is empty or
    /// the spot is occupied.
    pub fn click(&mut self, offset_x: f32) -> bool {
        if self.queue.is_empty() {
            return false;
        }
        self.point(offset_x);
        let Some(&rank) = self.queue.front() else {
            return false;
        };
        if !self.world.available(self.world_x, rank) {
            return false;
        }

        self.world.drop(self.world_x, rank);
        self.queue.pop_front();
        self.queue.push_back(self.dice.next_rank());
        // Re-clamp for the new head rank
        self.point(offset_x);
        true
    }

    /// Kick every ball to unstick a jammed board.
    ///
    /// Ignored once the game is won; otherwise forces `Unstable`.
    pub fn shake(&mut self) -> bool {
        if self.status.is_win() {
            return false;
        }
        for ball in self.world.balls_mut() {
            ball.vel += self.dice.shake_impulse();
        }
        log::debug!("Shake ({} balls)", self.world.balls().len());
        self.status = GameStatus::Unstable;
        true
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            status: self.status,
            win: self.world.win(),
            queue: self.queue.iter().copied().collect(),
            cursor_x: self.world_x,
            available: self.available.clone(),
            instability: self.instability.is_finite().then_some(self.instability),
            balls: self.world.balls().to_vec(),
        }
    }

    /// Integer offsets across the playable width where `rank` can be dropped
    fn scan_available(&self, rank: usize) -> Vec<i32> {
        let l = &self.layout;
        let left = l.x_canvas_to_offset(l.x_world_to_canvas(l.x_world_clamp(0.0, rank)));
        let right = l.x_canvas_to_offset(l.x_world_to_canvas(l.x_world_clamp(l.world_width, rank)));
        let (start, end) = (left.floor() as i32, right.ceil() as i32);

        (start..end)
            .filter(|&x| self.world.available(l.offset_to_world_x(x as f32, rank), rank))
            .collect()
    }

    /// Summed squared displacement since the last tick, infinite if the
    /// ball count changed
    fn measure_instability(&self) -> f32 {
        let balls = self.world.balls();
        if balls.len() != self.last_pos.len() {
            return f32::INFINITY;
        }
        balls
            .iter()
            .zip(&self.last_pos)
            .map(|(ball, last)| (ball.pos - *last).length_squared())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::QUEUE_LEN;
    use crate::sim::RANK_COUNT;

    /// Dice that replays fixed ranks and never kicks sideways
    struct Scripted {
        ranks: Vec<usize>,
        next: usize,
    }

    impl Scripted {
        fn new(ranks: &[usize]) -> Self {
            Self {
                ranks: ranks.to_vec(),
                next: 0,
            }
        }
    }

    impl Dice for Scripted {
        fn next_rank(&mut self) -> usize {
            let r = self.ranks[self.next % self.ranks.len()];
            self.next += 1;
            r
        }

        fn shake_impulse(&mut self) -> Vec2 {
            Vec2::new(0.0, -400.0)
        }
    }

    fn scripted(ranks: &[usize]) -> Board<Scripted> {
        Board::with_settings(&Settings::default(), Scripted::new(ranks))
    }

    /// Offset that maps to world x
    fn offset_of(board: &Board<impl Dice>, world_x: f32) -> f32 {
        let l = board.layout();
        l.x_canvas_to_offset(l.x_world_to_canvas(world_x))
    }

    #[test]
    fn test_new_board() {
        let board = Board::new(1);
        assert_eq!(board.queue().len(), QUEUE_LEN);
        assert!(board.queue().iter().all(|&r| r < 3));
        assert_eq!(board.status(), GameStatus::Playable);
        assert_eq!(board.cursor(), 210.0);
        assert!(board.world().balls().is_empty());
    }

    #[test]
    fn test_click_pops_and_refills_queue() {
        let mut board = scripted(&[0, 1, 2, 0, 1, 2, 2]);
        assert_eq!(board.queue().iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 0, 1]);

        let x = offset_of(&board, 100.0);
        assert!(board.click(x));
        assert_eq!(board.world().balls().len(), 1);
        assert_eq!(board.world().balls()[0].rank, 0);
        assert_eq!(board.queue().iter().copied().collect::<Vec<_>>(), vec![1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_click_on_occupied_position_fails() {
        let mut board = scripted(&[0]);
        let x = offset_of(&board, 200.0);
        assert!(board.click(x));

        let queue_before = board.queue().clone();
        assert!(!board.click(x));
        assert_eq!(board.queue(), &queue_before);
        assert_eq!(board.world().balls().len(), 1);
    }

    #[test]
    fn test_point_clamps_cursor_for_head_rank() {
        let mut board = scripted(&[2]);
        board.point(0.0);
        assert_eq!(board.cursor(), 25.0);
        board.point(10_000.0);
        assert_eq!(board.cursor(), 395.0);
        assert_eq!(board.cursor_canvas(), board.layout().x_world_to_canvas(395.0));
    }

    #[test]
    fn test_tick_scans_available_positions() {
        let mut board = scripted(&[0]);
        board.tick(0.0);
        let full = board.available().len();
        assert!(full > 0);
        assert_eq!(board.status(), GameStatus::Playable);

        assert!(board.click(offset_of(&board, 210.0)));
        board.tick(0.0);
        assert!(board.available().len() < full);
        assert!(
            !board
                .available()
                .contains(&(offset_of(&board, 210.0).round() as i32))
        );
    }

    #[test]
    fn test_instability_infinite_when_count_changes() {
        let mut board = scripted(&[0]);
        board.tick(0.0);
        assert_eq!(board.instability(), 0.0);

        assert!(board.click(offset_of(&board, 100.0)));
        board.tick(1.0 / 60.0);
        assert!(board.instability().is_infinite());

        board.tick(1.0 / 60.0);
        assert!(board.instability().is_finite());
        assert!(board.instability() > 0.0);
    }

    #[test]
    fn test_zero_dt_tick_is_idempotent() {
        let mut board = scripted(&[1]);
        board.world_mut().insert(Ball::new(Vec2::new(100.0, 455.0), 0).unwrap());
        board.world_mut().insert(Ball::new(Vec2::new(300.0, 440.0), 3).unwrap());
        board.tick(0.0);

        let balls = board.world().balls().to_vec();
        let available = board.available().to_vec();
        let status = board.status();
        board.tick(0.0);
        assert_eq!(board.world().balls(), &balls[..]);
        assert_eq!(board.available(), &available[..]);
        assert_eq!(board.status(), status);
        assert_eq!(board.instability(), 0.0);
    }

    #[test]
    fn test_lost_when_jammed_and_settled() {
        let mut board = scripted(&[0]);
        // A row of top-rank balls hovering at the drop line blocks every spot
        for x in [120.0, 300.0] {
            board
                .world_mut()
                .insert(Ball::new(Vec2::new(x, -15.0), RANK_COUNT - 1).unwrap());
        }
        board.tick(0.0);
        board.tick(0.0);
        assert!(board.available().is_empty());
        assert_eq!(board.status(), GameStatus::Lost);

        assert!(board.shake());
        assert_eq!(board.status(), GameStatus::Unstable);
        assert!(board.world().balls().iter().all(|b| b.vel.y == -400.0));
    }

    #[test]
    fn test_won_then_shake_ignored() {
        let mut board = scripted(&[0]);
        let top = RANK_COUNT - 2;
        board.world_mut().insert(Ball::new(Vec2::new(170.0, 300.0), top).unwrap());
        board.world_mut().insert(Ball::new(Vec2::new(250.0, 300.0), top).unwrap());
        board.tick(1.0 / 60.0);
        assert!(board.world().win());
        assert_eq!(board.status(), GameStatus::Winning);

        for _ in 0..600 {
            board.tick(1.0 / 60.0);
        }
        assert_eq!(board.status(), GameStatus::Won);
        assert!(!board.shake());
        assert_eq!(board.status(), GameStatus::Won);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut board = Board::new(3);
        assert!(board.click(offset_of(&board, 150.0)));
        board.tick(1.0 / 60.0);
        let snap = board.snapshot();
        assert_eq!(snap.balls.len(), 1);
        assert!(snap.instability.is_none());
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"status\":\"PLAYABLE\""));
    }
}
