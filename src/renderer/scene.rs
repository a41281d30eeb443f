//! Draw lists for the render collaborator
//!
//! Everything is in canvas pixels. A host backend (canvas 2D, GPU, terminal)
//! walks the commands in order and paints them.

use glam::Vec2;

use crate::board::{Board, Dice};
use crate::consts::DROP_ZONE_MIN_Y;
use crate::game::{BUTTONS, Game};
use crate::sim::ranks::{self, rgba};

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.118, 0.565, 1.0, 1.0]; // #1E90FF
    pub const BOX: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GUIDE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const DROP_BAND: [f32; 4] = [1.0, 1.0, 1.0, 0.25];
    pub const MARKER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Queue previews are drawn slightly transparent
    pub const PREVIEW_ALPHA: f32 = 0.75;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        pos: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Centered text
    Text {
        pos: Vec2,
        text: String,
        color: [f32; 4],
    },
    /// Dashed horizontal line
    DashedLine {
        y: f32,
        from_x: f32,
        to_x: f32,
        dash: f32,
        color: [f32; 4],
    },
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        self.commands.push(DrawCommand::Rect {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, pos: Vec2, text: impl Into<String>) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.into(),
            color: colors::TEXT,
        });
    }

    pub fn circles(&self) -> impl Iterator<Item = (&Vec2, &f32)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle { center, radius, .. } => Some((center, radius)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Board scene: box, balls with labels, cursor guide, queue preview and
/// free-position markers
pub fn build<D: Dice>(board: &Board<D>) -> Scene {
    let l = board.layout();
    let world = board.world();
    let top = l.box_top();
    let mut scene = Scene::default();

    scene.rect(0.0, 0.0, l.canvas_width, l.canvas_height, colors::BACKGROUND);
    scene.rect(l.box_left, top, l.box_width, l.box_height, colors::BOX);

    for ball in world.balls() {
        let center = Vec2::new(l.x_world_to_canvas(ball.pos.x), l.y_world_to_canvas(ball.pos.y));
        scene.circle(center, l.s_world_to_canvas(ball.radius), rgba(ball.color, 1.0));
    }
    for ball in world.balls() {
        let center = Vec2::new(l.x_world_to_canvas(ball.pos.x), l.y_world_to_canvas(ball.pos.y));
        scene.text(center, ranks::label(ball.rank));
    }

    if board.status().accepts_input() {
        let cx = board.cursor_canvas();
        if let Some(head) = board.queue().front().and_then(|&r| ranks::spec(r)) {
            let cr = l.s_world_to_canvas(head.radius);
            scene.rect(cx, top, 1.0, l.box_height, colors::GUIDE);
            scene.rect(cx - cr, top, 2.0 * cr, l.box_height, colors::DROP_BAND);
        }

        // Queue stacks upward from the box top, head first
        let mut cy = l.y_world_to_canvas(0.0);
        for &rank in board.queue() {
            let Some(spec) = ranks::spec(rank) else {
                continue;
            };
            let cr = l.s_world_to_canvas(spec.radius);
            let center = Vec2::new(cx, cy - cr);
            scene.circle(center, cr, rgba(spec.color, colors::PREVIEW_ALPHA));
            scene.text(center, ranks::label(rank));
            cy -= 2.0 * cr;
        }
    }

    for &x in board.available() {
        scene.rect(l.x_offset_to_canvas(x as f32), top - 1.0, 1.0, 1.0, colors::MARKER);
    }

    scene
}

/// Full frame: board scene plus drop-zone line, buttons and status banner
pub fn build_game(game: &Game) -> Scene {
    let board = game.board();
    let l = board.layout();
    let mut scene = build(board);

    scene.commands.push(DrawCommand::DashedLine {
        y: DROP_ZONE_MIN_Y,
        from_x: 0.0,
        to_x: l.canvas_width,
        dash: 20.0,
        color: colors::TEXT,
    });
    for button in &BUTTONS {
        scene.rect(button.x, button.y, button.width, button.height, rgba(button.color, 1.0));
        scene.text(
            Vec2::new(button.x + button.width / 2.0, button.y + button.height / 2.0),
            button.label,
        );
    }
    if let Some(banner) = game.banner() {
        scene.text(Vec2::new(l.canvas_width / 2.0, 120.0), banner);
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::QUEUE_LEN;
    use crate::settings::Settings;

    #[test]
    fn test_empty_board_scene() {
        let mut board = Board::new(5);
        board.tick(0.0);
        let scene = build(&board);

        // Only the queue preview is drawn as circles
        assert_eq!(scene.circles().count(), QUEUE_LEN);
        assert!(matches!(
            &scene.commands[0],
            DrawCommand::Rect { color, .. } if *color == colors::BACKGROUND
        ));
        let markers = scene
            .commands
            .iter()
            .filter(|c| {
                matches!(c, DrawCommand::Rect { color, size, .. }
                    if *color == colors::MARKER && size.x == 1.0 && size.y == 1.0)
            })
            .count();
        assert_eq!(markers, board.available().len());
    }

    #[test]
    fn test_ball_label_is_one_based() {
        let mut board = Board::new(5);
        board.world_mut().insert(crate::sim::Ball::new(Vec2::new(210.0, 300.0), 4).unwrap());
        let scene = build(&board);
        assert!(scene.texts().any(|t| t == "5"));

        let l = board.layout();
        let (center, radius) = scene.circles().next().unwrap();
        assert_eq!(center.x, l.x_world_to_canvas(210.0));
        assert_eq!(*radius, l.s_world_to_canvas(35.0));
    }

    #[test]
    fn test_game_scene_has_buttons_and_banner() {
        let mut game = Game::new(Settings::default(), 9);
        game.frame(0.0);
        let scene = build_game(&game);
        let texts: Vec<&str> = scene.texts().collect();
        assert!(texts.contains(&"Restart"));
        assert!(texts.contains(&"Shake"));
        assert!(!texts.iter().any(|t| t.starts_with("You")));
    }
}
