//! Simulation world: balls in a box
//!
//! Coordinates: x grows right, y grows down. The box spans `0..width`
//! horizontally and ends at `y = height`. There is no ceiling; balls are
//! dropped from above `y = 0`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{collide_inelastic, collide_inelastic_immovable, push_away};
use super::ranks::{self, RankSpec};
use super::vector::{distance, midpoint, unit};

/// Physics coefficients of a world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Box width in simulation units
    pub width: f32,
    /// Box height in simulation units
    pub height: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Quadratic drag coefficient (scaled by radius²)
    pub drag: f32,
    /// Restitution between two balls
    pub ball_restitution: f32,
    /// Restitution against the walls and floor
    pub wall_restitution: f32,
    /// Scale applied to the velocity of a freshly fused ball
    pub fusion_factor: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 420.0,
            height: 470.0,
            gravity: 981.0,
            drag: 1e-10,
            ball_restitution: 0.2,
            wall_restitution: 0.5,
            fusion_factor: 0.8,
        }
    }
}

/// A ball in the box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub rank: usize,
    /// 0xRRGGBB, from the rank table
    pub color: u32,
}

impl Ball {
    /// Create a resting ball of the given rank at `pos`.
    ///
    /// Returns `None` if the rank is outside the rank table.
    pub fn new(pos: Vec2, rank: usize) -> Option<Self> {
        ranks::spec(rank).map(|spec| Self::from_spec(pos, Vec2::ZERO, rank, spec))
    }

    fn from_spec(pos: Vec2, vel: Vec2, rank: usize, spec: &RankSpec) -> Self {
        Self {
            pos,
            vel,
            radius: spec.radius,
            mass: spec.mass(),
            rank,
            color: spec.color,
        }
    }

    /// True if the two circles intersect
    #[inline]
    pub fn overlaps(&self, other: &Ball) -> bool {
        distance(self.pos, other.pos) < self.radius + other.radius
    }

    /// Fuse two equal-rank balls into one of the next rank.
    ///
    /// The new ball sits at the midpoint and moves along the summed velocity
    /// with a speed of `sqrt(m_a * (|v_a|² + |v_b|²) / m_new) * fusion_factor`.
    /// A zero velocity sum yields a NaN direction (unguarded).
    fn fuse(a: &Ball, b: &Ball, fusion_factor: f32) -> Option<Ball> {
        let rank = a.rank + 1;
        let spec = ranks::spec(rank)?;
        let speed = (a.mass * (a.vel.length_squared() + b.vel.length_squared()) / spec.mass()).sqrt()
            * fusion_factor;
        let vel = unit(a.vel + b.vel) * speed;
        Some(Self::from_spec(midpoint(a.pos, b.pos), vel, rank, spec))
    }
}

/// The box, its balls and the win flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    config: WorldConfig,
    balls: Vec<Ball>,
    /// Set once a merge produces the top rank; never cleared
    win: bool,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world with default coefficients
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            config,
            balls: Vec::new(),
            win: false,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Mutable access to existing balls (count cannot change)
    pub fn balls_mut(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    pub fn win(&self) -> bool {
        self.win
    }

    pub fn width(&self) -> f32 {
        self.config.width
    }

    pub fn height(&self) -> f32 {
        self.config.height
    }

    /// Place a ball directly (no overlap check)
    pub fn insert(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    /// Would a ball of `rank` released at `(x, -radius)` be clear of every
    /// existing ball? Out-of-range ranks are never available.
    pub fn available(&self, x: f32, rank: usize) -> bool {
        let Some(spec) = ranks::spec(rank) else {
            return false;
        };
        let pos = Vec2::new(x, -spec.radius);
        self.balls
            .iter()
            .all(|ball| distance(pos, ball.pos) >= spec.radius + ball.radius)
    }

    /// Release a resting ball of `rank` at `(x, -radius)`.
    ///
    /// No overlap check here; call [`World::available`] first.
    pub fn drop(&mut self, x: f32, rank: usize) {
        let Some(spec) = ranks::spec(rank) else {
            log::warn!("Ignoring drop of unknown rank {}", rank);
            return;
        };
        let ball = Ball::from_spec(Vec2::new(x, -spec.radius), Vec2::ZERO, rank, spec);
        log::debug!("Drop rank {} at x={:.1}", rank, x);
        self.balls.push(ball);
    }

    /// Advance the world by exactly `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.integrate(dt);
        self.resolve_contacts();
        self.clamp_to_walls();
    }

    /// Explicit Euler: gravity plus crude quadratic drag
    fn integrate(&mut self, dt: f32) {
        let WorldConfig { gravity, drag, .. } = self.config;
        for ball in &mut self.balls {
            let mut force = Vec2::new(0.0, gravity);
            force += ball.vel * (-ball.radius * ball.radius * ball.vel.length_squared() * drag);
            ball.vel += force * dt;
            ball.pos += ball.vel * dt;
        }
    }

    /// Pairwise pass in ascending index order.
    ///
    /// Merges are recorded (removal set + pending spawns) and applied after
    /// the pass, so the list is never resized while it is being walked. A
    /// ball merges at most once per step and fresh spawns are not revisited.
    fn resolve_contacts(&mut self) {
        let n = self.balls.len();
        let mut removed = vec![false; n];
        let mut spawned = Vec::new();

        for i in 0..n {
            for j in (i + 1)..n {
                if removed[i] {
                    break;
                }
                if removed[j] {
                    continue;
                }

                let (head, tail) = self.balls.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if !a.overlaps(b) {
                    continue;
                }

                if a.rank == b.rank && ranks::can_merge(a.rank) {
                    if let Some(fused) = Ball::fuse(a, b, self.config.fusion_factor) {
                        removed[i] = true;
                        removed[j] = true;
                        log::debug!("Merged two rank {} balls into rank {}", a.rank, fused.rank);
                        if ranks::is_winning(fused.rank) && !self.win {
                            log::info!("Top rank reached");
                            self.win = true;
                        }
                        spawned.push(fused);
                    }
                    continue;
                }

                (a.pos, b.pos) = push_away(a.pos, b.pos, a.radius, b.radius);
                (a.vel, b.vel) = collide_inelastic(
                    a.pos,
                    b.pos,
                    a.vel,
                    b.vel,
                    a.mass,
                    b.mass,
                    self.config.ball_restitution,
                );
            }
        }

        if spawned.is_empty() {
            return;
        }
        let mut index = 0;
        self.balls.retain(|_| {
            let keep = !removed[index];
            index += 1;
            keep
        });
        self.balls.extend(spawned);
    }

    /// Clamp into the box (left, right, floor) with an inelastic bounce
    fn clamp_to_walls(&mut self) {
        let WorldConfig {
            width,
            height,
            wall_restitution: cr,
            ..
        } = self.config;
        for ball in &mut self.balls {
            if ball.pos.x < ball.radius {
                ball.pos.x = ball.radius;
                let wall = Vec2::new(0.0, ball.pos.y);
                ball.vel = collide_inelastic_immovable(ball.pos, wall, ball.vel, Vec2::ZERO, cr);
            }
            if ball.pos.x > width - ball.radius {
                ball.pos.x = width - ball.radius;
                let wall = Vec2::new(width, ball.pos.y);
                ball.vel = collide_inelastic_immovable(ball.pos, wall, ball.vel, Vec2::ZERO, cr);
            }
            if ball.pos.y > height - ball.radius {
                ball.pos.y = height - ball.radius;
                let wall = Vec2::new(ball.pos.x, height);
                ball.vel = collide_inelastic_immovable(ball.pos, wall, ball.vel, Vec2::ZERO, cr);
            }
        }
    }
}
