//! Simulation module
//!
//! All physics and merge logic lives here. This module must stay pure:
//! - Caller-driven time steps only
//! - No randomness (the board injects it)
//! - Stable iteration order within a step
//! - No rendering or platform dependencies

pub mod collision;
pub mod ranks;
pub mod vector;
pub mod world;

pub use collision::{collide_elastic, collide_inelastic, collide_inelastic_immovable, push_away};
pub use ranks::{RANK_COUNT, RANKS, RankSpec};
pub use vector::{distance, midpoint, unit};
pub use world::{Ball, World, WorldConfig};
