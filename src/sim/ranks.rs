//! Rank table
//!
//! Index = rank. Merging two balls of rank `r` yields rank `r + 1`, up to the
//! last entry, which is only ever reached (producing it wins the game).

use serde::{Deserialize, Serialize};

/// Radius and display color of one rank
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankSpec {
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl RankSpec {
    const fn new(radius: f32, color: u32) -> Self {
        Self { radius, color }
    }

    /// Mass is radius squared (area without the constant)
    #[inline]
    pub fn mass(&self) -> f32 {
        self.radius * self.radius
    }
}

pub const RANKS: [RankSpec; 9] = [
    RankSpec::new(15.0, 0xD38342),
    RankSpec::new(20.0, 0xB26741),
    RankSpec::new(25.0, 0xA6805C),
    RankSpec::new(30.0, 0x36CFA6),
    RankSpec::new(35.0, 0xFEA392),
    RankSpec::new(45.0, 0xCADCB8),
    RankSpec::new(65.0, 0x3DEC0F),
    RankSpec::new(95.0, 0x5FE5DA),
    RankSpec::new(120.0, 0xE0CB1D),
];

/// Number of ranks (the merge ceiling)
pub const RANK_COUNT: usize = RANKS.len();

/// Rank table entry, `None` when out of range
#[inline]
pub fn spec(rank: usize) -> Option<&'static RankSpec> {
    RANKS.get(rank)
}

/// True if two balls of this rank fuse on contact
#[inline]
pub fn can_merge(rank: usize) -> bool {
    rank + 1 < RANK_COUNT
}

/// True if producing this rank ends the game in a win
#[inline]
pub fn is_winning(rank: usize) -> bool {
    rank + 1 == RANK_COUNT
}

/// Player-facing label (ranks are shown 1-based)
#[inline]
pub fn label(rank: usize) -> String {
    (rank + 1).to_string()
}

/// Split a 0xRRGGBB color into normalized RGBA
pub fn rgba(color: u32, alpha: f32) -> [f32; 4] {
    [
        ((color >> 16) & 0xFF) as f32 / 255.0,
        ((color >> 8) & 0xFF) as f32 / 255.0,
        (color & 0xFF) as f32 / 255.0,
        alpha,
    ]
}
