//! Coordinate mapping between input offsets, canvas pixels and world units
//!
//! Three spaces are in play:
//! - offset: raw pointer coordinates on the (possibly CSS-scaled) surface
//! - canvas: render surface pixels
//! - world: simulation units, box spans `0..world_width` × `..world_height`
//!
//! The box is centered horizontally with equal left/bottom margins.

use serde::{Deserialize, Serialize};

use crate::consts::BOX_WIDTH_FRACTION;
use crate::sim::ranks;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Displayed size of the canvas (pointer offsets are in this space)
    pub client_width: f32,
    pub client_height: f32,
    pub box_left: f32,
    pub box_width: f32,
    pub box_bottom: f32,
    pub box_height: f32,
    pub world_width: f32,
    pub world_height: f32,
}

impl Layout {
    pub fn new(canvas_width: f32, canvas_height: f32, world_width: f32, world_height: f32) -> Self {
        let box_width = canvas_width * BOX_WIDTH_FRACTION;
        let box_left = (canvas_width - box_width) / 2.0;
        Self {
            canvas_width,
            canvas_height,
            client_width: canvas_width,
            client_height: canvas_height,
            box_left,
            box_width,
            box_bottom: canvas_height - box_left,
            box_height: box_width * world_height / world_width,
            world_width,
            world_height,
        }
    }

    /// Update the displayed surface size (CSS scaling)
    pub fn resize_client(&mut self, width: f32, height: f32) {
        self.client_width = width;
        self.client_height = height;
    }

    /// Canvas y of the top edge of the box
    #[inline]
    pub fn box_top(&self) -> f32 {
        self.box_bottom - self.box_height
    }

    #[inline]
    pub fn x_offset_to_canvas(&self, x: f32) -> f32 {
        x * self.canvas_width / self.client_width
    }

    #[inline]
    pub fn x_canvas_to_offset(&self, x: f32) -> f32 {
        x * self.client_width / self.canvas_width
    }

    #[inline]
    pub fn y_offset_to_canvas(&self, y: f32) -> f32 {
        y * self.canvas_height / self.client_height
    }

    #[inline]
    pub fn y_canvas_to_offset(&self, y: f32) -> f32 {
        y * self.client_height / self.canvas_height
    }

    #[inline]
    pub fn x_canvas_to_world(&self, x: f32) -> f32 {
        (x - self.box_left) * self.world_width / self.box_width
    }

    #[inline]
    pub fn x_world_to_canvas(&self, x: f32) -> f32 {
        x * self.box_width / self.world_width + self.box_left
    }

    /// World y to canvas y (world `height` maps to the box bottom)
    #[inline]
    pub fn y_world_to_canvas(&self, y: f32) -> f32 {
        (y - self.world_height) * self.box_height / self.world_height + self.box_bottom
    }

    /// World length to canvas length
    #[inline]
    pub fn s_world_to_canvas(&self, s: f32) -> f32 {
        s * self.box_width / self.world_width
    }

    /// Keep a ball of `rank` fully inside the box horizontally
    pub fn x_world_clamp(&self, x: f32, rank: usize) -> f32 {
        let radius = ranks::spec(rank).map_or(0.0, |spec| spec.radius);
        x.min(self.world_width - radius).max(radius)
    }

    /// Offset x straight to a clamped world x
    pub fn offset_to_world_x(&self, x: f32, rank: usize) -> f32 {
        self.x_world_clamp(self.x_canvas_to_world(self.x_offset_to_canvas(x)), rank)
    }
}
