//! Rendering support
//!
//! Renderer-agnostic draw lists; the host owns the actual surface.

pub mod scene;

pub use scene::{DrawCommand, Scene, build, build_game};
