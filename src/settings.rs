//! Game tunables
//!
//! Physics coefficients, sub-step count and layout, loadable from JSON.
//! Missing fields fall back to the defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, QUEUE_LEN, SETTLE_THRESHOLD, SUB_STEPS};
use crate::sim::WorldConfig;

/// Rejected tunables
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// A size or coefficient that must be strictly positive
    NotPositive(&'static str, f32),
    /// A coefficient that must not be negative
    Negative(&'static str, f32),
    /// Restitution outside `[0, 1]`
    RestitutionOutOfRange(&'static str, f32),
    ZeroSubSteps,
    EmptyQueue,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NotPositive(name, v) => write!(f, "{} must be positive (got {})", name, v),
            SettingsError::Negative(name, v) => write!(f, "{} must not be negative (got {})", name, v),
            SettingsError::RestitutionOutOfRange(name, v) => {
                write!(f, "{} must be within [0, 1] (got {})", name, v)
            }
            SettingsError::ZeroSubSteps => write!(f, "sub_steps must be at least 1"),
            SettingsError::EmptyQueue => write!(f, "queue_len must be at least 1"),
        }
    }
}

impl std::error::Error for SettingsError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// World size and physics coefficients
    pub world: WorldConfig,
    /// Equal sub-steps per external tick
    pub sub_steps: u32,
    /// Length of the upcoming-rank queue
    pub queue_len: usize,
    /// Render surface size
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Instability below this counts as settled
    pub settle_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            sub_steps: SUB_STEPS,
            queue_len: QUEUE_LEN,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            settle_threshold: SETTLE_THRESHOLD,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let w = &self.world;
        for (name, v) in [
            ("world.width", w.width),
            ("world.height", w.height),
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("settle_threshold", self.settle_threshold),
        ] {
            if !(v > 0.0) {
                return Err(SettingsError::NotPositive(name, v));
            }
        }
        for (name, v) in [
            ("world.gravity", w.gravity),
            ("world.drag", w.drag),
            ("world.fusion_factor", w.fusion_factor),
        ] {
            if !(v >= 0.0) {
                return Err(SettingsError::Negative(name, v));
            }
        }
        for (name, v) in [
            ("world.ball_restitution", w.ball_restitution),
            ("world.wall_restitution", w.wall_restitution),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(SettingsError::RestitutionOutOfRange(name, v));
            }
        }
        if self.sub_steps == 0 {
            return Err(SettingsError::ZeroSubSteps);
        }
        if self.queue_len == 0 {
            return Err(SettingsError::EmptyQueue);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "sub_steps": 20, "world": { "gravity": 500.0 } }"#).unwrap();
        assert_eq!(s.sub_steps, 20);
        assert_eq!(s.world.gravity, 500.0);
        assert_eq!(s.world.width, 420.0);
        assert_eq!(s.queue_len, 5);
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings::default();
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ sub_steps: }").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut s = Settings::default();
        s.world.ball_restitution = 1.5;
        assert_eq!(
            s.validate(),
            Err(SettingsError::RestitutionOutOfRange("world.ball_restitution", 1.5))
        );

        let mut s = Settings::default();
        s.sub_steps = 0;
        assert_eq!(s.validate(), Err(SettingsError::ZeroSubSteps));

        let mut s = Settings::default();
        s.world.width = 0.0;
        assert!(matches!(s.validate(), Err(SettingsError::NotPositive("world.width", _))));

        let mut s = Settings::default();
        s.world.drag = -1.0;
        assert_eq!(s.validate().unwrap_err().to_string(), "world.drag must not be negative (got -1)");
    }
}
