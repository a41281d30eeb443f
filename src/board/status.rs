//! Game status, derived fresh every tick

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// At least one drop position is free
    #[default]
    Playable,
    /// No free drop position, but the board is still moving
    Unstable,
    /// Top rank reached, board still moving
    Winning,
    /// Top rank reached and the board has settled
    Won,
    /// No free drop position and the board has settled
    Lost,
}

impl GameStatus {
    /// Pure status derivation from world state.
    ///
    /// `instability` is the summed squared displacement since the last tick
    /// (infinite when the ball count changed).
    pub fn derive(win: bool, available: usize, instability: f32, threshold: f32) -> Self {
        let settled = instability < threshold;
        match (win, available == 0, settled) {
            (true, _, true) => GameStatus::Won,
            (true, _, false) => GameStatus::Winning,
            (false, true, true) => GameStatus::Lost,
            (false, true, false) => GameStatus::Unstable,
            (false, false, _) => GameStatus::Playable,
        }
    }

    /// Pointer input (aim and drop) is accepted
    pub fn accepts_input(&self) -> bool {
        matches!(self, GameStatus::Playable | GameStatus::Unstable)
    }

    /// The simulation is frozen until shaken or restarted
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }

    pub fn is_win(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Winning)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playable => "PLAYABLE",
            GameStatus::Unstable => "UNSTABLE",
            GameStatus::Winning => "WINNING",
            GameStatus::Won => "WON",
            GameStatus::Lost => "LOST",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f32 = 1e-3;

    #[test]
    fn test_derive_table() {
        assert_eq!(GameStatus::derive(true, 0, 0.0, T), GameStatus::Won);
        assert_eq!(GameStatus::derive(true, 10, 0.0, T), GameStatus::Won);
        assert_eq!(GameStatus::derive(true, 10, 1.0, T), GameStatus::Winning);
        assert_eq!(GameStatus::derive(true, 0, f32::INFINITY, T), GameStatus::Winning);
        assert_eq!(GameStatus::derive(false, 0, 0.0, T), GameStatus::Lost);
        assert_eq!(GameStatus::derive(false, 0, 0.5, T), GameStatus::Unstable);
        assert_eq!(GameStatus::derive(false, 3, 0.5, T), GameStatus::Playable);
        assert_eq!(GameStatus::derive(false, 3, 0.0, T), GameStatus::Playable);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(GameStatus::derive(false, 0, T, T), GameStatus::Unstable);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&GameStatus::Winning).unwrap();
        assert_eq!(json, "\"WINNING\"");
        assert_eq!(GameStatus::Lost.as_str(), "LOST");
    }
}
