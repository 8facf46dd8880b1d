//! Difficulty module - fixed rule presets per difficulty level
//!
//! | Level | Speed (start/max/step) | Bombs | Walls | Score |
//! |-------|------------------------|-------|-------|-------|
//! | Easy | 6 / 15 / +1 | off | wrap around | x0.5 |
//! | Medium | 10 / 25 / +2 | on | lethal | x1.0 |
//! | Hard | 15 / 35 / +3 | on | lethal | x2.0 |
//!
//! Settings are read when a run is reset and never change during a run.

use crate::types::DifficultyLevel;

/// Rule parameters for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    /// Starting speed in ticks per second
    pub initial_speed: u32,
    pub max_speed: u32,
    /// Speed gained per food item
    pub speed_increment: u32,
    pub bombs_enabled: bool,
    /// Leaving the field re-enters from the opposite edge instead of crashing
    pub wall_wrap_enabled: bool,
    /// Permanent multiplier applied to every food item
    pub score_multiplier: f64,
}

pub const EASY: DifficultySettings = DifficultySettings {
    initial_speed: 6,
    max_speed: 15,
    speed_increment: 1,
    bombs_enabled: false,
    wall_wrap_enabled: true,
    score_multiplier: 0.5,
};

pub const MEDIUM: DifficultySettings = DifficultySettings {
    initial_speed: 10,
    max_speed: 25,
    speed_increment: 2,
    bombs_enabled: true,
    wall_wrap_enabled: false,
    score_multiplier: 1.0,
};

pub const HARD: DifficultySettings = DifficultySettings {
    initial_speed: 15,
    max_speed: 35,
    speed_increment: 3,
    bombs_enabled: true,
    wall_wrap_enabled: false,
    score_multiplier: 2.0,
};

/// Look up the preset for a level
pub fn settings_for(level: DifficultyLevel) -> DifficultySettings {
    match level {
        DifficultyLevel::Easy => EASY,
        DifficultyLevel::Medium => MEDIUM,
        DifficultyLevel::Hard => HARD,
    }
}

impl DifficultySettings {
    pub fn for_level(level: DifficultyLevel) -> Self {
        settings_for(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let easy = settings_for(DifficultyLevel::Easy);
        assert!(easy.wall_wrap_enabled);
        assert!(!easy.bombs_enabled);
        assert_eq!(easy.score_multiplier, 0.5);

        let medium = settings_for(DifficultyLevel::Medium);
        assert_eq!(
            (medium.initial_speed, medium.max_speed, medium.speed_increment),
            (10, 25, 2)
        );
        assert!(!medium.wall_wrap_enabled);

        let hard = settings_for(DifficultyLevel::Hard);
        assert_eq!(hard.initial_speed, 15);
        assert_eq!(hard.score_multiplier, 2.0);
    }

    #[test]
    fn test_speed_bounds_are_consistent() {
        for level in DifficultyLevel::ALL {
            let s = settings_for(level);
            assert!(s.initial_speed <= s.max_speed, "{:?}", level);
            assert!(s.speed_increment > 0);
        }
    }
}
