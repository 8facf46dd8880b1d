use crate::bombs::Bomb;
use crate::config::Playfield;
use crate::powerups::{ActiveEffect, PowerUp};
use crate::types::{
    DifficultyLevel, Direction, Expression, GameEvent, GamePhase, GridPos, PowerUpKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BombSnapshot {
    pub position: GridPos,
    pub radius: i32,
    pub exploded: bool,
    pub countdown: u32,
    pub explosion_timer: u32,
}

impl From<&Bomb> for BombSnapshot {
    fn from(value: &Bomb) -> Self {
        Self {
            position: value.position,
            radius: value.explosion_radius,
            exploded: value.exploded,
            countdown: value.countdown,
            explosion_timer: value.explosion_timer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowerUpSnapshot {
    pub position: GridPos,
    pub kind: PowerUpKind,
    /// Time left before the power-up vanishes
    pub remaining_ms: u64,
}

impl PowerUpSnapshot {
    pub fn new(powerup: &PowerUp, now_ms: u64) -> Self {
        Self {
            position: powerup.position,
            kind: powerup.kind,
            remaining_ms: powerup.remaining_ms(now_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectSnapshot {
    pub kind: PowerUpKind,
    pub remaining_ms: u64,
}

impl EffectSnapshot {
    pub fn new(effect: &ActiveEffect, now_ms: u64) -> Self {
        Self {
            kind: effect.kind(),
            remaining_ms: effect.remaining_ms(now_ms),
        }
    }
}

/// Immutable per-tick view handed to renderers.
///
/// The `Vec` fields are cleared and refilled by
/// [`GameState::snapshot_into`](crate::GameState::snapshot_into), so keeping
/// one snapshot around avoids reallocating every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    /// Difficulty of the current run
    pub difficulty: DifficultyLevel,
    /// Difficulty the next run will use
    pub selected_difficulty: DifficultyLevel,
    pub playfield: Playfield,
    /// Head first
    pub snake: Vec<GridPos>,
    pub direction: Direction,
    pub expression: Expression,
    pub food: GridPos,
    pub bombs: Vec<BombSnapshot>,
    pub powerups: Vec<PowerUpSnapshot>,
    pub effects: Vec<EffectSnapshot>,
    pub score: u32,
    pub speed: u32,
    pub combo: u32,
    pub bombs_available: u32,
    pub bombs_max: u32,
    pub bomb_cooldown: u32,
    pub shield_active: bool,
    pub score_multiplier: f64,
    pub run_id: u32,
    pub tick: u64,
    /// Most recent event worth showing in a status line
    pub last_event: Option<GameEvent>,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: GamePhase::Menu,
            difficulty: DifficultyLevel::default(),
            selected_difficulty: DifficultyLevel::default(),
            playfield: Playfield::default(),
            snake: Vec::new(),
            direction: Direction::Right,
            expression: Expression::Normal,
            food: GridPos::default(),
            bombs: Vec::new(),
            powerups: Vec::new(),
            effects: Vec::new(),
            score: 0,
            speed: 0,
            combo: 0,
            bombs_available: 0,
            bombs_max: 0,
            bomb_cooldown: 0,
            shield_active: false,
            score_multiplier: 1.0,
            run_id: 0,
            tick: 0,
            last_event: None,
        }
    }
}

impl GameSnapshot {
    pub fn head(&self) -> Option<GridPos> {
        self.snake.first().copied()
    }

    pub fn effect_remaining_ms(&self, kind: PowerUpKind) -> Option<u64> {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining_ms)
    }
}
