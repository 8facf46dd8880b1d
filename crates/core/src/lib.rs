//! Core game logic module - pure and testable
//!
//! This crate contains all the game rules, state management and simulation
//! logic. It has **no dependencies** on terminal rendering, audio or real
//! clocks: time arrives as explicit millisecond values, so every rule can be
//! exercised from plain unit tests.
//!
//! # Module Structure
//!
//! - [`config`]: playfield size, starting difficulty and RNG seed
//! - [`difficulty`]: the three fixed rule presets
//! - [`snake`]: body, steering, growth, collision checks and expressions
//! - [`food`]: food placement and the free-cell search shared with power-ups
//! - [`powerups`]: power-up spawning, collection and timed effects
//! - [`bombs`]: placement allowance, countdown, blast window, replenishment
//! - [`game_state`]: phase machine and per-tick orchestration
//! - [`snapshot`]: read-only view for renderers
//! - [`events`]: per-tick event buffer and [`EventSink`]
//!
//! # Example
//!
//! ```
//! use tui_snake_core::{GameConfig, GameState};
//! use tui_snake_types::{Command, GamePhase};
//!
//! let mut game = GameState::new(GameConfig::default().with_seed(7));
//! assert_eq!(game.phase(), GamePhase::Menu);
//!
//! game.apply_command(Command::StartGame);
//! game.apply_command(Command::MoveDown);
//! game.tick(game.tick_interval_ms());
//!
//! assert_eq!(game.snake().head().cell(25), (4, 5));
//! ```
//!
//! # Timing
//!
//! The caller owns the loop. Sleep for [`GameState::tick_interval_ms`] (one
//! tick per speed unit per second while running, 60 Hz otherwise), then call
//! [`GameState::tick`] with the milliseconds that actually elapsed.

pub mod bombs;
pub mod config;
pub mod difficulty;
pub mod events;
pub mod food;
pub mod game_state;
pub mod powerups;
pub mod rng;
pub mod snake;
pub mod snapshot;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use bombs::{Bomb, BombSystem, BombUpdate};
pub use config::{GameConfig, Playfield};
pub use difficulty::{settings_for, DifficultySettings};
pub use events::{EventBuffer, EventSink, NullSink};
pub use food::Food;
pub use game_state::{award_points, transition, GameState, Transition, TransitionAction};
pub use powerups::{ActiveEffect, Modifiers, PowerUp, PowerUpSystem};
pub use rng::SimpleRng;
pub use snake::Snake;
pub use snapshot::{BombSnapshot, EffectSnapshot, GameSnapshot, PowerUpSnapshot};
