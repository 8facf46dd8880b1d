//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and buffers them
//! between simulation ticks, dropping repeats of a command that is already
//! pending.

pub mod map;
pub mod queue;

pub use tui_snake_types as types;

pub use map::{handle_key_event, should_quit};
pub use queue::CommandQueue;
