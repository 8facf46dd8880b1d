//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and instead renders a [`GameSnapshot`] into a
//! plain framebuffer that is flushed to the terminal as a diff.
//!
//! Goals:
//! - Keep `core` free of drawing concerns
//! - Reuse one framebuffer per frame instead of allocating
//! - Control the aspect ratio (2 columns per playfield cell)
//!
//! [`GameSnapshot`]: crate::core::GameSnapshot

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport, PANEL_WIDTH};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
