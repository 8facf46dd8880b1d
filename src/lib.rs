//! TUI Snake (workspace facade crate).
//!
//! Re-exports the member crates as `tui_snake::{core,input,term,types}` and
//! hosts the pieces only the binary needs: launch options and file logging.

pub mod logging;
pub mod options;

pub use tui_snake_core as core;
pub use tui_snake_input as input;
pub use tui_snake_term as term;
pub use tui_snake_types as types;
