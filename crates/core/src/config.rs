//! Run configuration passed into [`GameState::new`](crate::GameState::new).
//!
//! Nothing in the simulation reads process-wide settings. The playfield size,
//! the starting difficulty and the RNG seed travel as one immutable value.

use crate::types::{
    DifficultyLevel, GridPos, CELL_SIZE, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS,
    SNAKE_INITIAL_LENGTH, SNAKE_START_CELL,
};

/// Smallest playfield that still fits the starting snake and the power-up border.
pub const MIN_GRID_COLS: u16 = 12;
pub const MIN_GRID_ROWS: u16 = 10;

/// Playfield dimensions in cells plus the pixel size of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Playfield {
    pub cols: u16,
    pub rows: u16,
    pub cell_size: i32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS)
    }
}

impl Playfield {
    /// Create a playfield, clamped to the minimum size.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(MIN_GRID_COLS),
            rows: rows.max(MIN_GRID_ROWS),
            cell_size: CELL_SIZE,
        }
    }

    pub fn width_px(&self) -> i32 {
        self.cols as i32 * self.cell_size
    }

    pub fn height_px(&self) -> i32 {
        self.rows as i32 * self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Pixel position of cell `(col, row)`
    pub fn position_of(&self, col: i32, row: i32) -> GridPos {
        GridPos::new(col * self.cell_size, row * self.cell_size)
    }

    /// True iff `pos` lies in `[0, width) x [0, height)`
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width_px() && pos.y >= 0 && pos.y < self.height_px()
    }

    /// Map a position back into the field, entering from the opposite edge.
    pub fn wrap(&self, pos: GridPos) -> GridPos {
        GridPos::new(
            pos.x.rem_euclid(self.width_px()),
            pos.y.rem_euclid(self.height_px()),
        )
    }
}

/// Everything a run needs to know up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub playfield: Playfield,
    /// Difficulty selected when the state machine is created
    pub difficulty: DifficultyLevel,
    pub seed: u32,
    pub initial_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            difficulty: DifficultyLevel::default(),
            seed: 1,
            initial_length: SNAKE_INITIAL_LENGTH,
        }
    }
}

impl GameConfig {
    pub fn with_difficulty(mut self, difficulty: DifficultyLevel) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_playfield(mut self, playfield: Playfield) -> Self {
        self.playfield = playfield;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Where the head sits when a run starts
    pub fn start_position(&self) -> GridPos {
        self.playfield
            .position_of(SNAKE_START_CELL.0, SNAKE_START_CELL.1)
    }
}
