//! Food module - the single active food item and free-cell search

use crate::config::Playfield;
use crate::rng::SimpleRng;
use crate::types::GridPos;

/// Random attempts before falling back to a full scan of the grid
const SPAWN_RETRIES: usize = 64;

/// Find a cell that is not `occupied`, at least `border` cells from every edge.
///
/// Tries random cells first, then scans the grid row by row starting from a
/// random offset. Returns `None` only when every eligible cell is occupied.
pub fn find_free_cell(
    playfield: &Playfield,
    rng: &mut SimpleRng,
    border: i32,
    occupied: impl Fn(GridPos) -> bool,
) -> Option<GridPos> {
    for _ in 0..SPAWN_RETRIES {
        let pos = rng.next_cell(playfield, border);
        if !occupied(pos) {
            return Some(pos);
        }
    }

    let cols = (playfield.cols as i32 - 2 * border).max(1) as u64;
    let rows = (playfield.rows as i32 - 2 * border).max(1) as u64;
    let total = cols * rows;
    let offset = rng.next_range(u32::try_from(total).unwrap_or(u32::MAX)) as u64;
    (0..total)
        .map(|i| {
            let idx = (offset + i) % total;
            playfield.position_of(border + (idx % cols) as i32, border + (idx / cols) as i32)
        })
        .find(|&pos| !occupied(pos))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: GridPos,
}

impl Food {
    pub fn new(position: GridPos) -> Self {
        Self { position }
    }

    /// Place food on a random free cell
    pub fn spawn(
        playfield: &Playfield,
        rng: &mut SimpleRng,
        occupied: impl Fn(GridPos) -> bool,
    ) -> Self {
        let mut food = Self::new(GridPos::default());
        food.respawn(playfield, rng, occupied);
        food
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    /// Move to a new random cell that is not occupied.
    ///
    /// On a completely full grid the food stays where it is.
    pub fn respawn(
        &mut self,
        playfield: &Playfield,
        rng: &mut SimpleRng,
        occupied: impl Fn(GridPos) -> bool,
    ) {
        if let Some(pos) = find_free_cell(playfield, rng, 0, occupied) {
            self.position = pos;
        }
    }
}
