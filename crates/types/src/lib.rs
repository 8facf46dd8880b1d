//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core simulation, terminal rendering, input mapping).
//!
//! # Coordinates
//!
//! Positions are expressed in *pixel units* aligned to [`CELL_SIZE`]. A snake
//! segment at cell `(col, row)` sits at `(col * CELL_SIZE, row * CELL_SIZE)`.
//! Keeping pixel units means bomb radii and cell sizes stay in the same space.
//!
//! # Timing Constants
//!
//! Two clocks drive the simulation:
//!
//! | Clock | Used by | Unit |
//! |-------|---------|------|
//! | game clock | power-up spawn/lifetime, effect durations, combo reset | milliseconds |
//! | tick counter | bomb countdown, explosion window, bomb cooldown, expressions | ticks |
//!
//! Ticks run at the snake's speed (ticks per second) while a run is active, so
//! everything counted in ticks speeds up with the snake.
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Command, Direction, GridPos, CELL_SIZE};
//!
//! let head = GridPos::from_cell(4, 4);
//! assert_eq!(head, GridPos::new(100, 100));
//!
//! let next = head.step(Direction::Right, CELL_SIZE);
//! assert_eq!(next.cell(CELL_SIZE), (5, 4));
//!
//! assert_eq!(Command::from_str("placeBomb"), Some(Command::PlaceBomb));
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//! ```

/// Edge length of one grid cell in pixel units
pub const CELL_SIZE: i32 = 25;

/// Default playfield width in cells (1200px window)
pub const DEFAULT_GRID_COLS: u16 = 48;

/// Default playfield height in cells (900px window)
pub const DEFAULT_GRID_ROWS: u16 = 36;

/// Number of segments a fresh snake starts with
pub const SNAKE_INITIAL_LENGTH: usize = 3;

/// Cell of the head when a run starts
pub const SNAKE_START_CELL: (i32, i32) = (4, 4);

/// Base points for one food item before multipliers
pub const SCORE_PER_FOOD: u32 = 10;

/// Combo resets after this long without eating
pub const COMBO_RESET_MS: u64 = 2000;

/// Tick rate used outside of a running game (menu, pause, game over)
pub const IDLE_TICK_RATE: u32 = 60;

/// Expression timers (ticks)
pub const HAPPY_EXPRESSION_TICKS: u32 = 30;
pub const EXCITED_EXPRESSION_TICKS: u32 = 40;

/// Combo count from which eating makes the snake excited
pub const EXCITED_COMBO_THRESHOLD: u32 = 3;

/// Combo counts that are announced as [`GameEvent::ComboReached`]
pub const COMBO_MILESTONES: [u32; 3] = [2, 3, 5];

/// A power-up spawns every 15 seconds
pub const POWERUP_SPAWN_INTERVAL_MS: u64 = 15_000;

/// Uncollected power-ups vanish after 10 seconds
pub const POWERUP_LIFETIME_MS: u64 = 10_000;

/// Power-ups never spawn within this many cells of an edge
pub const POWERUP_SPAWN_BORDER: i32 = 2;

/// Slow potion speed reduction and floor
pub const SLOW_POTION_DELTA: u32 = 5;
pub const SLOW_POTION_MIN_SPEED: u32 = 5;

/// Score multiplier granted by the double score power-up
pub const DOUBLE_SCORE_MULTIPLIER: f64 = 2.0;

/// Bomb allowance when bombs are enabled
pub const BOMB_MAX: u32 = 3;

/// Ticks between two placements
pub const BOMB_COOLDOWN_TICKS: u32 = 30;

/// Ticks between placement and detonation (3 seconds at 60 ticks/s)
pub const BOMB_COUNTDOWN_TICKS: u32 = 180;

/// Blast radius in pixel units
pub const BOMB_EXPLOSION_RADIUS: i32 = 100;

/// Ticks after detonation during which the blast can hit
pub const BOMB_HIT_WINDOW_TICKS: u32 = 15;

/// Ticks after detonation until the bomb is removed
pub const BOMB_EXPLOSION_TICKS: u32 = 45;

/// A position on the playfield in pixel units
///
/// Always a multiple of [`CELL_SIZE`] while inside the field. Equality is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position of the top-left corner of cell `(col, row)` with the default cell size
    pub const fn from_cell(col: i32, row: i32) -> Self {
        Self {
            x: col * CELL_SIZE,
            y: row * CELL_SIZE,
        }
    }

    /// Cell coordinates for a given cell size (floor division, works for negatives)
    pub fn cell(&self, cell_size: i32) -> (i32, i32) {
        (self.x.div_euclid(cell_size), self.y.div_euclid(cell_size))
    }

    /// The neighbouring position one cell away in `dir`
    pub fn step(&self, dir: Direction, cell_size: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx * cell_size,
            y: self.y + dy * cell_size,
        }
    }

    /// Squared euclidean distance in pixel units
    pub fn distance_sq(&self, other: GridPos) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

/// Movement direction (screen coordinates: y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector `(dx, dy)`
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The exact negation of this direction
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Collectible power-up kinds
///
/// - **SlowPotion**: lowers snake speed by 5 (floor 5) for 5 seconds
/// - **Shield**: absorbs one wall or self collision, lasts 3 seconds
/// - **DoubleScore**: doubles food points for 8 seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    SlowPotion,
    Shield,
    DoubleScore,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::SlowPotion,
        PowerUpKind::Shield,
        PowerUpKind::DoubleScore,
    ];

    /// How long the effect lasts once collected
    pub fn duration_ms(&self) -> u64 {
        match self {
            PowerUpKind::SlowPotion => 5_000,
            PowerUpKind::Shield => 3_000,
            PowerUpKind::DoubleScore => 8_000,
        }
    }

    /// Human readable name
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::SlowPotion => "Slow Potion",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::DoubleScore => "Double Score",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::SlowPotion => "slow_potion",
            PowerUpKind::Shield => "shield",
            PowerUpKind::DoubleScore => "double_score",
        }
    }
}

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
    ];

    /// Cycle Easy → Medium → Hard → Easy
    ///
    /// ```
    /// use tui_snake_types::DifficultyLevel;
    ///
    /// assert_eq!(DifficultyLevel::Hard.next(), DifficultyLevel::Easy);
    /// ```
    pub fn next(&self) -> Self {
        match self {
            DifficultyLevel::Easy => DifficultyLevel::Medium,
            DifficultyLevel::Medium => DifficultyLevel::Hard,
            DifficultyLevel::Hard => DifficultyLevel::Easy,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Some(DifficultyLevel::Easy),
            "medium" | "m" => Some(DifficultyLevel::Medium),
            "hard" | "h" => Some(DifficultyLevel::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
        }
    }

    /// Capitalized display name
    pub fn name(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard => "Hard",
        }
    }
}

/// Commands delivered by the input source
///
/// Whether a command does anything depends on the current [`GamePhase`];
/// commands that are not valid in a phase are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Pause,
    Resume,
    PlaceBomb,
    StartGame,
    ReturnToMenu,
    CycleDifficulty,
    Restart,
    Quit,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// ```
    /// use tui_snake_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveUp"), Some(Command::MoveUp));
    /// assert_eq!(Command::from_str("cycledifficulty"), Some(Command::CycleDifficulty));
    /// assert_eq!(Command::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(Command::MoveUp),
            "movedown" => Some(Command::MoveDown),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            "placebomb" => Some(Command::PlaceBomb),
            "startgame" => Some(Command::StartGame),
            "returntomenu" => Some(Command::ReturnToMenu),
            "cycledifficulty" => Some(Command::CycleDifficulty),
            "restart" => Some(Command::Restart),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveUp => "moveUp",
            Command::MoveDown => "moveDown",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::PlaceBomb => "placeBomb",
            Command::StartGame => "startGame",
            Command::ReturnToMenu => "returnToMenu",
            Command::CycleDifficulty => "cycleDifficulty",
            Command::Restart => "restart",
            Command::Quit => "quit",
        }
    }

    /// Steering direction for the four move commands
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Top-level game state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Running,
    Paused,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Snake facial expression (cosmetic; the renderer decides how it looks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Expression {
    #[default]
    Normal,
    /// Just ate food
    Happy,
    /// Eating in a combo
    Excited,
    /// Heading into a wall or its own body
    Worried,
}

/// Discrete one-shot notifications emitted by the simulation
///
/// These are what an audio or effects layer reacts to. They carry no
/// continuous state; the snapshot does that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    Ate { points: u32 },
    SpeedUp { speed: u32 },
    ComboReached(u32),
    Crashed,
    ShieldBroken,
    GameOver,
    Paused,
    Resumed,
    BombPlaced(GridPos),
    BombExploded(GridPos),
    BombReplenished,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    EffectExpired(PowerUpKind),
    DifficultyChanged(DifficultyLevel),
}

impl GameEvent {
    /// Short text for status lines and logs
    pub fn describe(&self) -> &'static str {
        match self {
            GameEvent::GameStarted => "Go!",
            GameEvent::Ate { .. } => "Yum",
            GameEvent::SpeedUp { .. } => "Speed up",
            GameEvent::ComboReached(_) => "Combo!",
            GameEvent::Crashed => "Crash",
            GameEvent::ShieldBroken => "Shield saved you!",
            GameEvent::GameOver => "Game over",
            GameEvent::Paused => "Paused",
            GameEvent::Resumed => "Resumed",
            GameEvent::BombPlaced(_) => "Bomb placed",
            GameEvent::BombExploded(_) => "Boom",
            GameEvent::BombReplenished => "Bomb restocked",
            GameEvent::PowerUpSpawned(_) => "Power-up appeared",
            GameEvent::PowerUpCollected(kind) => kind.label(),
            GameEvent::EffectExpired(_) => "Effect faded",
            GameEvent::DifficultyChanged(level) => level.name(),
        }
    }
}
