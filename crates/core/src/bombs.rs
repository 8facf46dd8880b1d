//! Bomb module - limited, delayed area weapons
//!
//! Bomb timing is counted in simulation ticks, not milliseconds, so a faster
//! snake also makes bombs go off sooner.
//!
//! # Lifecycle
//!
//! ```text
//! placed ── countdown 180 ticks ──> exploded (timer 0)
//!        ── timer < 15: blast hits ──> timer 45: removed
//! ```
//!
//! A removed bomb that never hit the snake gives its allowance back.

use arrayvec::ArrayVec;
use log::debug;

use crate::snake::Snake;
use crate::types::{
    GridPos, BOMB_COOLDOWN_TICKS, BOMB_COUNTDOWN_TICKS, BOMB_EXPLOSION_RADIUS,
    BOMB_EXPLOSION_TICKS, BOMB_HIT_WINDOW_TICKS, BOMB_MAX,
};

/// Most bombs that can detonate on a single tick (never more than the allowance)
pub const MAX_DETONATIONS_PER_TICK: usize = BOMB_MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bomb {
    pub position: GridPos,
    /// Blast radius in pixel units
    pub explosion_radius: i32,
    /// Ticks left until detonation
    pub countdown: u32,
    pub exploded: bool,
    /// Ticks since detonation
    pub explosion_timer: u32,
    /// Set once the blast has touched the snake
    pub hit_actor: bool,
}

impl Bomb {
    pub fn new(position: GridPos) -> Self {
        Self {
            position,
            explosion_radius: BOMB_EXPLOSION_RADIUS,
            countdown: BOMB_COUNTDOWN_TICKS,
            exploded: false,
            explosion_timer: 0,
            hit_actor: false,
        }
    }

    /// Advance one tick. Returns true on the tick the bomb detonates.
    pub fn update(&mut self) -> bool {
        if self.exploded {
            self.explosion_timer += 1;
            return false;
        }

        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.exploded = true;
            self.explosion_timer = 0;
            return true;
        }
        false
    }

    /// The blast only damages during the first few ticks after detonation
    pub fn in_hit_window(&self) -> bool {
        self.exploded && self.explosion_timer < BOMB_HIT_WINDOW_TICKS
    }

    /// Strict containment: `distance(bomb, pos) < radius`, only inside the hit window.
    pub fn hits(&self, pos: GridPos) -> bool {
        let r = self.explosion_radius as i64;
        self.in_hit_window() && self.position.distance_sq(pos) < r * r
    }

    pub fn is_finished(&self) -> bool {
        self.exploded && self.explosion_timer >= BOMB_EXPLOSION_TICKS
    }
}

/// Result of one [`BombSystem::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BombUpdate {
    pub detonated: ArrayVec<GridPos, MAX_DETONATIONS_PER_TICK>,
    /// Some blast touched a snake segment this tick
    pub hit: bool,
    /// Allowance given back by finished bombs
    pub replenished: u32,
}

#[derive(Debug, Clone)]
pub struct BombSystem {
    bombs: Vec<Bomb>,
    available: u32,
    max: u32,
    cooldown: u32,
    enabled: bool,
}

impl BombSystem {
    /// A system with a full allowance, or none at all when bombs are disabled.
    pub fn new(enabled: bool) -> Self {
        let max = if enabled { BOMB_MAX } else { 0 };
        Self {
            bombs: Vec::with_capacity(BOMB_MAX as usize),
            available: max,
            max,
            cooldown: 0,
            enabled,
        }
    }

    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    pub fn bombs_mut(&mut self) -> &mut Vec<Bomb> {
        &mut self.bombs
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Ticks until another bomb may be placed
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn can_place(&self) -> bool {
        self.enabled && self.available > 0 && self.cooldown == 0
    }

    /// Drop a bomb on `head`. No-op (false) without allowance or during cooldown.
    pub fn try_place(&mut self, head: GridPos) -> bool {
        if !self.can_place() {
            return false;
        }
        self.bombs.push(Bomb::new(head));
        self.available -= 1;
        self.cooldown = BOMB_COOLDOWN_TICKS;
        debug!("bomb placed at {:?}, {} left", head, self.available);
        true
    }

    /// One tick: cooldown, countdowns, blast hits against every segment, cleanup.
    pub fn update(&mut self, snake: &Snake) -> BombUpdate {
        let mut report = BombUpdate::default();
        self.cooldown = self.cooldown.saturating_sub(1);

        for bomb in &mut self.bombs {
            if bomb.update() {
                debug!("bomb exploded at {:?}", bomb.position);
                let _ = report.detonated.try_push(bomb.position);
            }
            if bomb.in_hit_window() && snake.segments().any(|seg| bomb.hits(seg)) {
                bomb.hit_actor = true;
                report.hit = true;
            }
        }

        let mut replenished = 0;
        self.bombs.retain(|bomb| {
            if !bomb.is_finished() {
                return true;
            }
            if !bomb.hit_actor {
                replenished += 1;
            }
            false
        });

        let before = self.available;
        self.available = (self.available + replenished).min(self.max);
        report.replenished = self.available - before;
        report
    }
}
