//! Power-up module - spawning, collection and timed effects
//!
//! Power-ups appear every 15 seconds on a random cell away from the edges and
//! disappear after 10 seconds if nobody picks them up. Collecting one applies
//! its effect immediately and records an [`ActiveEffect`] that knows how to
//! undo itself once its end time passes.
//!
//! All times are game-clock milliseconds supplied by the caller, so the whole
//! lifecycle can be driven from tests without any rendering or real clock.
//!
//! Collecting a kind that is already active refreshes the running effect's end
//! time. The value restored on expiry is always the one captured by the first
//! collection, so overlapping pickups never restore a stale value.

use arrayvec::ArrayVec;
use log::debug;

use crate::config::Playfield;
use crate::food::find_free_cell;
use crate::rng::SimpleRng;
use crate::snake::Snake;
use crate::types::{
    GridPos, PowerUpKind, DOUBLE_SCORE_MULTIPLIER, POWERUP_LIFETIME_MS,
    POWERUP_SPAWN_BORDER, POWERUP_SPAWN_INTERVAL_MS, SLOW_POTION_DELTA, SLOW_POTION_MIN_SPEED,
};

/// Game-wide modifiers that power-ups switch on and off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifiers {
    pub shield_active: bool,
    pub score_multiplier: f64,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            shield_active: false,
            score_multiplier: 1.0,
        }
    }
}

/// An uncollected power-up lying on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub position: GridPos,
    pub kind: PowerUpKind,
    pub spawn_ms: u64,
    pub lifetime_ms: u64,
}

impl PowerUp {
    pub fn new(position: GridPos, kind: PowerUpKind, now_ms: u64) -> Self {
        Self {
            position,
            kind,
            spawn_ms: now_ms,
            lifetime_ms: POWERUP_LIFETIME_MS,
        }
    }

    /// Effect length once collected
    pub fn duration_ms(&self) -> u64 {
        self.kind.duration_ms()
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.spawn_ms) > self.lifetime_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        (self.spawn_ms + self.lifetime_ms).saturating_sub(now_ms)
    }
}

/// A modifier currently in force, with what it needs to restore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveEffect {
    SlowPotion { end_ms: u64, original_speed: u32 },
    Shield { end_ms: u64 },
    DoubleScore { end_ms: u64 },
}

impl ActiveEffect {
    pub fn kind(&self) -> PowerUpKind {
        match self {
            ActiveEffect::SlowPotion { .. } => PowerUpKind::SlowPotion,
            ActiveEffect::Shield { .. } => PowerUpKind::Shield,
            ActiveEffect::DoubleScore { .. } => PowerUpKind::DoubleScore,
        }
    }

    pub fn end_ms(&self) -> u64 {
        match *self {
            ActiveEffect::SlowPotion { end_ms, .. }
            | ActiveEffect::Shield { end_ms }
            | ActiveEffect::DoubleScore { end_ms } => end_ms,
        }
    }

    fn set_end_ms(&mut self, new_end: u64) {
        match self {
            ActiveEffect::SlowPotion { end_ms, .. }
            | ActiveEffect::Shield { end_ms }
            | ActiveEffect::DoubleScore { end_ms } => *end_ms = new_end,
        }
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.end_ms().saturating_sub(now_ms)
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Undo the effect on the fields it modified
    fn restore(&self, snake: &mut Snake, modifiers: &mut Modifiers) {
        match *self {
            ActiveEffect::SlowPotion { original_speed, .. } => snake.set_speed(original_speed),
            ActiveEffect::Shield { .. } => modifiers.shield_active = false,
            ActiveEffect::DoubleScore { .. } => modifiers.score_multiplier = 1.0,
        }
    }
}

/// What happened during one [`PowerUpSystem::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerUpUpdate {
    pub spawned: Option<PowerUpKind>,
    pub vanished: usize,
    pub expired_effects: ArrayVec<PowerUpKind, 3>,
}

#[derive(Debug, Clone)]
pub struct PowerUpSystem {
    powerups: Vec<PowerUp>,
    effects: Vec<ActiveEffect>,
    spawn_interval_ms: u64,
    last_spawn_ms: u64,
}

impl PowerUpSystem {
    /// Start with an empty field; the first spawn comes one interval after `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self {
            powerups: Vec::new(),
            effects: Vec::new(),
            spawn_interval_ms: POWERUP_SPAWN_INTERVAL_MS,
            last_spawn_ms: now_ms,
        }
    }

    pub fn clear(&mut self, now_ms: u64) {
        self.powerups.clear();
        self.effects.clear();
        self.last_spawn_ms = now_ms;
    }

    pub fn powerups(&self) -> &[PowerUp] {
        &self.powerups
    }

    pub fn effects(&self) -> &[ActiveEffect] {
        &self.effects
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }

    /// Drop a power-up onto a specific cell
    pub fn spawn_at(&mut self, position: GridPos, kind: PowerUpKind, now_ms: u64) {
        self.powerups.push(PowerUp::new(position, kind, now_ms));
    }

    /// Periodic spawn, lifetime expiry of uncollected power-ups, and effect expiry.
    pub fn update(
        &mut self,
        now_ms: u64,
        playfield: &Playfield,
        rng: &mut SimpleRng,
        snake: &mut Snake,
        modifiers: &mut Modifiers,
    ) -> PowerUpUpdate {
        let mut report = PowerUpUpdate::default();

        if now_ms.saturating_sub(self.last_spawn_ms) > self.spawn_interval_ms {
            self.last_spawn_ms = now_ms;
            report.spawned = self.spawn_random(now_ms, playfield, rng, snake);
        }

        let before = self.powerups.len();
        self.powerups.retain(|p| !p.is_expired(now_ms));
        report.vanished = before - self.powerups.len();

        report.expired_effects = self.remove_expired_effects(now_ms, snake, modifiers);
        report
    }

    fn spawn_random(
        &mut self,
        now_ms: u64,
        playfield: &Playfield,
        rng: &mut SimpleRng,
        snake: &Snake,
    ) -> Option<PowerUpKind> {
        let kind = rng.pick(&PowerUpKind::ALL)?;
        let taken = |pos: GridPos| {
            snake.occupies(pos) || self.powerups.iter().any(|p| p.position == pos)
        };
        let position = find_free_cell(playfield, rng, POWERUP_SPAWN_BORDER, taken)?;
        debug!("power-up {} spawned at {:?}", kind.as_str(), position);
        self.powerups.push(PowerUp::new(position, kind, now_ms));
        Some(kind)
    }

    /// Collect the power-up under the head, if any, and apply its effect.
    pub fn check_collection(
        &mut self,
        head: GridPos,
        now_ms: u64,
        snake: &mut Snake,
        modifiers: &mut Modifiers,
    ) -> Option<PowerUpKind> {
        let idx = self.powerups.iter().position(|p| p.position == head)?;
        let powerup = self.powerups.remove(idx);
        self.apply_effect(powerup.kind, now_ms, snake, modifiers);
        Some(powerup.kind)
    }

    /// Apply (or refresh) the effect of `kind`, ending `kind.duration_ms()` from now.
    pub fn apply_effect(
        &mut self,
        kind: PowerUpKind,
        now_ms: u64,
        snake: &mut Snake,
        modifiers: &mut Modifiers,
    ) {
        let end_ms = now_ms + kind.duration_ms();

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind() == kind) {
            existing.set_end_ms(end_ms);
        } else {
            let effect = match kind {
                PowerUpKind::SlowPotion => {
                    let original_speed = snake.speed();
                    snake.set_speed(
                        original_speed
                            .saturating_sub(SLOW_POTION_DELTA)
                            .max(SLOW_POTION_MIN_SPEED),
                    );
                    ActiveEffect::SlowPotion {
                        end_ms,
                        original_speed,
                    }
                }
                PowerUpKind::Shield => ActiveEffect::Shield { end_ms },
                PowerUpKind::DoubleScore => ActiveEffect::DoubleScore { end_ms },
            };
            self.effects.push(effect);
        }

        match kind {
            PowerUpKind::SlowPotion => {}
            PowerUpKind::Shield => modifiers.shield_active = true,
            PowerUpKind::DoubleScore => modifiers.score_multiplier = DOUBLE_SCORE_MULTIPLIER,
        }
    }

    /// Remove every effect whose end time has passed, restoring what it changed.
    pub fn remove_expired_effects(
        &mut self,
        now_ms: u64,
        snake: &mut Snake,
        modifiers: &mut Modifiers,
    ) -> ArrayVec<PowerUpKind, 3> {
        let mut expired = ArrayVec::new();
        self.effects.retain(|effect| {
            if effect.is_expired(now_ms) {
                effect.restore(snake, modifiers);
                let _ = expired.try_push(effect.kind());
                false
            } else {
                true
            }
        });
        expired
    }

    /// The shield absorbed a hit: switch it off and drop its record.
    pub fn consume_shield(&mut self, modifiers: &mut Modifiers) {
        modifiers.shield_active = false;
        self.effects.retain(|e| e.kind() != PowerUpKind::Shield);
    }
}
