//! Game state machine - phases, command handling and the per-tick simulation
//!
//! [`GameState`] owns every piece of mutable run state. Commands go through
//! the [`transition`] table; anything the table does not list for the current
//! phase is ignored. While [`GamePhase::Running`], each call to
//! [`GameState::tick`] performs exactly one simulation step in this order:
//!
//! 1. move the snake
//! 2. wall and self collision (a shield absorbs one hit)
//! 3. bombs (blasts ignore the shield)
//! 4. power-up spawn/expiry and collection
//! 5. food, score and combo
//!
//! A step that ends the run stops right there. Timed effects are checked
//! against the clock on every tick, in every phase, before the step runs, so
//! an expired shield never absorbs a crash.

use log::{debug, info};

use crate::bombs::BombSystem;
use crate::config::GameConfig;
use crate::difficulty::DifficultySettings;
use crate::events::{push_event, EventBuffer, EventSink};
use crate::food::Food;
use crate::powerups::{Modifiers, PowerUpSystem};
use crate::rng::SimpleRng;
use crate::snake::Snake;
use crate::snapshot::{BombSnapshot, EffectSnapshot, GameSnapshot, PowerUpSnapshot};
use crate::types::{
    Command, DifficultyLevel, Direction, GameEvent, GamePhase, GridPos, PowerUpKind,
    COMBO_MILESTONES, COMBO_RESET_MS, IDLE_TICK_RATE, SCORE_PER_FOOD,
};

/// What a command does besides changing the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionAction {
    /// Fresh run with the selected difficulty
    StartRun,
    Steer(Direction),
    PlaceBomb,
    Pause,
    Resume,
    /// Discard the current run
    ResetToMenu,
    CycleDifficulty,
    RequestQuit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: GamePhase,
    pub action: TransitionAction,
}

impl Transition {
    const fn new(next: GamePhase, action: TransitionAction) -> Self {
        Self { next, action }
    }
}

/// The complete command table. `None` means the command is ignored.
pub fn transition(phase: GamePhase, command: Command) -> Option<Transition> {
    use GamePhase::*;
    use TransitionAction as A;

    let t = match (phase, command) {
        (Menu, Command::StartGame) => Transition::new(Running, A::StartRun),
        (Menu, Command::CycleDifficulty) => Transition::new(Menu, A::CycleDifficulty),
        (Menu, Command::Quit) => Transition::new(Menu, A::RequestQuit),

        (Running, Command::MoveUp | Command::MoveDown | Command::MoveLeft | Command::MoveRight) => {
            let dir = command.direction()?;
            Transition::new(Running, A::Steer(dir))
        }
        (Running, Command::PlaceBomb) => Transition::new(Running, A::PlaceBomb),
        (Running, Command::Pause) => Transition::new(Paused, A::Pause),
        (Running, Command::ReturnToMenu | Command::Quit) => Transition::new(Menu, A::ResetToMenu),

        (Paused, Command::Resume | Command::Pause) => Transition::new(Running, A::Resume),
        (Paused, Command::ReturnToMenu) => Transition::new(Menu, A::ResetToMenu),

        (GameOver, Command::Restart | Command::ReturnToMenu) => {
            Transition::new(Menu, A::ResetToMenu)
        }
        (GameOver, Command::Quit) => Transition::new(GameOver, A::RequestQuit),

        _ => return None,
    };
    Some(t)
}

/// Points for one food item: `round(base × power-up multiplier × difficulty multiplier)`
pub fn award_points(base: u32, powerup_multiplier: f64, difficulty_multiplier: f64) -> u32 {
    (base as f64 * powerup_multiplier * difficulty_multiplier).round() as u32
}

/// Combo level worth announcing, if any
pub fn combo_milestone(combo: u32) -> Option<u32> {
    let [two, three, five] = COMBO_MILESTONES;
    match combo {
        c if c == two || c == three => Some(c),
        c if c >= five => Some(five),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    /// Level used by the next reset
    selected: DifficultyLevel,
    /// Level of the current run
    difficulty: DifficultyLevel,
    settings: DifficultySettings,
    phase: GamePhase,
    snake: Snake,
    food: Food,
    powerups: PowerUpSystem,
    bombs: BombSystem,
    modifiers: Modifiers,
    rng: SimpleRng,
    score: u32,
    /// Monotonic game clock in milliseconds
    clock_ms: u64,
    /// Clock value of the last meal (or last combo reset)
    last_food_ms: u64,
    /// Simulation steps in the current run
    tick_count: u64,
    /// Incremented every time a run starts
    run_id: u32,
    quit_requested: bool,
    events: EventBuffer,
    last_event: Option<GameEvent>,
}

impl GameState {
    /// Create a state machine in [`GamePhase::Menu`] with a ready-to-start run.
    pub fn new(config: GameConfig) -> Self {
        let settings = DifficultySettings::for_level(config.difficulty);
        let mut rng = SimpleRng::new(config.seed);
        let snake = Self::fresh_snake(&config, &settings);
        let food = Food::spawn(&config.playfield, &mut rng, |p| snake.occupies(p));

        Self {
            config,
            selected: config.difficulty,
            difficulty: config.difficulty,
            settings,
            phase: GamePhase::Menu,
            snake,
            food,
            powerups: PowerUpSystem::new(0),
            bombs: BombSystem::new(settings.bombs_enabled),
            modifiers: Modifiers::default(),
            rng,
            score: 0,
            clock_ms: 0,
            last_food_ms: 0,
            tick_count: 0,
            run_id: 0,
            quit_requested: false,
            events: EventBuffer::new(),
            last_event: None,
        }
    }

    fn fresh_snake(config: &GameConfig, settings: &DifficultySettings) -> Snake {
        Snake::new(
            config.start_position(),
            config.initial_length,
            config.playfield.cell_size,
            settings,
        )
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        self.difficulty
    }

    pub fn selected_difficulty(&self) -> DifficultyLevel {
        self.selected
    }

    pub fn settings(&self) -> &DifficultySettings {
        &self.settings
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn powerups(&self) -> &PowerUpSystem {
        &self.powerups
    }

    pub fn bombs(&self) -> &BombSystem {
        &self.bombs
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn run_id(&self) -> u32 {
        self.run_id
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    // Direct access for scripted scenarios (tests, benches).

    #[doc(hidden)]
    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    #[doc(hidden)]
    pub fn set_food(&mut self, position: GridPos) {
        self.food = Food::new(position);
    }

    #[doc(hidden)]
    pub fn powerups_mut(&mut self) -> &mut PowerUpSystem {
        &mut self.powerups
    }

    #[doc(hidden)]
    pub fn bombs_mut(&mut self) -> &mut BombSystem {
        &mut self.bombs
    }

    #[doc(hidden)]
    pub fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }

    /// Apply a power-up effect as if it had just been collected
    #[doc(hidden)]
    pub fn activate_powerup(&mut self, kind: PowerUpKind) {
        self.powerups
            .apply_effect(kind, self.clock_ms, &mut self.snake, &mut self.modifiers);
    }

    /// Milliseconds until the next tick should run
    pub fn tick_interval_ms(&self) -> u32 {
        match self.phase {
            GamePhase::Running => 1000 / self.snake.speed().max(1),
            _ => 1000 / IDLE_TICK_RATE,
        }
    }

    /// Rebuild the run from the selected difficulty. The phase is left alone.
    pub fn reset(&mut self) {
        self.difficulty = self.selected;
        self.settings = DifficultySettings::for_level(self.selected);
        self.snake = Self::fresh_snake(&self.config, &self.settings);
        let snake = &self.snake;
        self.food = Food::spawn(&self.config.playfield, &mut self.rng, |p| snake.occupies(p));
        self.powerups.clear(self.clock_ms);
        self.bombs = BombSystem::new(self.settings.bombs_enabled);
        self.modifiers = Modifiers::default();
        self.score = 0;
        self.last_food_ms = self.clock_ms;
        self.tick_count = 0;
    }

    /// Apply a command. Returns true if it changed anything.
    pub fn apply_command(&mut self, command: Command) -> bool {
        let Some(t) = transition(self.phase, command) else {
            return false;
        };

        let changed = match t.action {
            TransitionAction::StartRun => {
                self.reset();
                self.run_id = self.run_id.wrapping_add(1);
                self.emit(GameEvent::GameStarted);
                true
            }
            TransitionAction::Steer(dir) => self.snake.change_direction(dir),
            TransitionAction::PlaceBomb => {
                let head = self.snake.head();
                let placed = self.bombs.try_place(head);
                if placed {
                    self.emit(GameEvent::BombPlaced(head));
                }
                placed
            }
            TransitionAction::Pause => {
                self.emit(GameEvent::Paused);
                true
            }
            TransitionAction::Resume => {
                self.emit(GameEvent::Resumed);
                true
            }
            TransitionAction::ResetToMenu => {
                self.reset();
                true
            }
            TransitionAction::CycleDifficulty => {
                self.selected = self.selected.next();
                info!("difficulty selected: {}", self.selected.as_str());
                self.emit(GameEvent::DifficultyChanged(self.selected));
                true
            }
            TransitionAction::RequestQuit => {
                self.quit_requested = true;
                true
            }
        };

        self.set_phase(t.next);
        changed
    }

    fn set_phase(&mut self, next: GamePhase) {
        if self.phase != next {
            info!(
                "phase {} -> {} (run {}, score {})",
                self.phase.as_str(),
                next.as_str(),
                self.run_id,
                self.score
            );
            self.phase = next;
        }
    }

    /// Advance the game clock by `elapsed_ms` and, while running, simulate one step.
    ///
    /// Effects whose end time has passed are undone in every phase, before the
    /// step looks at the shield. Returns true if a step was simulated.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.clock_ms += elapsed_ms as u64;
        self.expire_effects();
        if self.phase != GamePhase::Running {
            return false;
        }
        self.step();
        true
    }

    fn expire_effects(&mut self) {
        let expired =
            self.powerups
                .remove_expired_effects(self.clock_ms, &mut self.snake, &mut self.modifiers);
        for kind in expired {
            debug!("{} wore off", kind.as_str());
            self.emit(GameEvent::EffectExpired(kind));
        }
    }

    fn step(&mut self) {
        self.tick_count += 1;
        let now = self.clock_ms;
        let playfield = self.config.playfield;

        self.snake.advance();

        let wall = self
            .snake
            .check_wall_collision(self.settings.wall_wrap_enabled, &playfield);
        if wall || self.snake.check_self_collision() {
            if self.modifiers.shield_active {
                self.powerups.consume_shield(&mut self.modifiers);
                debug!("shield absorbed a collision at {:?}", self.snake.head());
                self.emit(GameEvent::ShieldBroken);
            } else {
                self.end_run();
                return;
            }
        }

        let danger = self.danger_ahead();
        self.snake.update_expression(danger);

        let blast = self.bombs.update(&self.snake);
        for pos in blast.detonated {
            self.emit(GameEvent::BombExploded(pos));
        }
        for _ in 0..blast.replenished {
            self.emit(GameEvent::BombReplenished);
        }
        if blast.hit {
            self.end_run();
            return;
        }

        let report = self.powerups.update(
            now,
            &playfield,
            &mut self.rng,
            &mut self.snake,
            &mut self.modifiers,
        );
        if let Some(kind) = report.spawned {
            self.emit(GameEvent::PowerUpSpawned(kind));
        }
        for kind in report.expired_effects {
            self.emit(GameEvent::EffectExpired(kind));
        }
        let head = self.snake.head();
        if let Some(kind) =
            self.powerups
                .check_collection(head, now, &mut self.snake, &mut self.modifiers)
        {
            debug!("collected {}", kind.as_str());
            self.emit(GameEvent::PowerUpCollected(kind));
        }

        if head == self.food.position() {
            self.eat(now);
        } else if now.saturating_sub(self.last_food_ms) > COMBO_RESET_MS {
            self.snake.reset_combo();
            self.last_food_ms = now;
        }
    }

    fn eat(&mut self, now: u64) {
        let sped_up = self.snake.grow();
        let points = award_points(
            SCORE_PER_FOOD,
            self.modifiers.score_multiplier,
            self.settings.score_multiplier,
        );
        self.score += points;
        self.last_food_ms = now;
        self.emit(GameEvent::Ate { points });

        if sped_up {
            self.emit(GameEvent::SpeedUp {
                speed: self.snake.speed(),
            });
        }
        if let Some(level) = combo_milestone(self.snake.combo_count()) {
            self.emit(GameEvent::ComboReached(level));
        }

        let snake = &self.snake;
        self.food
            .respawn(&self.config.playfield, &mut self.rng, |p| snake.occupies(p));
    }

    fn end_run(&mut self) {
        self.emit(GameEvent::Crashed);
        self.set_phase(GamePhase::GameOver);
        self.emit(GameEvent::GameOver);
    }

    /// The cell in front of the head would kill the snake
    fn danger_ahead(&self) -> bool {
        let playfield = &self.config.playfield;
        let mut next = self.snake.next_head();
        if self.settings.wall_wrap_enabled {
            next = playfield.wrap(next);
        } else if !playfield.contains(next) {
            return true;
        }
        self.snake.occupies(next)
    }

    fn emit(&mut self, event: GameEvent) {
        self.last_event = Some(event);
        push_event(&mut self.events, event);
    }

    /// Take every event produced since the last drain.
    pub fn take_events(&mut self) -> EventBuffer {
        std::mem::take(&mut self.events)
    }

    /// Forward pending events to `sink`, oldest first.
    pub fn drain_events_into(&mut self, sink: &mut impl EventSink) {
        for event in self.events.drain(..) {
            sink.notify(&event);
        }
    }

    /// Take and clear the most recent event.
    pub fn take_last_event(&mut self) -> Option<GameEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let now = self.clock_ms;

        out.phase = self.phase;
        out.difficulty = self.difficulty;
        out.selected_difficulty = self.selected;
        out.playfield = self.config.playfield;

        out.snake.clear();
        out.snake.extend(self.snake.segments());
        out.direction = self.snake.direction();
        out.expression = self.snake.expression();
        out.food = self.food.position();

        out.bombs.clear();
        out.bombs
            .extend(self.bombs.bombs().iter().map(BombSnapshot::from));
        out.powerups.clear();
        out.powerups.extend(
            self.powerups
                .powerups()
                .iter()
                .map(|p| PowerUpSnapshot::new(p, now)),
        );
        out.effects.clear();
        out.effects.extend(
            self.powerups
                .effects()
                .iter()
                .map(|e| EffectSnapshot::new(e, now)),
        );

        out.score = self.score;
        out.speed = self.snake.speed();
        out.combo = self.snake.combo_count();
        out.bombs_available = self.bombs.available();
        out.bombs_max = self.bombs.max();
        out.bomb_cooldown = self.bombs.cooldown();
        out.shield_active = self.modifiers.shield_active;
        out.score_multiplier = self.modifiers.score_multiplier;
        out.run_id = self.run_id;
        out.tick = self.tick_count;
        out.last_event = self.last_event;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
