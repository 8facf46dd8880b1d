//! Bomb placement, blast window and allowance

use tui_snake::core::difficulty::HARD;
use tui_snake::core::{Bomb, BombSystem, GameConfig, GameState, Snake};
use tui_snake::types::{
    Command, DifficultyLevel, GameEvent, GamePhase, GridPos, PowerUpKind, BOMB_COOLDOWN_TICKS,
    BOMB_EXPLOSION_RADIUS, BOMB_MAX, CELL_SIZE,
};

fn start(level: DifficultyLevel) -> GameState {
    let mut game = GameState::new(GameConfig::default().with_difficulty(level));
    game.apply_command(Command::StartGame);
    game.set_food(GridPos::from_cell(40, 30));
    game.take_events();
    game
}

#[test]
fn test_hit_only_inside_window() {
    let center = GridPos::new(500, 500);
    let near = GridPos::new(500 + BOMB_EXPLOSION_RADIUS - 1, 500);
    let mut bomb = Bomb::new(center);

    // Before detonation.
    assert!(!bomb.hits(near));

    while !bomb.update() {}
    for timer in 0..15 {
        assert_eq!(bomb.explosion_timer, timer);
        assert!(bomb.hits(near), "timer {}", timer);
        bomb.update();
    }
    while bomb.explosion_timer < 20 {
        bomb.update();
    }
    assert!(!bomb.hits(near));
}

#[test]
fn test_easy_has_no_bombs() {
    let mut game = start(DifficultyLevel::Easy);
    assert!(!game.apply_command(Command::PlaceBomb));
    assert_eq!(game.bombs().available(), 0);
    assert!(game.take_events().is_empty());
}

#[test]
fn test_missed_bomb_returns_to_allowance() {
    let mut game = start(DifficultyLevel::Medium);
    assert_eq!(game.bombs().available(), BOMB_MAX);

    assert!(game.apply_command(Command::PlaceBomb));
    assert_eq!(game.bombs().available(), BOMB_MAX - 1);
    // Short fuse so the snake can outrun the blast without leaving the field.
    game.bombs_mut().bombs_mut()[0].countdown = 8;

    let mut events = Vec::new();
    for tick in 1..=53 {
        match tick {
            20 => assert!(game.apply_command(Command::MoveDown)),
            40 => assert!(game.apply_command(Command::MoveLeft)),
            _ => {}
        }
        game.tick(100);
        events.extend(game.take_events());
        assert_eq!(game.phase(), GamePhase::Running, "tick {}", tick);
    }

    assert!(game.bombs().bombs().is_empty());
    assert_eq!(game.bombs().available(), BOMB_MAX);
    assert!(events.contains(&GameEvent::BombExploded(GridPos::from_cell(4, 4))));
    assert!(events.contains(&GameEvent::BombReplenished));
}

#[test]
fn test_blast_ignores_shield_and_ends_tick() {
    let mut game = start(DifficultyLevel::Medium);
    game.activate_powerup(PowerUpKind::Shield);
    assert!(game.apply_command(Command::PlaceBomb));
    game.bombs_mut().bombs_mut()[0].countdown = 1;

    // Would be collected this tick if the step got that far.
    let now = game.clock_ms();
    game.powerups_mut()
        .spawn_at(GridPos::from_cell(5, 4), PowerUpKind::DoubleScore, now);
    game.take_events();

    game.tick(100);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(game.modifiers().shield_active);
    assert_eq!(game.powerups().powerups().len(), 1);
    assert_eq!(
        game.take_events().as_slice(),
        &[
            GameEvent::BombExploded(GridPos::from_cell(4, 4)),
            GameEvent::Crashed,
            GameEvent::GameOver
        ]
    );
}

#[test]
fn test_cooldown_and_allowance_limit_placements() {
    let snake = Snake::new(GridPos::from_cell(40, 30), 3, CELL_SIZE, &HARD);
    let mut bombs = BombSystem::new(true);

    let mut placed = Vec::new();
    for tick in 0..100 {
        if bombs.try_place(GridPos::from_cell(5, 5)) {
            placed.push(tick);
        }
        bombs.update(&snake);
    }
    assert_eq!(placed, vec![0, BOMB_COOLDOWN_TICKS, 2 * BOMB_COOLDOWN_TICKS]);
    assert_eq!(bombs.available(), 0);
    assert!(!bombs.can_place());
}
