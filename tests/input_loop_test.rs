use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_snake::core::GameState;
use tui_snake::input::{handle_key_event, should_quit, CommandQueue};
use tui_snake::types::{Direction, GamePhase};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Feed keys the way the runner does: queue on input, apply on the next tick.
fn press_then_tick(game: &mut GameState, queue: &mut CommandQueue, keys: &[KeyCode]) {
    for &code in keys {
        if let Some(command) = handle_key_event(key(code)) {
            queue.push(command);
        }
    }
    for command in queue.drain() {
        game.apply_command(command);
    }
    game.tick(100);
}

#[test]
fn keys_drive_a_run_from_menu_to_game_over() {
    let mut game = GameState::default();
    let mut queue = CommandQueue::new();

    press_then_tick(&mut game, &mut queue, &[KeyCode::Char(' ')]);
    assert_eq!(game.phase(), GamePhase::Running);

    press_then_tick(&mut game, &mut queue, &[KeyCode::Char('j')]);
    assert_eq!(game.snake().direction(), Direction::Down);

    // Up is a reversal while heading down.
    press_then_tick(&mut game, &mut queue, &[KeyCode::Up]);
    assert_eq!(game.snake().direction(), Direction::Down);

    press_then_tick(&mut game, &mut queue, &[KeyCode::Char('p')]);
    assert_eq!(game.phase(), GamePhase::Paused);
    press_then_tick(&mut game, &mut queue, &[KeyCode::Char('p')]);
    assert_eq!(game.phase(), GamePhase::Running);

    press_then_tick(&mut game, &mut queue, &[KeyCode::Esc]);
    assert_eq!(game.phase(), GamePhase::Menu);
    assert!(!game.quit_requested());

    press_then_tick(&mut game, &mut queue, &[KeyCode::Char('q')]);
    assert!(game.quit_requested());
}

#[test]
fn queued_commands_all_apply_before_the_step() {
    let mut game = GameState::default();
    let mut queue = CommandQueue::new();
    press_then_tick(&mut game, &mut queue, &[KeyCode::Enter]);
    let head = game.snake().head();

    // The bomb lands where the head was before this tick's move.
    press_then_tick(&mut game, &mut queue, &[KeyCode::Down, KeyCode::Char('b')]);
    assert_eq!(game.snake().direction(), Direction::Down);
    assert_eq!(game.bombs().bombs().len(), 1);
    assert_eq!(game.bombs().bombs()[0].position, head);
    assert!(queue.is_empty());
}

#[test]
fn ctrl_c_is_not_a_game_command() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(should_quit(ctrl_c));
    assert_eq!(handle_key_event(ctrl_c), None);
}
