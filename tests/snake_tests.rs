//! Snake movement, steering and collision rules

use tui_snake::core::difficulty::{DifficultySettings, MEDIUM};
use tui_snake::core::{Playfield, Snake};
use tui_snake::types::{Direction, GridPos, CELL_SIZE};

fn straight_snake(head: (i32, i32), len: usize, dir: Direction) -> Snake {
    // Body trails away from the direction of travel.
    let (dx, dy) = dir.delta();
    let body: Vec<GridPos> = (0..len as i32)
        .map(|i| GridPos::from_cell(head.0 - dx * i, head.1 - dy * i))
        .collect();
    Snake::from_segments(&body, dir, CELL_SIZE, &MEDIUM)
}

#[test]
fn test_grow_adds_exactly_one_segment_on_next_move() {
    for dir in Direction::ALL {
        let mut snake = straight_snake((20, 20), 4, dir);
        let speed = snake.speed();
        snake.grow();
        assert_eq!(
            snake.speed(),
            (speed + MEDIUM.speed_increment).min(MEDIUM.max_speed)
        );
        assert_eq!(snake.len(), 4);
        snake.advance();
        assert_eq!(snake.len(), 5, "{:?}", dir);
        snake.advance();
        assert_eq!(snake.len(), 5);
    }
}

#[test]
fn test_reversal_is_ignored_for_every_direction() {
    for dir in Direction::ALL {
        let mut snake = straight_snake((20, 20), 3, dir);
        assert!(!snake.change_direction(dir.opposite()));
        assert_eq!(snake.direction(), dir);
    }
}

#[test]
fn test_speed_caps_at_max_after_ten_meals() {
    let settings = DifficultySettings {
        initial_speed: 10,
        max_speed: 30,
        speed_increment: 2,
        ..MEDIUM
    };
    let mut snake = Snake::new(GridPos::from_cell(4, 4), 3, CELL_SIZE, &settings);
    for _ in 0..10 {
        snake.grow();
    }
    assert_eq!(snake.speed(), snake.max_speed());
    assert!(!snake.grow());
    assert_eq!(snake.speed(), 30);
}

#[test]
fn test_wall_collision_on_every_edge() {
    let pf = Playfield::default();
    let outside = [
        GridPos::new(-25, 100),
        GridPos::new(pf.width_px(), 100),
        GridPos::new(100, -25),
        GridPos::new(100, pf.height_px()),
    ];
    for head in outside {
        let mut lethal = Snake::from_segments(&[head], Direction::Right, CELL_SIZE, &MEDIUM);
        assert!(lethal.check_wall_collision(false, &pf), "{:?}", head);

        let mut wrapping = lethal.clone();
        assert!(!wrapping.check_wall_collision(true, &pf));
        assert!(pf.contains(wrapping.head()), "{:?}", wrapping.head());
    }
}

#[test]
fn test_wrap_keeps_inside_head_in_place() {
    let pf = Playfield::default();
    let mut snake = straight_snake((10, 10), 3, Direction::Up);
    assert!(!snake.check_wall_collision(true, &pf));
    assert_eq!(snake.head(), GridPos::from_cell(10, 10));
    assert!(!snake.check_wall_collision(false, &pf));
}

#[test]
fn test_self_collision_only_when_head_repeats() {
    for len in 1..10 {
        let snake = straight_snake((20, 20), len, Direction::Right);
        assert!(!snake.check_self_collision(), "len {}", len);
    }

    // Turning around in a tight square bites the body.
    let mut snake = straight_snake((10, 10), 5, Direction::Right);
    for dir in [Direction::Down, Direction::Left, Direction::Up] {
        assert!(snake.change_direction(dir));
        snake.advance();
    }
    assert!(snake.check_self_collision());
}
