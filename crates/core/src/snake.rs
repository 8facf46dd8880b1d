//! Snake module - body, movement, steering, collisions and combo tracking
//!
//! The body is stored head-first. Moving pushes a new head and drops the tail
//! unless a growth is pending, so the body always stays a chain of cells that
//! differ by exactly one step on one axis (wrap-around excepted).

use std::collections::VecDeque;

use crate::config::Playfield;
use crate::difficulty::DifficultySettings;
use crate::types::{
    Direction, Expression, GridPos, EXCITED_COMBO_THRESHOLD, EXCITED_EXPRESSION_TICKS,
    HAPPY_EXPRESSION_TICKS,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<GridPos>,
    direction: Direction,
    cell_size: i32,
    speed: u32,
    max_speed: u32,
    speed_increment: u32,
    grow_pending: bool,
    combo_count: u32,
    expression: Expression,
    expression_timer: u32,
}

impl Snake {
    /// Create a snake of `length` segments with its head at `head`, facing right.
    ///
    /// The remaining segments trail off to the left of the head.
    pub fn new(
        head: GridPos,
        length: usize,
        cell_size: i32,
        settings: &DifficultySettings,
    ) -> Self {
        let length = length.max(1);
        let body = (0..length as i32)
            .map(|i| GridPos::new(head.x - i * cell_size, head.y))
            .collect();
        Self::with_body(body, Direction::Right, cell_size, settings)
    }

    /// Create a snake from an explicit head-first body.
    pub fn from_segments(
        segments: &[GridPos],
        direction: Direction,
        cell_size: i32,
        settings: &DifficultySettings,
    ) -> Self {
        Self::with_body(segments.iter().copied().collect(), direction, cell_size, settings)
    }

    fn with_body(
        body: VecDeque<GridPos>,
        direction: Direction,
        cell_size: i32,
        settings: &DifficultySettings,
    ) -> Self {
        Self {
            body,
            direction,
            cell_size,
            speed: settings.initial_speed,
            max_speed: settings.max_speed,
            speed_increment: settings.speed_increment,
            grow_pending: false,
            combo_count: 0,
            expression: Expression::Normal,
            expression_timer: 0,
        }
    }

    pub fn head(&self) -> GridPos {
        self.body.front().copied().unwrap_or_default()
    }

    pub fn segments(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn max_speed(&self) -> u32 {
        self.max_speed
    }

    /// Overwrite the speed (power-up effects). Not clamped to `max_speed`.
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed;
    }

    pub fn grow_pending(&self) -> bool {
        self.grow_pending
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn expression(&self) -> Expression {
        self.expression
    }

    /// True if any segment sits on `pos`
    pub fn occupies(&self, pos: GridPos) -> bool {
        self.body.contains(&pos)
    }

    /// Where the head will be after the next move (before any wrapping)
    pub fn next_head(&self) -> GridPos {
        self.head().step(self.direction, self.cell_size)
    }

    /// Move one cell in the current direction. No bounds checking.
    pub fn advance(&mut self) {
        let new_head = self.next_head();
        self.body.push_front(new_head);

        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Steer; the exact reverse of the current direction is rejected.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Register a food item: grow on the next move, speed up, extend the combo.
    ///
    /// Returns true if the speed actually increased.
    pub fn grow(&mut self) -> bool {
        self.grow_pending = true;

        let before = self.speed;
        self.speed = self
            .speed
            .saturating_add(self.speed_increment)
            .min(self.max_speed);

        self.combo_count += 1;
        if self.combo_count >= EXCITED_COMBO_THRESHOLD {
            self.set_expression(Expression::Excited, EXCITED_EXPRESSION_TICKS);
        } else {
            self.set_expression(Expression::Happy, HAPPY_EXPRESSION_TICKS);
        }

        self.speed > before
    }

    pub fn reset_combo(&mut self) {
        self.combo_count = 0;
    }

    fn set_expression(&mut self, expression: Expression, ticks: u32) {
        self.expression = expression;
        self.expression_timer = ticks;
    }

    /// Per-tick expression decay.
    ///
    /// Timed expressions (happy/excited) run out first; afterwards the snake
    /// looks worried while `danger_ahead` holds and normal otherwise.
    pub fn update_expression(&mut self, danger_ahead: bool) {
        if self.expression_timer > 0 {
            self.expression_timer -= 1;
            return;
        }
        self.expression = if danger_ahead {
            Expression::Worried
        } else {
            Expression::Normal
        };
    }

    /// True iff the head occurs again further down the body
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&p| p == head)
    }

    /// Wall check.
    ///
    /// With `wrap_enabled` the head is teleported to the opposite edge and the
    /// result is always false. Otherwise true iff the head left the field.
    pub fn check_wall_collision(&mut self, wrap_enabled: bool, playfield: &Playfield) -> bool {
        if wrap_enabled {
            if let Some(head) = self.body.front_mut() {
                *head = playfield.wrap(*head);
            }
            return false;
        }
        !playfield.contains(self.head())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::MEDIUM;
    use crate::types::CELL_SIZE;

    fn snake_at(col: i32, row: i32, len: usize) -> Snake {
        Snake::new(GridPos::from_cell(col, row), len, CELL_SIZE, &MEDIUM)
    }

    #[test]
    fn test_new_snake_layout() {
        let snake = snake_at(4, 4, 3);
        let body: Vec<_> = snake.segments().collect();
        assert_eq!(
            body,
            vec![
                GridPos::from_cell(4, 4),
                GridPos::from_cell(3, 4),
                GridPos::from_cell(2, 4)
            ]
        );
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.speed(), MEDIUM.initial_speed);
        assert!(!snake.check_self_collision());
    }

    #[test]
    fn test_advance_keeps_length() {
        let mut snake = snake_at(4, 4, 3);
        snake.advance();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), GridPos::from_cell(5, 4));
    }

    #[test]
    fn test_advance_after_grow_adds_one_segment() {
        let mut snake = snake_at(4, 4, 3);
        snake.grow();
        assert!(snake.grow_pending());
        assert_eq!(snake.len(), 3);

        snake.advance();
        assert_eq!(snake.len(), 4);
        assert!(!snake.grow_pending());

        snake.advance();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_consecutive_segments_are_adjacent() {
        let mut snake = snake_at(4, 4, 3);
        for (i, dir) in [Direction::Down, Direction::Left, Direction::Down, Direction::Right]
            .into_iter()
            .enumerate()
        {
            snake.change_direction(dir);
            if i % 2 == 0 {
                snake.grow();
            }
            snake.advance();
        }
        let body: Vec<_> = snake.segments().collect();
        for pair in body.windows(2) {
            let dx = (pair[0].x - pair[1].x).abs();
            let dy = (pair[0].y - pair[1].y).abs();
            assert_eq!(dx + dy, CELL_SIZE, "{:?}", pair);
            assert!(dx == 0 || dy == 0);
        }
    }

    #[test]
    fn test_reverse_direction_rejected() {
        let mut snake = snake_at(4, 4, 3);
        assert!(!snake.change_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Right);

        assert!(snake.change_direction(Direction::Up));
        assert!(!snake.change_direction(Direction::Down));
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn test_grow_updates_speed_and_combo() {
        let mut snake = snake_at(4, 4, 3);
        assert!(snake.grow());
        assert_eq!(snake.speed(), MEDIUM.initial_speed + MEDIUM.speed_increment);
        assert_eq!(snake.combo_count(), 1);
        assert_eq!(snake.expression(), Expression::Happy);

        snake.grow();
        snake.grow();
        assert_eq!(snake.combo_count(), 3);
        assert_eq!(snake.expression(), Expression::Excited);

        snake.reset_combo();
        assert_eq!(snake.combo_count(), 0);
    }

    #[test]
    fn test_grow_does_not_raise_speed_past_max() {
        let mut snake = snake_at(4, 4, 3);
        snake.set_speed(MEDIUM.max_speed);
        assert!(!snake.grow());
        assert_eq!(snake.speed(), MEDIUM.max_speed);
    }

    #[test]
    fn test_expression_decays() {
        let mut snake = snake_at(4, 4, 3);
        snake.grow();
        for _ in 0..HAPPY_EXPRESSION_TICKS {
            snake.update_expression(false);
            assert_eq!(snake.expression(), Expression::Happy);
        }
        snake.update_expression(false);
        assert_eq!(snake.expression(), Expression::Normal);

        snake.update_expression(true);
        assert_eq!(snake.expression(), Expression::Worried);
    }

    #[test]
    fn test_self_collision_detected() {
        // Head at (2,2) revisits a body cell.
        let body = [
            GridPos::from_cell(2, 2),
            GridPos::from_cell(3, 2),
            GridPos::from_cell(3, 3),
            GridPos::from_cell(2, 3),
            GridPos::from_cell(2, 2),
        ];
        let snake = Snake::from_segments(&body, Direction::Up, CELL_SIZE, &MEDIUM);
        assert!(snake.check_self_collision());
    }

    #[test]
    fn test_single_segment_never_self_collides() {
        let snake = snake_at(4, 4, 1);
        assert!(!snake.check_self_collision());
    }

    #[test]
    fn test_wall_collision_without_wrap() {
        let pf = Playfield::default();
        let mut snake = Snake::from_segments(
            &[GridPos::new(-25, 100), GridPos::new(0, 100)],
            Direction::Left,
            CELL_SIZE,
            &MEDIUM,
        );
        assert!(snake.check_wall_collision(false, &pf));
        assert_eq!(snake.head(), GridPos::new(-25, 100));
    }

    #[test]
    fn test_wall_wrap_teleports_head() {
        let pf = Playfield::default();
        let mut snake = Snake::from_segments(
            &[GridPos::new(1200, 100), GridPos::new(1175, 100)],
            Direction::Right,
            CELL_SIZE,
            &MEDIUM,
        );
        assert!(!snake.check_wall_collision(true, &pf));
        assert_eq!(snake.head(), GridPos::new(0, 100));
    }
}
