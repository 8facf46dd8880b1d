//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each playfield cell is drawn `cell_w` columns wide and `cell_h` rows tall.
//! Layers, bottom to top: background dots, blast areas, bombs, power-ups,
//! food, snake, overlay.

use crate::core::{BombSnapshot, GameSnapshot, Playfield};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    Expression, GamePhase, GridPos, PowerUpKind, BOMB_COUNTDOWN_TICKS, BOMB_HIT_WINDOW_TICKS,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Columns reserved to the right of the board for the status panel
pub const PANEL_WIDTH: u16 = 24;

/// Power-ups start blinking when they are about to vanish
const POWERUP_BLINK_MS: u64 = 3_000;

const BOARD_BG: Rgb = Rgb::new(20, 24, 28);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the snake game.
pub struct GameView {
    /// Playfield cell width in terminal columns.
    cell_w: u16,
    /// Playfield cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 keeps cells roughly square with typical terminal glyphs.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Where the board interior starts on screen
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Framebuffer size needed for `playfield` including border and panel
    pub fn required_size(&self, playfield: &Playfield) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size(playfield);
        (frame_w.saturating_add(2 + PANEL_WIDTH), frame_h)
    }

    /// Largest playfield (in cells) that fits `viewport`, never above `max`.
    pub fn fit_playfield(&self, viewport: Viewport, max: (u16, u16)) -> (u16, u16) {
        let avail_w = viewport.width.saturating_sub(2 + 2 + PANEL_WIDTH);
        let avail_h = viewport.height.saturating_sub(2);
        (
            (avail_w / self.cell_w).min(max.0),
            (avail_h / self.cell_h).min(max.1),
        )
    }

    fn frame_size(&self, playfield: &Playfield) -> (u16, u16) {
        (
            playfield.cols.saturating_mul(self.cell_w).saturating_add(2),
            playfield.rows.saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(&snap.playfield);
        let total_w = frame_w.saturating_add(2 + PANEL_WIDTH);
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        let origin = Origin {
            x: start_x + 1,
            y: start_y + 1,
        };

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);
        self.draw_background(fb, origin, &snap.playfield);

        for bomb in &snap.bombs {
            if bomb.exploded {
                self.draw_blast(fb, origin, &snap.playfield, bomb);
            }
        }
        for bomb in &snap.bombs {
            if !bomb.exploded {
                let digit = countdown_digit(bomb.countdown);
                let style = CellStyle::new(Rgb::new(255, 140, 40), BOARD_BG).bold();
                self.draw_glyph(fb, origin, &snap.playfield, bomb.position, ['●', digit], style);
            }
        }

        for p in &snap.powerups {
            let (glyph, color) = powerup_glyph(p.kind);
            let mut style = CellStyle::new(color, BOARD_BG).bold();
            if p.remaining_ms < POWERUP_BLINK_MS && (p.remaining_ms / 250) % 2 == 1 {
                style = style.dim();
            }
            self.draw_glyph(fb, origin, &snap.playfield, p.position, glyph, style);
        }

        let food = CellStyle::new(Rgb::new(230, 60, 60), BOARD_BG).bold();
        self.draw_glyph(fb, origin, &snap.playfield, snap.food, ['◆', ' '], food);

        self.draw_snake(fb, origin, snap);
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, viewport, panel_x, start_y);

        match snap.phase {
            GamePhase::Menu => {
                let lines = [
                    "S N A K E",
                    "",
                    snap.selected_difficulty.name(),
                    "",
                    "[space] start",
                    "[d] difficulty",
                    "[q] quit",
                ];
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &lines);
            }
            GamePhase::Paused => {
                let lines = ["PAUSED", "", "[p] resume", "[m] menu"];
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &lines);
            }
            GamePhase::GameOver => {
                let lines = ["GAME OVER", "", "[r] menu", "[q] quit"];
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &lines);
            }
            GamePhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::new(Rgb::new(120, 200, 120), PANEL_BG);
        let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));

        // Writes past the framebuffer are clipped, so stop at its edge.
        for dx in 1..(w - 1).min(fb.width()) {
            fb.put_char(x.saturating_add(dx), y, '═', style);
            fb.put_char(x.saturating_add(dx), bottom, '═', style);
        }
        for dy in 1..(h - 1).min(fb.height()) {
            fb.put_char(x, y.saturating_add(dy), '║', style);
            fb.put_char(right, y.saturating_add(dy), '║', style);
        }
        fb.put_char(x, y, '╔', style);
        fb.put_char(right, y, '╗', style);
        fb.put_char(x, bottom, '╚', style);
        fb.put_char(right, bottom, '╝', style);
    }

    fn draw_background(&self, fb: &mut FrameBuffer, origin: Origin, playfield: &Playfield) {
        let dot = CellStyle::new(Rgb::new(60, 66, 72), BOARD_BG).dim();
        fb.fill_rect(
            origin.x,
            origin.y,
            playfield.cols.saturating_mul(self.cell_w).min(fb.width()),
            playfield.rows.saturating_mul(self.cell_h).min(fb.height()),
            ' ',
            dot,
        );
        let visible_cols = playfield.cols.min(fb.width() / self.cell_w + 1);
        let visible_rows = playfield.rows.min(fb.height() / self.cell_h + 1);
        for row in 0..visible_rows {
            for col in 0..visible_cols {
                fb.put_char(origin.x + col * self.cell_w, origin.y + row * self.cell_h, '·', dot);
            }
        }
    }

    /// Paint every cell within the blast radius. Bright while it can still hit.
    fn draw_blast(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        playfield: &Playfield,
        bomb: &BombSnapshot,
    ) {
        let (ch, style) = if bomb.explosion_timer < BOMB_HIT_WINDOW_TICKS {
            ('▓', CellStyle::new(Rgb::new(255, 200, 60), Rgb::new(160, 40, 0)).bold())
        } else {
            ('░', CellStyle::new(Rgb::new(120, 70, 40), BOARD_BG).dim())
        };

        let cs = playfield.cell_size;
        let reach = bomb.radius / cs;
        let r2 = (bomb.radius as i64) * (bomb.radius as i64);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let pos = GridPos::new(bomb.position.x + dx * cs, bomb.position.y + dy * cs);
                if bomb.position.distance_sq(pos) < r2 {
                    self.draw_glyph(fb, origin, playfield, pos, [ch, ch], style);
                }
            }
        }
    }

    fn draw_snake(&self, fb: &mut FrameBuffer, origin: Origin, snap: &GameSnapshot) {
        let body_a = CellStyle::new(Rgb::new(60, 200, 90), BOARD_BG);
        let body_b = CellStyle::new(Rgb::new(40, 170, 70), BOARD_BG);

        // Tail first so the head wins if segments overlap.
        for (i, &pos) in snap.snake.iter().enumerate().skip(1).rev() {
            let style = if i % 2 == 0 { body_a } else { body_b };
            self.draw_glyph(fb, origin, &snap.playfield, pos, ['█', '█'], style);
        }

        if let Some(head) = snap.head() {
            let bg = if snap.shield_active {
                Rgb::new(60, 200, 230)
            } else {
                Rgb::new(90, 230, 110)
            };
            let style = CellStyle::new(Rgb::new(10, 20, 10), bg).bold();
            let face = expression_face(snap.expression);
            self.draw_glyph(fb, origin, &snap.playfield, head, face, style);
        }
    }

    /// Draw a two-glyph cell at a playfield position; positions off the field are skipped.
    fn draw_glyph(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        playfield: &Playfield,
        pos: GridPos,
        glyph: [char; 2],
        style: CellStyle,
    ) {
        if !playfield.contains(pos) {
            return;
        }
        let (col, row) = pos.cell(playfield.cell_size);
        let px = (col as u16).saturating_mul(self.cell_w).saturating_add(origin.x);
        let py = (row as u16).saturating_mul(self.cell_h).saturating_add(origin.y);
        for dy in 0..self.cell_h {
            for dx in 0..self.cell_w {
                let ch = glyph[(dx as usize).min(1)];
                fb.put_char(px.saturating_add(dx), py.saturating_add(dy), ch, style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let faint = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x, y + 1, snap.speed, value);
        y += 3;

        fb.put_str(panel_x, y, "COMBO", label);
        let x = fb.put_u32(panel_x, y + 1, snap.combo, value);
        if snap.combo >= 2 {
            fb.put_str(x + 1, y + 1, "x combo!", label);
        }
        y += 3;

        fb.put_str(panel_x, y, "BOMBS", label);
        if snap.bombs_max == 0 {
            fb.put_str(panel_x, y + 1, "off", faint);
        } else {
            let mut x = fb.put_u32(panel_x, y + 1, snap.bombs_available, value);
            x = fb.put_str(x, y + 1, "/", value);
            x = fb.put_u32(x, y + 1, snap.bombs_max, value);
            if snap.bomb_cooldown > 0 {
                fb.put_str(x + 1, y + 1, "(cooling)", faint);
            }
        }
        y += 3;

        fb.put_str(panel_x, y, "EFFECTS", label);
        y += 1;
        if snap.effects.is_empty() {
            fb.put_str(panel_x, y, "-", faint);
            y += 1;
        }
        for effect in &snap.effects {
            let (_, color) = powerup_glyph(effect.kind);
            let style = CellStyle::new(color, PANEL_BG);
            let mut x = fb.put_str(panel_x, y, effect.kind.label(), style);
            x = fb.put_u32(x + 1, y, (effect.remaining_ms / 1000) as u32, value);
            x = fb.put_str(x, y, ".", value);
            x = fb.put_u32(x, y, ((effect.remaining_ms % 1000) / 100) as u32, value);
            fb.put_str(x, y, "s", value);
            y += 1;
        }
        y += 1;

        fb.put_str(panel_x, y, "DIFFICULTY", label);
        fb.put_str(panel_x, y + 1, snap.difficulty.name(), value);
        y += 3;

        if let Some(event) = snap.last_event {
            fb.put_str(panel_x, y, event.describe(), label);
        }
        y += 2;

        for help in ["arrows/hjkl steer", "b bomb  p pause", "m menu  q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, help, faint);
            y += 1;
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let box_w = lines
            .iter()
            .map(|l| l.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 4;
        let box_h = lines.len() as u16 + 2;
        let box_x = start_x.saturating_add(frame_w.saturating_sub(box_w) / 2);
        let box_y = start_y.saturating_add(frame_h.saturating_sub(box_h) / 2);

        let shade = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
        fb.fill_rect(box_x, box_y, box_w, box_h, ' ', shade);
        for (i, line) in lines.iter().enumerate() {
            let style = if i == 0 { shade.bold() } else { shade };
            fb.put_str_centered(box_x, box_w, box_y + 1 + i as u16, line, style);
        }
    }
}

/// 3, 2, 1 over the countdown
fn countdown_digit(countdown: u32) -> char {
    let third = (countdown * 3).div_ceil(BOMB_COUNTDOWN_TICKS).clamp(1, 3);
    char::from_digit(third, 10).unwrap_or('?')
}

fn powerup_glyph(kind: PowerUpKind) -> ([char; 2], Rgb) {
    match kind {
        PowerUpKind::SlowPotion => (['S', '~'], Rgb::new(120, 140, 255)),
        PowerUpKind::Shield => (['[', ']'], Rgb::new(60, 220, 240)),
        PowerUpKind::DoubleScore => (['x', '2'], Rgb::new(250, 220, 60)),
    }
}

fn expression_face(expression: Expression) -> [char; 2] {
    match expression {
        Expression::Normal => ['o', 'o'],
        Expression::Happy => ['^', '^'],
        Expression::Excited => ['*', '*'],
        Expression::Worried => ['>', '<'],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_digit_counts_down() {
        assert_eq!(countdown_digit(BOMB_COUNTDOWN_TICKS), '3');
        assert_eq!(countdown_digit(BOMB_COUNTDOWN_TICKS / 2), '2');
        assert_eq!(countdown_digit(1), '1');
        assert_eq!(countdown_digit(0), '1');
    }

    #[test]
    fn oversized_playfield_is_clipped() {
        let snap = GameSnapshot {
            playfield: Playfield::new(40_000, 40_000),
            snake: vec![GridPos::from_cell(30_000, 4), GridPos::from_cell(4, 4)],
            food: GridPos::from_cell(39_999, 39_999),
            ..GameSnapshot::default()
        };
        let view = GameView::default();
        assert_eq!(view.required_size(&snap.playfield), (u16::MAX, 40_002));

        let fb = view.render(&snap, Viewport::new(80, 24));
        assert_eq!(fb.get(0, 0).unwrap().ch, '╔');
        assert_eq!(fb.get(9, 5).unwrap().ch, '█');
    }

    #[test]
    fn fit_playfield_respects_cap() {
        let view = GameView::default();
        assert_eq!(view.fit_playfield(Viewport::new(400, 100), (48, 36)), (48, 36));
        assert_eq!(view.fit_playfield(Viewport::new(80, 24), (48, 36)), (26, 22));
    }
}
