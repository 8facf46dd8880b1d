//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previously presented frame and only changed
//! runs of cells are rewritten. A size change or [`TerminalRenderer::invalidate`]
//! forces a full redraw.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    prev: FrameBuffer,
    full_redraw: bool,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            prev: FrameBuffer::new(0, 0),
            full_redraw: true,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.full_redraw = true;
        Ok(())
    }

    /// Undo everything `enter` did.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next present to redraw everything (terminal resize).
    pub fn invalidate(&mut self) {
        self.full_redraw = true;
    }

    /// Present a frame and swap it with the previous one.
    ///
    /// After the call `fb` holds stale contents from the last frame; callers
    /// are expected to redraw it completely before the next present, which
    /// [`GameView::render_into`](crate::GameView::render_into) does.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<usize> {
        self.buf.clear();
        let resized = (self.prev.width(), self.prev.height()) != (fb.width(), fb.height());
        if self.full_redraw || resized {
            encode_full_into(fb, &mut self.buf)?;
            self.full_redraw = false;
        } else {
            encode_diff_into(&self.prev, fb, &mut self.buf)?;
        }
        let written = self.buf.len();
        self.flush_buf()?;

        std::mem::swap(&mut self.prev, fb);
        Ok(written)
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Remembers the last style sent so unchanged styles are not re-sent.
#[derive(Default)]
struct StyleState {
    current: Option<CellStyle>,
}

impl StyleState {
    fn print(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        if self.current != Some(cell.style) {
            let style = cell.style;
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.current = Some(style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut style = StyleState::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for &cell in fb.row(y) {
            style.print(out, cell)?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the runs of cells that differ from `prev`.
///
/// Both buffers must have the same dimensions.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = StyleState::default();
    for y in 0..next.height() {
        let row = next.row(y);
        for (start, len) in changed_runs(prev.row(y), row) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for &cell in &row[start..start + len] {
                style.print(out, cell)?;
            }
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// `(start, len)` of each maximal run where the rows differ.
///
/// Cells missing from `prev` count as changed.
fn changed_runs<'a>(prev: &'a [Cell], next: &'a [Cell]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let differs = move |x: usize| prev.get(x) != Some(&next[x]);
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < next.len() && !differs(x) {
            x += 1;
        }
        if x >= next.len() {
            return None;
        }
        let start = x;
        while x < next.len() && differs(x) {
            x += 1;
        }
        Some((start, x - start))
    })
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
