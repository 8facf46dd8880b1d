//! Terminal snake runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from the term
//! crate. The loop sleeps in `event::poll` until the next tick is due; the
//! tick interval follows the snake's speed while a run is active.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn, LevelFilter};

use tui_snake::core::{GameSnapshot, GameState};
use tui_snake::input::{handle_key_event, should_quit, CommandQueue};
use tui_snake::logging::{init_file_logger, LogSink};
use tui_snake::options::{LaunchOptions, USAGE};
use tui_snake::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_snake::types::{DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};

fn main() -> Result<()> {
    let options = LaunchOptions::from_process()?;
    if options.help {
        println!("{}", USAGE);
        return Ok(());
    }

    if let Some(path) = &options.log_path {
        init_file_logger(path, LevelFilter::Debug)?;
    }
    for warning in &options.warnings {
        warn!("{}", warning);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &options);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("exiting with error: {:#}", e);
    }
    result
}

fn run(term: &mut TerminalRenderer, options: &LaunchOptions) -> Result<()> {
    let view = GameView::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let fitted = view.fit_playfield(Viewport::new(w, h), (DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS));
    let config = options.game_config(fitted);
    info!(
        "starting: {}x{} cells, difficulty {}, seed {}",
        config.playfield.cols,
        config.playfield.rows,
        config.difficulty.as_str(),
        config.seed
    );

    let mut game = GameState::new(config);
    let mut queue = CommandQueue::new();
    let mut sink = LogSink;
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(w, h);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input until the next tick is due.
        let interval = Duration::from_millis(game.tick_interval_ms() as u64);
        let timeout = interval.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("ctrl-c, exiting");
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        queue.push(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= interval {
            last_tick = Instant::now();

            for command in queue.drain() {
                game.apply_command(command);
            }
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.tick(elapsed_ms);
            game.drain_events_into(&mut sink);

            if game.quit_requested() {
                info!("quit from {}", game.phase().as_str());
                return Ok(());
            }
        }
    }
}
