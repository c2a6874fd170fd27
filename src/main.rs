//! Terminal runner (default binary).
//!
//! Fixed-tick loop: poll input until the next tick, apply commands, advance
//! the engine by one tick, hand events to the effects layer, render.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};
use log::{debug, error, info};

use blockfall::core::{GameEvent, GameSnapshot, GameState, RulesConfig};
use blockfall::input::{map_key, InputHandler};
use blockfall::settings::Options;
use blockfall::term::{Effects, FrameBuffer, GameView, Terminal, Viewport};

fn main() -> Result<()> {
    let options = Options::parse();
    let _logger = init_logging(&options)?;

    let rules = options.load_rules()?;
    let seed = options.seed();
    info!("starting: seed {}, tick {} ms, rules {:?}", seed, options.tick_ms, rules);

    let mut term = Terminal::new();
    term.enter()?;

    let result = run(&mut term, rules, seed, options.tick_ms);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        error!("failed to restore terminal: {:#}", e);
    }
    if let Err(e) = &result {
        error!("fatal error: {:#}", e);
    }
    result
}

/// Log to a file when one is configured; the terminal is busy with the game.
fn init_logging(options: &Options) -> Result<Option<LoggerHandle>> {
    let Some(path) = &options.log_file else {
        return Ok(None);
    };
    let handle = Logger::try_with_env_or_str(options.log_spec())
        .context("invalid log specification")?
        .log_to_file(FileSpec::try_from(path).context("invalid log file path")?)
        .write_mode(WriteMode::BufferAndFlush)
        .format(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;
    Ok(Some(handle))
}

fn run(term: &mut Terminal, rules: RulesConfig, seed: u32, tick_ms: u32) -> Result<()> {
    let mut game = GameState::new(rules, seed);
    let view = GameView::default();
    let mut effects = Effects::new();
    let mut input = InputHandler::new();

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into_with_effects(&snap, Some(&effects), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).context("failed to poll terminal events")? {
            match event::read().context("failed to read terminal event")? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if let Some(command) = map_key(key).and_then(|c| input.press(c)) {
                            game.apply(command);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(command) = map_key(key) {
                            input.release(command);
                        }
                    }
                    // The repeat handler generates its own repeats.
                    KeyEventKind::Repeat => {}
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if game.quit_requested() {
            info!(
                "quit (score {}, level {}, lines {})",
                game.score(),
                game.level(),
                game.lines()
            );
            return Ok(());
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for command in input.update(tick_ms) {
                game.apply(command);
            }
            game.update(tick_ms);

            for event in game.drain_events() {
                log_event(&event);
                if event == GameEvent::Restarted {
                    input.reset();
                }
                effects.handle(&event);
            }
            effects.update(tick_ms);
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PieceLocked { kind } => debug!("locked {}", kind.as_str()),
        GameEvent::LinesCleared { rows, points } => info!("cleared rows {:?} (+{})", rows, points),
        GameEvent::LevelUp { level } => info!("level {}", level),
        GameEvent::GameOver { score } => info!("game over with {} points", score),
        GameEvent::Restarted => info!("restarted"),
    }
}
