//! BLOCKFALL - a falling-block puzzle for the terminal
//!
//! The engine modules own all game state; this binary is the host: it maps
//! key events to engine signals, feeds the engine elapsed time once per
//! frame, and draws the result.

mod board;
mod game;
mod input;
mod piece;
mod randomizer;
mod rotation;
mod score;
mod settings;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{Action, Game, GameEvent};
use input::InputHandler;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // Setup tracing to a log file in the temp directory
    let log_dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockfall=debug".parse().unwrap()),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    // Persist settings so the file exists for editing
    if let Err(e) = settings.save() {
        tracing::warn!("Could not save settings: {}", e);
    }

    if let Ok(game) = &result {
        println!("Thanks for playing BLOCKFALL!");
        println!("Final Score: {}", game.progress.score);
        println!(
            "Level: {} | Lines: {}",
            game.progress.level, game.progress.lines
        );
    }

    result.map(|_| ())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> io::Result<Game> {
    let mut game = Game::new();
    let mut input = InputHandler::from_settings(settings);
    let mut last_frame = Instant::now();

    loop {
        // Handle input; poll doubles as the frame pacer
        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                let actions = match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => input.key_down(key),
                    KeyEventKind::Release => input.key_up(key),
                };
                for action in actions {
                    if action == Action::Quit {
                        return Ok(game);
                    }
                    game.apply(action);
                }
            }
        }
        for action in input.update() {
            game.apply(action);
        }

        // Advance gravity by the elapsed frame time
        let now = Instant::now();
        game.tick(now - last_frame);
        last_frame = now;

        for event in game.drain_events() {
            match event {
                GameEvent::StatsUpdated {
                    score,
                    level,
                    lines,
                } => {
                    tracing::debug!(score, level, lines, "stats updated");
                }
                GameEvent::GameOver { score } => {
                    tracing::info!(score, "game over");
                }
            }
        }

        terminal.draw(|frame| ui::render_game(frame, &game, settings))?;
    }
}
