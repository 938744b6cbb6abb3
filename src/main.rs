//! BLOCKFALL - terminal front end
//!
//! Owns the terminal, the frame clock, and key input; everything else is the
//! `blockfall` library.

mod input;
mod ui;

use blockfall::Game;
use blockfall::settings::Settings;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::{Command, KeyBindings};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Falling-block puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about)]
struct Args {
    /// Seed for the piece sequence (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to read instead of the platform config location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Hide the landing preview
    #[arg(long)]
    no_ghost: bool,
}

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // Setup tracing to log file; the terminal belongs to the UI
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blockfall=debug"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    if args.no_ghost {
        settings.visual.show_ghost = false;
    }
    let seed = args.seed.or(settings.gameplay.seed);
    let mut game = match seed {
        Some(seed) => {
            tracing::info!("Using fixed seed {}", seed);
            Game::with_seed(seed)
        }
        None => Game::new(),
    };
    let bindings = KeyBindings::from_settings(&settings);

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &mut game, &bindings, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = &result {
        tracing::error!("Game loop failed: {}", e);
    }

    let state = game.state();
    println!("\nThanks for playing BLOCKFALL!");
    println!("Final Score: {}", state.score);
    println!("Level: {} | Lines: {}", state.level, state.lines);

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    bindings: &KeyBindings,
    settings: &Settings,
) -> io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        // One simulation step per frame
        let now = Instant::now();
        game.advance(now.duration_since(last_frame));
        last_frame = now;

        terminal.draw(|frame| ui::render_game(frame, game, settings))?;

        // Handle input until the frame is due
        let deadline = last_frame + FRAME_DURATION;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match bindings.command_for(key) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Game(action)) => game.apply(action),
                None => {}
            }
        }
    }
}
