use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::event::KeyEvent;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wrap_snake::config::{
    CollisionPolicy, DEFAULT_BOARD_SIZE, DEFAULT_FOOD_REWARD, DEFAULT_INITIAL_LENGTH,
    DEFAULT_TICK_INTERVAL_MS, GameConfig,
};
use wrap_snake::game::{GameEngine, GameError, TickOutcome};
use wrap_snake::input::{GameInput, is_interrupt, map_key_event};
use wrap_snake::leaderboard::{FileLeaderboard, Leaderboard};
use wrap_snake::renderer;
use wrap_snake::terminal_runtime::{TerminalSession, restore_terminal};
use wrap_snake::ui::{NameInput, NameInputEvent, Overlay};

/// Snake on a wrapping grid.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Side length of the square board.
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    board_size: u16,

    /// Number of segments the snake starts with.
    #[arg(long, default_value_t = DEFAULT_INITIAL_LENGTH)]
    initial_length: usize,

    /// Points awarded per food eaten.
    #[arg(long, default_value_t = DEFAULT_FOOD_REWARD)]
    food_reward: u32,

    /// Milliseconds between ticks.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Leaderboard file; defaults to the platform data directory.
    #[arg(long)]
    scores_file: Option<PathBuf>,

    /// Write logs to this file. Filter with RUST_LOG.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Whether moving into the cell the tail is leaving counts as a collision.
    #[arg(long, value_enum, default_value_t = TailCollision::Strict)]
    tail_collision: TailCollision,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum TailCollision {
    /// The tail still blocks its cell during the tick it leaves.
    Strict,
    /// The tail's cell is free unless the snake grows.
    Lenient,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            board_size: self.board_size,
            initial_length: self.initial_length,
            food_reward: self.food_reward,
            collision_policy: match self.tail_collision {
                TailCollision::Strict => CollisionPolicy::PreTickOccupancy,
                TailCollision::Lenient => CollisionPolicy::VacatingTailIsFree,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config();
    let engine = match cli.seed {
        Some(seed) => GameEngine::new_with_seed(config, seed),
        None => GameEngine::new(config),
    }
    .map_err(engine_error)?;
    let leaderboard = cli
        .scores_file
        .clone()
        .map_or_else(FileLeaderboard::at_default_path, FileLeaderboard::new);
    info!(path = %leaderboard.path().display(), "using leaderboard file");

    install_panic_hook();

    let mut session = TerminalSession::enter()?;
    run(
        &mut session,
        engine,
        leaderboard,
        Duration::from_millis(cli.tick_ms.max(1)),
    )
}

fn run<L: Leaderboard>(
    session: &mut TerminalSession,
    mut engine: GameEngine,
    mut leaderboard: L,
    tick_interval: Duration,
) -> io::Result<()> {
    let mut overlay = Overlay::None;
    let mut last_tick = Instant::now();

    loop {
        let snapshot = engine.snapshot();
        session.draw(|frame| renderer::render(frame, &snapshot, &overlay))?;

        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if let Some(key) = session.next_key(timeout)? {
            let flow = handle_key(&key, &mut engine, &mut overlay, &mut leaderboard)
                .map_err(engine_error)?;
            if flow == Flow::Quit {
                break;
            }
        }

        if last_tick.elapsed() >= tick_interval {
            last_tick = Instant::now();
            if let TickOutcome::Ended(_) = engine.tick().map_err(engine_error)? {
                overlay = Overlay::NameEntry(NameInput::default());
            }
        }
    }

    Ok(())
}

fn handle_key<L: Leaderboard>(
    key: &KeyEvent,
    engine: &mut GameEngine,
    overlay: &mut Overlay,
    leaderboard: &mut L,
) -> Result<Flow, GameError> {
    if is_interrupt(key) {
        return Ok(Flow::Quit);
    }

    if let Overlay::NameEntry(input) = overlay {
        match input.apply(key) {
            NameInputEvent::Submit => {
                let name = input.value().trim().to_owned();
                if !name.is_empty() {
                    if let Err(error) = leaderboard.save_score(&name, engine.score()) {
                        warn!(%error, "failed to save score");
                    }
                }
                *overlay = Overlay::Leaderboard(leaderboard.load_top_scores());
            }
            NameInputEvent::Skip => {
                *overlay = Overlay::Leaderboard(leaderboard.load_top_scores());
            }
            NameInputEvent::Edited | NameInputEvent::Ignored => {}
        }
        return Ok(Flow::Continue);
    }

    match map_key_event(key) {
        Some(GameInput::Quit) => return Ok(Flow::Quit),
        Some(GameInput::Direction(direction)) => {
            engine.set_direction(direction);
        }
        Some(GameInput::Restart) => {
            engine.restart()?;
            *overlay = Overlay::None;
        }
        Some(GameInput::Confirm) if !engine.is_running() => {
            engine.restart()?;
            *overlay = Overlay::None;
        }
        Some(GameInput::Confirm) | None => {}
    }

    Ok(Flow::Continue)
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn engine_error(error: GameError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error)
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
