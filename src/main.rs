use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::audio::AudioNotifier;
use grid_snake::config::{
    EASY_TICK_INTERVAL_MS, FRAME_POLL_MS, HARD_TICK_INTERVAL_MS, MEDIUM_TICK_INTERVAL_MS,
};
use grid_snake::error::AppError;
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::logging::{LogLevel, init_file_logger};
use grid_snake::score::{HighScoreStore, default_scores_path};
use grid_snake::session::{GameObserver, Session};
use grid_snake::terminal_runtime::{TerminalSession, choose_grid, terminal_size};
use grid_snake::ui::hud::HudInfo;
use grid_snake::{Difficulty, GameConfig, GameStateView, GridSize, SpeedTable, TickOutcome};
use log::{error, warn};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Grid columns; derived from the terminal width when omitted.
    #[arg(long)]
    columns: Option<u16>,
    /// Grid rows; derived from the terminal height when omitted.
    #[arg(long)]
    rows: Option<u16>,
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,
    /// Leave one edge and re-enter from the opposite one.
    #[arg(long)]
    wrap: bool,
    /// Draw grid dots on empty cells.
    #[arg(long)]
    grid: bool,
    /// Start with sound cues disabled.
    #[arg(long)]
    mute: bool,
    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = EASY_TICK_INTERVAL_MS)]
    easy_ms: u64,
    #[arg(long, default_value_t = MEDIUM_TICK_INTERVAL_MS)]
    medium_ms: u64,
    #[arg(long, default_value_t = HARD_TICK_INTERVAL_MS)]
    hard_ms: u64,
    /// High score file; defaults to the platform data directory.
    #[arg(long)]
    score_file: Option<PathBuf>,
    /// Write logs to this file; logging is off otherwise.
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

/// Forwards tick events to the sound cue and the high score store.
struct ClientObserver {
    audio: AudioNotifier<std::io::Stdout>,
    scores: HighScoreStore,
    new_high_score: bool,
}

impl GameObserver for ClientObserver {
    fn on_tick(&mut self, outcome: TickOutcome, _view: &GameStateView<'_>) {
        if let Err(error) = self.audio.notify(outcome) {
            warn!("sound cue failed: {error}");
        }
    }

    fn on_game_over(&mut self, final_score: u32) {
        match self.scores.record(final_score) {
            Ok(is_new) => self.new_high_score = is_new,
            Err(error) => {
                self.new_high_score = true;
                warn!(
                    "failed to save high score to {}: {error}",
                    self.scores.path().display()
                );
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("grid-snake: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    if let Some(path) = &cli.log_file {
        init_file_logger(path, cli.log_level)?;
    }

    let bounds = grid_size(&cli)?;
    let config = GameConfig {
        wrap_walls: cli.wrap,
        difficulty: cli.difficulty,
        speeds: SpeedTable::new(cli.easy_ms, cli.medium_ms, cli.hard_ms)?,
    };

    let score_path = cli.score_file.clone().unwrap_or_else(default_scores_path);
    let scores = match HighScoreStore::open(&score_path) {
        Ok(store) => store,
        Err(error) => {
            eprintln!(
                "Warning: could not read high score from {}: {error}",
                score_path.display()
            );
            HighScoreStore::empty(score_path)
        }
    };

    let mut session = Session::new(bounds, config, cli.seed);
    let mut observer = ClientObserver {
        audio: AudioNotifier::stdout(!cli.mute),
        scores,
        new_high_score: false,
    };
    let mut show_grid = cli.grid;

    let mut terminal_session = TerminalSession::enter()?;
    let mut input = InputHandler::new();

    loop {
        let hud_info = HudInfo {
            high_score: observer.scores.high_score(),
            new_high_score: observer.new_high_score,
            difficulty: session.config().difficulty,
            sound_enabled: observer.audio.is_enabled(),
            show_grid,
        };
        terminal_session.draw(&session.view(), &hud_info)?;

        if let Some(game_input) = input.poll_input(Duration::from_millis(FRAME_POLL_MS))? {
            let now = Instant::now();
            match game_input {
                GameInput::Quit => break,
                GameInput::Direction(direction) => session.set_pending_direction(direction),
                GameInput::Start => session.start(now),
                GameInput::Pause => session.toggle_pause(now),
                GameInput::Restart => {
                    observer.new_high_score = false;
                    session.restart(now);
                }
                GameInput::SetDifficulty(difficulty) => session.set_difficulty(difficulty, now),
                GameInput::CycleDifficulty => {
                    session.set_difficulty(session.config().difficulty.next(), now);
                }
                GameInput::ToggleWrap => session.set_wrap_walls(!session.config().wrap_walls),
                GameInput::ToggleGrid => show_grid = !show_grid,
                GameInput::ToggleSound => {
                    let enabled = !observer.audio.is_enabled();
                    observer.audio.set_enabled(enabled);
                }
            }
        }

        session.poll(Instant::now(), &mut observer);
    }

    Ok(())
}

fn grid_size(cli: &Cli) -> Result<GridSize, AppError> {
    let terminal = match (cli.columns, cli.rows) {
        (Some(_), Some(_)) => None,
        _ => terminal_size(),
    };

    Ok(choose_grid(cli.columns, cli.rows, terminal)?)
}
