//! Run lifecycle: start, pause, reset and difficulty changes, tied to the
//! tick schedule, plus event delivery to renderers and notifiers.

use std::time::Instant;

use log::{debug, info, trace};

use crate::config::{Difficulty, GameConfig, GridSize, SpeedTable};
use crate::game::{GameState, GameStateView, RunState, TickOutcome};
use crate::input::Direction;
use crate::schedule::TickSchedule;

/// Receives simulation events from [`Session::poll`].
pub trait GameObserver {
    /// Called after every tick with the post-tick snapshot.
    fn on_tick(&mut self, outcome: TickOutcome, view: &GameStateView<'_>);

    /// Called once per run when it ends, with the final score.
    fn on_game_over(&mut self, final_score: u32);
}

/// Owns the game state and the schedule that advances it.
#[derive(Debug)]
pub struct Session {
    state: GameState,
    difficulty: Difficulty,
    speeds: SpeedTable,
    schedule: TickSchedule,
}

impl Session {
    /// Creates an idle session. A `seed` makes food placement reproducible.
    #[must_use]
    pub fn new(bounds: GridSize, config: GameConfig, seed: Option<u64>) -> Self {
        let mut state = match seed {
            Some(seed) => GameState::new_with_seed(bounds, seed),
            None => GameState::new(bounds),
        };
        state.wrap_walls = config.wrap_walls;

        info!(
            "session created: {}x{} grid, {} difficulty, wrap {}",
            bounds.width, bounds.height, config.difficulty, config.wrap_walls
        );

        Self {
            state,
            difficulty: config.difficulty,
            speeds: config.speeds,
            schedule: TickSchedule::new(),
        }
    }

    /// Current settings, including wrap mode.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        GameConfig {
            wrap_walls: self.state.wrap_walls,
            difficulty: self.difficulty,
            speeds: self.speeds,
        }
    }

    #[must_use]
    pub fn status(&self) -> RunState {
        self.state.status
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scripted setups; bypasses lifecycle rules.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn view(&self) -> GameStateView<'_> {
        self.state.view()
    }

    #[must_use]
    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    /// Any state → Idle with a fresh snake and food. Stops the schedule.
    pub fn reset(&mut self) {
        self.schedule.stop();
        self.state.reset();
        info!("session reset");
    }

    /// Idle → Running. Does nothing in any other state.
    pub fn start(&mut self, now: Instant) {
        if self.state.status != RunState::Idle {
            return;
        }

        self.state.status = RunState::Running;
        self.schedule.start(self.config().tick_interval(), now);
        info!("run started at {} difficulty", self.difficulty);
    }

    /// Reset followed by start.
    pub fn restart(&mut self, now: Instant) {
        self.reset();
        self.start(now);
    }

    /// Running ⇄ Paused. Resuming re-arms the schedule at the current
    /// difficulty. Does nothing in other states.
    pub fn toggle_pause(&mut self, now: Instant) {
        match self.state.status {
            RunState::Running => {
                self.schedule.stop();
                self.state.status = RunState::Paused;
                info!("paused");
            }
            RunState::Paused => {
                self.state.status = RunState::Running;
                self.schedule.start(self.config().tick_interval(), now);
                info!("resumed");
            }
            RunState::Idle | RunState::GameOver | RunState::BoardFilled => {}
        }
    }

    /// Selects a difficulty. While running the schedule is restarted at the
    /// new interval immediately; otherwise it applies on the next start.
    pub fn set_difficulty(&mut self, difficulty: Difficulty, now: Instant) {
        self.difficulty = difficulty;
        if self.state.status == RunState::Running {
            self.schedule.restart(self.config().tick_interval(), now);
        }
        debug!("difficulty set to {difficulty}");
    }

    /// Replaces the difficulty-to-interval mapping.
    pub fn set_speeds(&mut self, speeds: SpeedTable, now: Instant) {
        self.speeds = speeds;
        self.set_difficulty(self.difficulty, now);
    }

    /// Takes effect on the next tick.
    pub fn set_wrap_walls(&mut self, wrap_walls: bool) {
        self.state.wrap_walls = wrap_walls;
        debug!("wrap walls set to {wrap_walls}");
    }

    /// Stores a direction intent; reversals are filtered at tick time.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.state.set_pending_direction(direction);
    }

    /// Runs one tick if the schedule is due and reports it to `observer`.
    pub fn poll(&mut self, now: Instant, observer: &mut dyn GameObserver) -> Option<TickOutcome> {
        if self.state.status != RunState::Running || !self.schedule.poll(now) {
            return None;
        }

        let outcome = self.state.tick();
        trace!("tick {} -> {outcome:?}", self.state.tick_count);

        if self.state.status.is_terminal() {
            self.schedule.stop();
        }

        observer.on_tick(outcome, &self.state.view());
        if matches!(outcome, TickOutcome::GameOver | TickOutcome::BoardFilled) {
            observer.on_game_over(self.state.score);
        }

        Some(outcome)
    }
}
