use std::collections::HashSet;

use log::{info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GridSize;
use crate::error::PlacementError;
use crate::food;
use crate::input::Direction;
use crate::snake::{Cell, Snake};

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunState {
    /// Drawn and waiting for `start`.
    Idle,
    Running,
    Paused,
    /// The snake hit a wall or itself.
    GameOver,
    /// Food was eaten but no free cell remained for the next one.
    BoardFilled,
}

impl RunState {
    /// Returns true for states only `reset` can leave.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::BoardFilled)
    }
}

/// Result of a single simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake moved (or is still waiting for its first direction).
    Continue,
    /// The snake ate food and is one segment longer.
    Grew,
    GameOver,
    /// The snake ate the last food the grid had room for.
    BoardFilled,
}

/// Why the last run ended in [`RunState::GameOver`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Cell>,
    pub score: u32,
    pub status: RunState,
    pub death_reason: Option<DeathReason>,
    pub wrap_walls: bool,
    pub tick_count: u64,
    bounds: GridSize,
    rng: StdRng,
}

/// Read-only snapshot handed to renderers and notifiers after each tick.
#[derive(Debug, Clone, Copy)]
pub struct GameStateView<'a> {
    pub snake: &'a Snake,
    pub food: Option<Cell>,
    pub score: u32,
    pub status: RunState,
    pub death_reason: Option<DeathReason>,
    pub wrap_walls: bool,
    pub bounds: GridSize,
}

impl GameState {
    /// Creates an idle state seeded from system entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, rng: StdRng) -> Self {
        let mut state = Self {
            snake: Snake::new(bounds.center()),
            food: None,
            score: 0,
            status: RunState::Idle,
            death_reason: None,
            wrap_walls: false,
            tick_count: 0,
            bounds,
            rng,
        };
        state.reset();
        state
    }

    /// Returns the grid the state was built for.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Restores the initial run: one motionless segment at the grid centre,
    /// zero score, fresh food, [`RunState::Idle`]. Wrap mode is kept.
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.bounds.center());
        self.score = 0;
        self.status = RunState::Idle;
        self.death_reason = None;
        self.tick_count = 0;
        self.food = self.place_food().ok();
    }

    /// Records the latest direction intent for the next tick.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.snake.set_pending_direction(direction);
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// A rejected move (wall or body) leaves the snake untouched. The whole
    /// current body, tail included, counts as occupied: the snake cannot
    /// follow its tail into the cell the tail is leaving on the same tick.
    pub fn tick(&mut self) -> TickOutcome {
        match self.status {
            RunState::GameOver => return TickOutcome::GameOver,
            RunState::BoardFilled => return TickOutcome::BoardFilled,
            RunState::Idle | RunState::Running | RunState::Paused => {}
        }

        let Some(direction) = self.snake.resolve_direction() else {
            return TickOutcome::Continue;
        };

        self.tick_count += 1;

        let mut next_head = self.snake.head().step(direction);
        if self.wrap_walls {
            next_head = next_head.wrapped(self.bounds);
        } else if !next_head.is_within_bounds(self.bounds) {
            return self.end_run(DeathReason::WallCollision);
        }

        if self.snake.occupies(next_head) {
            return self.end_run(DeathReason::SelfCollision);
        }

        self.snake.push_head(next_head);

        if self.food == Some(next_head) {
            self.score += 1;
            return match self.place_food() {
                Ok(cell) => {
                    self.food = Some(cell);
                    trace!("food eaten at {next_head:?}, next food at {cell:?}");
                    TickOutcome::Grew
                }
                Err(PlacementError::GridFull) => {
                    self.food = None;
                    self.status = RunState::BoardFilled;
                    info!("board filled with score {}", self.score);
                    TickOutcome::BoardFilled
                }
            };
        }

        self.snake.pop_tail();
        TickOutcome::Continue
    }

    /// Returns a borrowed snapshot of the drawable state.
    #[must_use]
    pub fn view(&self) -> GameStateView<'_> {
        GameStateView {
            snake: &self.snake,
            food: self.food,
            score: self.score,
            status: self.status,
            death_reason: self.death_reason,
            wrap_walls: self.wrap_walls,
            bounds: self.bounds,
        }
    }

    fn end_run(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = RunState::GameOver;
        self.death_reason = Some(reason);
        info!("game over ({reason:?}) with score {}", self.score);
        TickOutcome::GameOver
    }

    fn place_food(&mut self) -> Result<Cell, PlacementError> {
        let occupied: HashSet<Cell> = self.snake.segments().copied().collect();
        food::place(&mut self.rng, self.bounds, &occupied)
    }
}
