//! Grid snake: a deterministic simulation core with pluggable collaborators.
//!
//! - `game`, `snake`, `food`: state model, tick engine and food placement
//! - `schedule`, `session`: cancellable tick schedule and run lifecycle
//! - `renderer`, `ui`, `audio`, `input`, `score`: terminal client pieces

pub mod audio;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod schedule;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;

pub use config::{Difficulty, GameConfig, GridSize, SpeedTable};
pub use error::{ConfigError, PlacementError};
pub use game::{GameState, GameStateView, RunState, TickOutcome};
pub use session::{GameObserver, Session};
