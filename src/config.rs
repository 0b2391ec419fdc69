use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;

use crate::error::ConfigError;
use crate::snake::Cell;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Creates a grid of `width` columns and `height` rows.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroGridDimension { width, height });
        }

        Ok(Self { width, height })
    }

    /// Derives the grid from a drawing surface divided into fixed-size cells.
    ///
    /// Partial cells at the right and bottom edges are dropped.
    pub fn from_canvas(
        canvas_width: u16,
        canvas_height: u16,
        cell_width: u16,
        cell_height: u16,
    ) -> Result<Self, ConfigError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(ConfigError::ZeroCellSize {
                width: cell_width,
                height: cell_height,
            });
        }

        Self::new(canvas_width / cell_width, canvas_height / cell_height).map_err(|_| {
            ConfigError::CanvasTooSmall {
                canvas_width,
                canvas_height,
                cell_width,
                cell_height,
            }
        })
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Cell the snake starts on after a reset.
    #[must_use]
    pub fn center(self) -> Cell {
        Cell {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }
}

/// Player-selectable speed preset.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Next preset in cycle order, wrapping from hard back to easy.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Difficulty to tick-interval mapping.
///
/// Only [`SpeedTable::new`] and `Default` construct it, so every interval is
/// positive.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpeedTable {
    easy_ms: u64,
    medium_ms: u64,
    hard_ms: u64,
}

impl SpeedTable {
    /// Builds a custom table; every interval must be positive.
    pub fn new(easy_ms: u64, medium_ms: u64, hard_ms: u64) -> Result<Self, ConfigError> {
        let table = Self {
            easy_ms,
            medium_ms,
            hard_ms,
        };

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            if table.millis(difficulty) == 0 {
                return Err(ConfigError::ZeroTickInterval { difficulty });
            }
        }

        Ok(table)
    }

    #[must_use]
    pub fn millis(self, difficulty: Difficulty) -> u64 {
        match difficulty {
            Difficulty::Easy => self.easy_ms,
            Difficulty::Medium => self.medium_ms,
            Difficulty::Hard => self.hard_ms,
        }
    }

    /// Tick interval for `difficulty`.
    #[must_use]
    pub fn interval(self, difficulty: Difficulty) -> Duration {
        Duration::from_millis(self.millis(difficulty))
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            easy_ms: EASY_TICK_INTERVAL_MS,
            medium_ms: MEDIUM_TICK_INTERVAL_MS,
            hard_ms: HARD_TICK_INTERVAL_MS,
        }
    }
}

/// Runtime-adjustable game settings.
///
/// `wrap_walls` is read by the engine on every tick. The tick interval is
/// only read when the schedule is (re)started.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct GameConfig {
    pub wrap_walls: bool,
    pub difficulty: Difficulty,
    pub speeds: SpeedTable,
}

impl GameConfig {
    /// Returns the tick interval for the selected difficulty.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.speeds.interval(self.difficulty)
    }
}

/// Solid colors used by the terminal renderer.
#[derive(Debug)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub grid: Color,
    pub border: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub overlay_title: Color,
}

pub const PALETTE: Palette = Palette {
    snake_head: Color::Rgb(139, 233, 253),
    snake_body: Color::Rgb(80, 227, 194),
    snake_tail: Color::Rgb(40, 140, 120),
    food: Color::Rgb(255, 123, 84),
    grid: Color::Rgb(48, 48, 56),
    border: Color::Gray,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    overlay_title: Color::Rgb(255, 209, 102),
};

pub const EASY_TICK_INTERVAL_MS: u64 = 160;
pub const MEDIUM_TICK_INTERVAL_MS: u64 = 100;
pub const HARD_TICK_INTERVAL_MS: u64 = 60;

/// Grid used when the terminal size cannot be queried.
pub const DEFAULT_GRID_WIDTH: u16 = 30;
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Terminal columns per logical cell; two columns keep cells roughly square.
pub const CELL_WIDTH: u16 = 2;
pub const CELL_HEIGHT: u16 = 1;

/// Terminal rows reserved below the play field for the HUD.
pub const HUD_HEIGHT: u16 = 2;

/// Border thickness around the play field.
pub const BORDER_SIZE: u16 = 1;

/// Input poll timeout for the frame loop.
pub const FRAME_POLL_MS: u64 = 16;

/// Occupancy ratio above which food is placed by enumerating free cells.
pub const FOOD_ENUMERATION_THRESHOLD: f64 = 0.9;

/// Rejection-sampling attempts per grid cell before enumeration takes over.
pub const FOOD_ATTEMPTS_PER_CELL: usize = 4;
