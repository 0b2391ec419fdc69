use std::io;

use thiserror::Error;

use crate::config::Difficulty;

/// Invalid construction-time configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one column and one row, got {width}x{height}")]
    ZeroGridDimension { width: u16, height: u16 },
    #[error("cell size must be non-zero, got {width}x{height}")]
    ZeroCellSize { width: u16, height: u16 },
    #[error(
        "canvas {canvas_width}x{canvas_height} is too small for a {cell_width}x{cell_height} cell"
    )]
    CanvasTooSmall {
        canvas_width: u16,
        canvas_height: u16,
        cell_width: u16,
        cell_height: u16,
    },
    #[error("tick interval for {difficulty} difficulty must be positive")]
    ZeroTickInterval { difficulty: Difficulty },
}

/// Food placement failure.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum PlacementError {
    #[error("no free cell left on the grid")]
    GridFull,
}

/// Top-level failure of the terminal client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use super::ConfigError;
    use crate::config::Difficulty;

    #[test]
    fn config_errors_describe_the_offending_value() {
        let zero = ConfigError::ZeroGridDimension {
            width: 0,
            height: 12,
        };
        assert_eq!(
            zero.to_string(),
            "grid must have at least one column and one row, got 0x12"
        );

        let interval = ConfigError::ZeroTickInterval {
            difficulty: Difficulty::Hard,
        };
        assert_eq!(
            interval.to_string(),
            "tick interval for hard difficulty must be positive"
        );
    }
}
