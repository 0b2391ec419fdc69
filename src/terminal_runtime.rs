use std::io;
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::config::{
    BORDER_SIZE, CELL_HEIGHT, CELL_WIDTH, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GridSize,
    HUD_HEIGHT,
};
use crate::error::ConfigError;
use crate::game::GameStateView;
use crate::renderer;
use crate::ui::hud::HudInfo;

type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Raw mode and alternate screen held for the lifetime of one game.
///
/// Dropping it, or panicking while it is alive, restores the terminal.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(install_panic_hook);
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => {
                debug!("terminal session entered");
                Ok(Self { terminal })
            }
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    /// Draws one game frame.
    pub fn draw(&mut self, view: &GameStateView<'_>, hud_info: &HudInfo) -> io::Result<()> {
        draw_frame(&mut self.terminal, view, hud_info)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
        debug!("terminal session restored");
    }
}

/// Renders `view` onto any ratatui backend.
pub fn draw_frame<B: Backend>(
    terminal: &mut Terminal<B>,
    view: &GameStateView<'_>,
    hud_info: &HudInfo,
) -> io::Result<()> {
    terminal.draw(|frame| renderer::render(frame, view, hud_info))?;
    Ok(())
}

/// Current terminal size, or `None` when it cannot be queried.
#[must_use]
pub fn terminal_size() -> Option<(u16, u16)> {
    match crossterm::terminal::size() {
        Ok(size) => Some(size),
        Err(error) => {
            warn!("terminal size unavailable ({error}), using default grid");
            None
        }
    }
}

/// Largest grid whose field, border and HUD fit a `width` x `height` terminal.
pub fn grid_for_terminal(width: u16, height: u16) -> Result<GridSize, ConfigError> {
    GridSize::from_canvas(
        width.saturating_sub(BORDER_SIZE * 2),
        height.saturating_sub(BORDER_SIZE * 2 + HUD_HEIGHT),
        CELL_WIDTH,
        CELL_HEIGHT,
    )
}

/// Resolves the grid from explicit dimensions, falling back to the terminal
/// size per missing dimension and to the default grid without a terminal.
pub fn choose_grid(
    columns: Option<u16>,
    rows: Option<u16>,
    terminal: Option<(u16, u16)>,
) -> Result<GridSize, ConfigError> {
    if let (Some(columns), Some(rows)) = (columns, rows) {
        return GridSize::new(columns, rows);
    }

    let fitted = match terminal {
        Some((width, height)) => grid_for_terminal(width, height)?,
        None => GridSize::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)?,
    };

    GridSize::new(
        columns.unwrap_or(fitted.width),
        rows.unwrap_or(fitted.height),
    )
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}

fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::{choose_grid, draw_frame, grid_for_terminal};
    use crate::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, Difficulty, GridSize};
    use crate::error::ConfigError;
    use crate::game::GameState;
    use crate::renderer::required_area;
    use crate::ui::hud::HudInfo;

    #[test]
    fn fitted_grid_fills_the_terminal() {
        let grid = grid_for_terminal(80, 24).expect("terminal fits a grid");

        assert_eq!(
            grid,
            GridSize {
                width: 39,
                height: 20
            }
        );
        let (width, height) = required_area(grid);
        assert!(width <= 80 && height <= 24);
    }

    #[test]
    fn tiny_terminal_is_rejected() {
        assert!(matches!(
            grid_for_terminal(3, 4),
            Err(ConfigError::CanvasTooSmall { .. })
        ));
    }

    #[test]
    fn explicit_dimensions_ignore_the_terminal() {
        let grid = choose_grid(Some(12), Some(9), Some((3, 3))).expect("explicit grid");

        assert_eq!(
            grid,
            GridSize {
                width: 12,
                height: 9
            }
        );
    }

    #[test]
    fn missing_dimension_comes_from_terminal_or_default() {
        let from_terminal = choose_grid(Some(10), None, Some((80, 24))).expect("fitted rows");
        assert_eq!(from_terminal.height, 20);

        let defaulted = choose_grid(None, None, None).expect("default grid");
        assert_eq!(defaulted.width, DEFAULT_GRID_WIDTH);
        assert_eq!(defaulted.height, DEFAULT_GRID_HEIGHT);
    }

    #[test]
    fn draw_frame_renders_the_game_onto_a_backend() {
        let bounds = GridSize::new(10, 6).expect("valid grid");
        let state = GameState::new_with_seed(bounds, 2);
        let (width, height) = required_area(bounds);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test backend");
        let hud_info = HudInfo {
            high_score: 3,
            new_high_score: false,
            difficulty: Difficulty::Hard,
            sound_enabled: false,
            show_grid: false,
        };

        draw_frame(&mut terminal, &state.view(), &hud_info).expect("draw succeeds");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Score"));
    }
}
