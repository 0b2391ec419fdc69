use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{BORDER_SIZE, CELL_HEIGHT, CELL_WIDTH, GridSize, HUD_HEIGHT, PALETTE};
use crate::game::{GameStateView, RunState};
use crate::snake::Cell;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{
    render_board_filled_menu, render_game_over_menu, render_pause_menu, render_start_menu,
};

const GLYPH_CELL: &str = "██";
const GLYPH_FOOD: &str = "◆ ";
const GLYPH_GRID: &str = "· ";

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, view: &GameStateView<'_>, hud_info: &HudInfo) {
    let (play_area, hud_area) = layout(frame.area(), view.bounds);

    let block = Block::bordered().border_style(Style::new().fg(PALETTE.border));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    if hud_info.show_grid {
        render_grid(frame, inner, view.bounds);
    }
    render_food(frame, inner, view);
    render_snake(frame, inner, view);
    render_hud(frame, hud_area, view, hud_info);

    match view.status {
        RunState::Idle => render_start_menu(frame, play_area, hud_info.high_score),
        RunState::Paused => render_pause_menu(frame, play_area),
        RunState::GameOver => render_game_over_menu(
            frame,
            play_area,
            view.score,
            hud_info.high_score,
            hud_info.new_high_score,
            view.death_reason,
        ),
        RunState::BoardFilled => render_board_filled_menu(
            frame,
            play_area,
            view.score,
            hud_info.new_high_score,
        ),
        RunState::Running => {}
    }
}

/// Terminal size needed to show a whole grid plus the HUD.
#[must_use]
pub fn required_area(bounds: GridSize) -> (u16, u16) {
    (
        bounds
            .width
            .saturating_mul(CELL_WIDTH)
            .saturating_add(BORDER_SIZE * 2),
        bounds
            .height
            .saturating_mul(CELL_HEIGHT)
            .saturating_add(BORDER_SIZE * 2 + HUD_HEIGHT),
    )
}

fn layout(area: Rect, bounds: GridSize) -> (Rect, Rect) {
    let (width, height) = required_area(bounds);
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [play_area, hud_area] = Layout::vertical([
        Constraint::Length(height - HUD_HEIGHT),
        Constraint::Length(HUD_HEIGHT),
    ])
    .flex(Flex::Center)
    .areas(column);

    (play_area, hud_area)
}

fn render_grid(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize) {
    let style = Style::new().fg(PALETTE.grid);
    let buffer = frame.buffer_mut();

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            if let Some((tx, ty)) = logical_to_terminal(inner, bounds, Cell { x, y }) {
                buffer.set_string(tx, ty, GLYPH_GRID, style);
            }
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, view: &GameStateView<'_>) {
    let Some(food) = view.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, view.bounds, food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(PALETTE.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, view: &GameStateView<'_>) {
    let length = view.snake.len();
    let buffer = frame.buffer_mut();

    // Tail first so the head wins when segments overlap on screen.
    for (index, segment) in view.snake.segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, view.bounds, *segment) else {
            continue;
        };

        let style = if index == 0 {
            Style::new()
                .fg(PALETTE.snake_head)
                .add_modifier(Modifier::BOLD)
        } else if index + 1 == length {
            Style::new().fg(PALETTE.snake_tail)
        } else {
            Style::new().fg(PALETTE.snake_body)
        };

        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(cell.y).ok()?.checked_mul(CELL_HEIGHT)?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
