use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::PALETTE;
use crate::game::DeathReason;

/// Draws the pre-start prompt.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32) {
    render_popup(
        frame,
        area,
        "Press Start",
        vec![
            Line::from(format!("High score: {high_score}")),
            Line::from("[Enter] start  [Q] quit"),
        ],
    );
}

/// Draws the pause overlay.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    render_popup(
        frame,
        area,
        "Paused",
        vec![Line::from("[Space] resume  [R] restart")],
    );
}

/// Draws the game-over overlay.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    is_new_high: bool,
    death_reason: Option<DeathReason>,
) {
    let mut body = vec![
        Line::from(format!("Score: {score}  Best: {}", high_score.max(score))),
        Line::from(match death_reason {
            Some(DeathReason::WallCollision) => "Hit the wall",
            Some(DeathReason::SelfCollision) => "Bit your own tail",
            None => "",
        }),
    ];
    if is_new_high {
        body.push(Line::from("New Highscore!"));
    }
    body.push(Line::from("[R] play again  [Q] quit"));

    render_popup(frame, area, "Game Over", body);
}

/// Draws the overlay for a run that filled every cell.
pub fn render_board_filled_menu(frame: &mut Frame<'_>, area: Rect, score: u32, is_new_high: bool) {
    let mut body = vec![
        Line::from(format!("Score: {score}")),
        Line::from("No room left for food"),
    ];
    if is_new_high {
        body.push(Line::from("New Highscore!"));
    }
    body.push(Line::from("[R] play again  [Q] quit"));

    render_popup(frame, area, "Board Filled", body);
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, body: Vec<Line<'_>>) {
    let content_width = body
        .iter()
        .map(Line::width)
        .chain(std::iter::once(title.width()))
        .max()
        .unwrap_or(0);
    let width = u16::try_from(content_width + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(body.len() + 4).unwrap_or(u16::MAX);
    let popup = centered_popup(area, width, height);
    frame.render_widget(Clear, popup);

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(Line::styled(
        title.to_owned(),
        Style::new()
            .fg(PALETTE.overlay_title)
            .add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::from(""));
    lines.extend(body);

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        popup,
    );
}

/// Rectangle of at most `width`×`height` centred in `area`.
fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [mid] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(mid);

    center
}
