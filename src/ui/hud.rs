use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::{Difficulty, PALETTE};
use crate::game::GameStateView;

const KEY_HINTS: &str =
    "arrows/WASD move  space pause  enter start  r restart  1-3/tab speed  b walls  g grid  m sound  q quit";

/// Values shown by the HUD that are not part of the game state.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub high_score: u32,
    /// The run that just ended beat the previous high score.
    pub new_high_score: bool,
    pub difficulty: Difficulty,
    pub sound_enabled: bool,
    pub show_grid: bool,
}

/// Renders the status line and the key hint line into `area`.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, view: &GameStateView<'_>, info: &HudInfo) {
    let [status_area, hint_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(Paragraph::new(status_line(view, info)), status_area);

    let hints = truncate_to_width(KEY_HINTS, usize::from(hint_area.width));
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::new().fg(PALETTE.hud_label),
        ))),
        hint_area,
    );
}

fn status_line(view: &GameStateView<'_>, info: &HudInfo) -> Line<'static> {
    let fields = [
        ("Score", view.score.to_string()),
        ("Best", info.high_score.max(view.score).to_string()),
        ("Length", view.snake.len().to_string()),
        ("Speed", info.difficulty.label().to_owned()),
        (
            "Walls",
            if view.wrap_walls { "wrap" } else { "solid" }.to_owned(),
        ),
        (
            "Sound",
            if info.sound_enabled { "on" } else { "off" }.to_owned(),
        ),
    ];

    let label = Style::new().fg(PALETTE.hud_label);
    let value = Style::new()
        .fg(PALETTE.hud_value)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::with_capacity(fields.len() * 3);
    for (index, (name, text)) in fields.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!("{name} "), label));
        spans.push(Span::styled(text, value));
    }

    Line::from(spans)
}

/// Cuts `text` to at most `max_width` display columns, ending in `…` when cut.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width + 1 > max_width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr;

    use super::{HudInfo, status_line, truncate_to_width};
    use crate::config::{Difficulty, GridSize};
    use crate::game::GameState;

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_to_width("abc", 0), "");
        assert!(truncate_to_width("space pause  enter start", 12).width() <= 12);
    }

    #[test]
    fn status_line_shows_best_of_stored_and_current() {
        let mut state = GameState::new_with_seed(GridSize::new(6, 6).expect("valid grid"), 3);
        state.score = 9;
        state.wrap_walls = true;
        let info = HudInfo {
            high_score: 4,
            new_high_score: false,
            difficulty: Difficulty::Hard,
            sound_enabled: false,
            show_grid: false,
        };

        let text: String = status_line(&state.view(), &info)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();

        assert_eq!(
            text,
            "Score 9  Best 9  Length 1  Speed hard  Walls wrap  Sound off"
        );
    }
}
