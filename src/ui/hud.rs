use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::GameState;

/// Supplemental values displayed by the HUD line.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    /// Whether tilt input is attached this session.
    pub tilt_enabled: bool,
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: HudInfo<'_>,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let tilt_label = if info.tilt_enabled {
        "tilt: on"
    } else {
        "tilt: off"
    };
    let line = Line::from(vec![
        Span::raw(format!(" Score: {}", state.score)),
        Span::raw(format!("   Length: {}", state.snake.len())),
        Span::raw(format!("   {tilt_label}")),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::new().fg(info.theme.hud_fg)),
        hud_area,
    );

    play_area
}
