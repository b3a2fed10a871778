// TUI widget modules for each dashboard panel.

pub mod banner;
pub mod calendar;
pub mod draft;
pub mod quit_confirm;
pub mod schedule;
pub mod scoring;
pub mod standings;
pub mod status_bar;
pub mod teams;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::LoadStatus;
use crate::tui::ViewState;

/// Terminal color for a team's "#RRGGBB" color; white when unparseable.
pub fn team_color(hex: &str) -> Color {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return Color::White;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

/// Bold header style shared by the tables.
pub(crate) fn header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

/// Message shown in a panel while no snapshot is available.
pub(crate) fn empty_message(status: &LoadStatus) -> String {
    match status {
        LoadStatus::Idle => "No season loaded".into(),
        LoadStatus::Loading => "Loading season...".into(),
        LoadStatus::Ready => "No data".into(),
        LoadStatus::Failed(msg) => msg.clone(),
    }
}

pub(crate) fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, state: &ViewState) {
    let style = match state.load_status {
        LoadStatus::Failed(_) => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!("  {}", empty_message(&state.load_status)),
        style,
    )))
    .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_color_parses_hex() {
        assert_eq!(team_color("#E56020"), Color::Rgb(0xE5, 0x60, 0x20));
        assert_eq!(team_color("007AC1"), Color::Rgb(0x00, 0x7A, 0xC1));
        assert_eq!(team_color("#FFF"), Color::White);
        assert_eq!(team_color("#GG0000"), Color::White);
        assert_eq!(team_color(""), Color::White);
    }

    #[test]
    fn empty_message_follows_status() {
        assert_eq!(empty_message(&LoadStatus::Loading), "Loading season...");
        assert_eq!(
            empty_message(&LoadStatus::Failed("Season 2 is locked".into())),
            "Season 2 is locked"
        );
    }
}
