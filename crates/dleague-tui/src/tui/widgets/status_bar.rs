// Status bar widget: load indicator, league and season, tab strip.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::{LoadStatus, TabId};
use crate::tui::ViewState;

/// Layout: [load indicator] [league | season] [tab bar]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    let (dot, dot_color) = load_indicator(&state.load_status);
    spans.push(Span::styled(format!(" {dot} "), Style::default().fg(dot_color)));

    let league = if state.league_name.is_empty() {
        "Draft League"
    } else {
        state.league_name.as_str()
    };
    spans.push(Span::styled(
        league.to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    if let Some(season) = state.selected_season_config() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(season.label.clone(), Style::default().fg(Color::White)));
    }
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.extend(tab_spans(state.active_tab));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

pub fn load_indicator(status: &LoadStatus) -> (&'static str, Color) {
    match status {
        LoadStatus::Idle => ("○", Color::DarkGray),
        LoadStatus::Loading => ("●", Color::Yellow),
        LoadStatus::Ready => ("●", Color::Green),
        LoadStatus::Failed(_) => ("●", Color::Red),
    }
}

/// "[1:Standings] [2:Schedule] ..." with the active tab highlighted.
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, tab) in TabId::ALL.into_iter().enumerate() {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }
    spans
}
