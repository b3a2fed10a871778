// Season banner: description, progress and the last load outcome.
//
// Line 1: "{label}: {description}"
// Line 2: "{status} | {played}/{total} games played | Next: {label} ({date})"

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use dleague_app::SeasonSnapshot;
use dleague_core::calendar::{next_game_day, CalendarDay};

use crate::protocol::LoadStatus;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = state
        .selected_season_config()
        .map_or_else(|| "Season".to_string(), |s| s.label.clone());

    let lines = match state.snapshot.as_deref() {
        Some(snapshot) => snapshot_lines(snapshot, state),
        None => vec![Line::from(Span::styled(
            format!("  {}", super::empty_message(&state.load_status)),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        ))],
    };

    let border = match state.load_status {
        LoadStatus::Failed(_) => Color::Red,
        _ => Color::Cyan,
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(paragraph, area);
}

fn snapshot_lines<'a>(snapshot: &SeasonSnapshot, state: &ViewState) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!(" {}", snapshot.league_name),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(": {}", snapshot.season.description)),
    ])];

    let summary = &snapshot.summary;
    let mut progress = vec![
        Span::styled(format!(" {}", summary.status), Style::default().fg(Color::Green)),
        Span::raw(format!(
            " | {}/{} games played",
            summary.played_games, summary.total_games
        )),
    ];
    let next = next_game_day(&snapshot.schedule, snapshot.season.year, state.today);
    progress.push(Span::raw(format!(" | Next: {}", next_label(next.as_ref()))));
    if let LoadStatus::Failed(msg) = &state.load_status {
        progress.push(Span::styled(format!(" | {msg}"), Style::default().fg(Color::Red)));
    }
    lines.push(Line::from(progress));
    lines
}

pub fn next_label(day: Option<&CalendarDay>) -> String {
    match day {
        Some(day) => {
            let games: Vec<&str> = day.games.iter().map(|g| g.label.as_str()).collect();
            format!("{} ({})", games.join(", "), day.date.format("%b %-d"))
        }
        None => "none scheduled".into(),
    }
}
