// Calendar sidebar: game days grouped by month, with the next one marked.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use dleague_core::calendar::{calendar, next_game_day, Calendar};
use chrono::NaiveDate;

use super::render_placeholder;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(snapshot) = state.snapshot.as_deref() else {
        render_placeholder(frame, area, "Calendar", state);
        return;
    };

    let year = snapshot.season.year;
    let cal = calendar(&snapshot.schedule, year);
    let next = next_game_day(&snapshot.schedule, year, state.today).map(|d| d.date);

    // Keep the next game day in view: start a couple of lines above it.
    let lines = calendar_lines(&cal, next);
    let visible = area.height.saturating_sub(2) as usize;
    let next_line = lines.iter().position(|(date, _)| *date == next && next.is_some()).unwrap_or(0);
    let start = if next_line + 2 > visible {
        next_line + 2 - visible
    } else {
        0
    };

    let paragraph = Paragraph::new(lines.into_iter().skip(start).map(|(_, l)| l).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title(format!("Calendar {year}")));
    frame.render_widget(paragraph, area);
}

/// Rendered lines, each tagged with the date it belongs to (month headings
/// and undated games carry `None`).
fn calendar_lines<'a>(cal: &Calendar, next: Option<NaiveDate>) -> Vec<(Option<NaiveDate>, Line<'a>)> {
    let mut lines = Vec::new();
    let mut month = String::new();
    for day in &cal.days {
        if day.month_name != month {
            month = day.month_name.clone();
            lines.push((
                None,
                Line::from(Span::styled(
                    format!(" {month}"),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
            ));
        }
        let is_next = Some(day.date) == next;
        for game in &day.games {
            let (marker, style) = if game.played {
                ("✓", Style::default().fg(Color::DarkGray))
            } else if is_next {
                ("▶", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                (" ", Style::default().fg(Color::White))
            };
            lines.push((
                Some(day.date),
                Line::from(Span::styled(
                    format!(" {marker} {:>6}  {} ({})", day.date.format("%b %-d"), game.label, game.sport),
                    style,
                )),
            ));
        }
    }
    for game in &cal.undated {
        lines.push((
            None,
            Line::from(Span::styled(
                format!("   TBD     {}", game.label),
                Style::default().fg(Color::DarkGray),
            )),
        ));
    }
    lines
}
