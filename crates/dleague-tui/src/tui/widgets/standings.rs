// Standings widget: ranked table, optionally filtered to one conference.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use dleague_core::standings::{standings_table, StandingsDelta};

use super::{header_style, render_placeholder, team_color};
use crate::protocol::TabId;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = match state.conference {
        Some(c) => format!("Standings ({c})"),
        None => "Standings".to_string(),
    };
    let Some(snapshot) = state.snapshot.as_deref() else {
        render_placeholder(frame, area, &title, state);
        return;
    };

    let header = Row::new(["#", "Team", "GM", "Conf", "W", "L", "PCT", "New"]).style(header_style());

    let rows: Vec<Row> = standings_table(&snapshot.teams, state.conference)
        .into_iter()
        .skip(state.scroll(TabId::Standings))
        .map(|row| {
            Row::new(vec![
                Cell::from(row.rank.to_string()),
                Cell::from(row.team.clone()).style(
                    Style::default()
                        .fg(team_color(&row.color))
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::from(row.gm),
                Cell::from(row.conference.as_str()),
                Cell::from(row.wins.to_string()),
                Cell::from(row.losses.to_string()),
                Cell::from(row.pct),
                Cell::from(new_record(&snapshot.new_results, &row.team))
                    .style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(14),
        Constraint::Min(14),
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

/// "+W-L" for results the sheet has not recorded yet, blank otherwise.
pub fn new_record(delta: &StandingsDelta, team: &str) -> String {
    match delta.get(team) {
        Some(d) if d.has_record() => format!("+{}-{}", d.wins, d.losses),
        _ => String::new(),
    }
}
