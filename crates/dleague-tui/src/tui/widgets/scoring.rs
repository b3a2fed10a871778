// Scoring widget: per game day leaderboard and season-long average draft
// position.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use dleague_core::leaderboard::{game_day_leaderboard, player_adp};
use dleague_core::model::{format_score, team_color as team_hex, Team};

use super::{header_style, render_placeholder, team_color};
use crate::protocol::TabId;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(snapshot) = state.snapshot.as_deref() else {
        render_placeholder(frame, area, "Scoring", state);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let scroll = state.scroll(TabId::Scoring);
    let teams = &snapshot.teams;

    // Leaderboard for the selected game day.
    let days = state.game_days();
    let (title, entries) = match state.selected_game_day() {
        Some(day) => {
            let pos = days.iter().position(|d| *d == day).map_or(0, |i| i + 1);
            (
                format!("Leaderboard: {day} ({pos}/{})", days.len()),
                game_day_leaderboard(&snapshot.schedule, day),
            )
        }
        None => ("Leaderboard: no scored game days".to_string(), Vec::new()),
    };
    let rows: Vec<Row> = entries
        .into_iter()
        .skip(scroll)
        .map(|e| {
            Row::new(vec![
                Cell::from(e.position.to_string()),
                Cell::from(e.entry.player),
                team_cell(teams, e.entry.team),
                Cell::from(format_score(e.entry.score)),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(16),
            Constraint::Min(12),
            Constraint::Length(6),
        ],
    )
    .header(Row::new(["#", "Player", "Team", "Score"]).style(header_style()))
    .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, columns[0]);

    // Season ADP.
    let rows: Vec<Row> = player_adp(&snapshot.schedule)
        .into_iter()
        .skip(scroll)
        .map(|p| {
            Row::new(vec![
                Cell::from(p.player),
                team_cell(teams, p.team),
                Cell::from(p.games_played.to_string()),
                Cell::from(format!("{:.1}", p.avg_score)),
                Cell::from(format!("{:.1}", p.adp)),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(14),
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(5),
        ],
    )
    .header(Row::new(["Player", "Team", "GP", "Avg", "ADP"]).style(header_style()))
    .block(Block::default().borders(Borders::ALL).title("Average Draft Position"));
    frame.render_widget(table, columns[1]);
}

fn team_cell<'a>(teams: &[Team], team: String) -> Cell<'a> {
    let color = team_color(team_hex(teams, &team));
    Cell::from(team).style(Style::default().fg(color))
}
