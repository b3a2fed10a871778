// Draft widget: next season's draft order beside each team's future picks.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use dleague_core::model::{team_color as team_hex, SeasonPicks, Team, TeamDraftCapital};
use dleague_core::standings::draft_board;

use super::{header_style, render_placeholder, team_color};
use crate::protocol::TabId;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(snapshot) = state.snapshot.as_deref() else {
        render_placeholder(frame, area, "Draft", state);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_order(frame, columns[0], &snapshot.teams);
    render_capital(frame, columns[1], &snapshot.draft_capital, &snapshot.teams, state.scroll(TabId::Draft));
}

fn render_order(frame: &mut Frame, area: Rect, teams: &[Team]) {
    let header = Row::new(["Pick", "Team", "Record"]).style(header_style());
    let rows: Vec<Row> = draft_board(teams)
        .into_iter()
        .map(|slot| {
            Row::new(vec![
                Cell::from(slot.pick.to_string()),
                Cell::from(slot.team).style(Style::default().fg(team_color(&slot.color))),
                Cell::from(format!("{}-{} ({})", slot.wins, slot.losses, slot.pct)),
            ])
        })
        .collect();
    let widths = [Constraint::Length(4), Constraint::Min(12), Constraint::Length(12)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Draft Order"));
    frame.render_widget(table, area);
}

fn render_capital(frame: &mut Frame, area: Rect, capital: &[TeamDraftCapital], teams: &[Team], scroll: usize) {
    let lines: Vec<Line> = if capital.is_empty() {
        vec![Line::from(Span::styled(
            "  No draft capital recorded",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        capital
            .iter()
            .flat_map(|tc| {
                let mut lines = vec![Line::from(Span::styled(
                    format!(" {}", tc.team),
                    Style::default()
                        .fg(team_color(team_hex(teams, &tc.team)))
                        .add_modifier(Modifier::BOLD),
                ))];
                lines.extend(tc.seasons.iter().map(|s| Line::raw(format!("   {}", season_picks_label(&tc.team, s)))));
                lines
            })
            .skip(scroll)
            .collect()
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Draft Capital"));
    frame.render_widget(paragraph, area);
}

/// "S2: 1st, 2nd, 2nd (Warriors)". Picks from other teams name their origin.
pub fn season_picks_label(owner: &str, season: &SeasonPicks) -> String {
    let picks: Vec<String> = season
        .picks
        .iter()
        .map(|p| {
            if p.origin == owner {
                p.round.clone()
            } else {
                format!("{} ({})", p.round, p.origin)
            }
        })
        .collect();
    if picks.is_empty() {
        format!("{}: no picks", season.season)
    } else {
        format!("{}: {}", season.season, picks.join(", "))
    }
}
