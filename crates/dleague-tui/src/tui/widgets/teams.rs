// Teams widget: each team's GM, record and roster.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use dleague_core::model::Team;

use super::{render_placeholder, team_color};
use crate::protocol::TabId;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = match state.conference {
        Some(c) => format!("Teams ({c})"),
        None => "Teams".to_string(),
    };
    let Some(snapshot) = state.snapshot.as_deref() else {
        render_placeholder(frame, area, &title, state);
        return;
    };

    let lines: Vec<Line> = snapshot
        .teams
        .iter()
        .filter(|t| state.conference.map_or(true, |c| t.conference == c))
        .flat_map(team_lines)
        .skip(state.scroll(TabId::Teams))
        .collect();

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn team_lines<'a>(team: &Team) -> [Line<'a>; 3] {
    [
        Line::from(vec![
            Span::styled(
                format!(" {} ({})", team.name, team.abbrev),
                Style::default()
                    .fg(team_color(&team.color))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  GM {} | {} | {}-{}",
                team.gm, team.conference, team.wins, team.losses
            )),
        ]),
        Line::from(Span::styled(
            format!("   {}", roster_label(&team.roster)),
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
    ]
}

pub fn roster_label(roster: &[String]) -> String {
    if roster.is_empty() {
        "No roster listed".into()
    } else {
        roster.join(", ")
    }
}
