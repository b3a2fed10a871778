// Schedule widget: every game day with its matchups and results.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use dleague_core::model::{format_score, team_color as team_hex, Side, Team, Winner};
use dleague_core::scoring::{ScoredGame, ScoredMatchup};

use super::{render_placeholder, team_color};
use crate::protocol::TabId;
use crate::tui::ViewState;

const TEAM_WIDTH: usize = 14;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(snapshot) = state.snapshot.as_deref() else {
        render_placeholder(frame, area, "Schedule", state);
        return;
    };

    let lines: Vec<Line> = snapshot
        .schedule
        .iter()
        .flat_map(|game| game_lines(game, &snapshot.teams))
        .skip(state.scroll(TabId::Schedule))
        .collect();

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Schedule"));
    frame.render_widget(paragraph, area);
}

/// A heading line for the game day followed by one line per matchup.
fn game_lines<'a>(game: &ScoredGame, teams: &[Team]) -> Vec<Line<'a>> {
    let mut heading = format!(" {} | {} | {}", game.label, game.date, game.sport);
    if !game.played {
        heading.push_str(" | upcoming");
    }
    let heading_style = if game.is_preseason() {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(Span::styled(heading, heading_style))];
    lines.extend(game.matchups.iter().map(|m| matchup_line(m, teams)));
    lines
}

/// "   Away        53.5 @ Home          30  Away win"
fn matchup_line<'a>(m: &ScoredMatchup, teams: &[Team]) -> Line<'a> {
    let team_style = |name: &str, won: bool| {
        let style = Style::default().fg(team_color(team_hex(teams, name)));
        if won {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    };
    let away = &m.matchup.away;
    let home = &m.matchup.home;
    Line::from(vec![
        Span::styled(
            format!("   {away:<TEAM_WIDTH$}"),
            team_style(away, m.winner == Some(Winner::Away)),
        ),
        Span::raw(format!("{:>6} @ ", score_cell(m.away_total))),
        Span::styled(
            format!("{home:<TEAM_WIDTH$}"),
            team_style(home, m.winner == Some(Winner::Home)),
        ),
        Span::raw(format!("{:>6}  ", score_cell(m.home_total))),
        Span::styled(result_label(m), Style::default().fg(Color::Green)),
    ])
}

fn score_cell(total: Option<f64>) -> String {
    total.map(format_score).unwrap_or_else(|| "-".into())
}

/// Short description of how a matchup ended.
pub fn result_label(m: &ScoredMatchup) -> String {
    let team = |side: Side| m.matchup.team(side).to_string();
    if let Some(side) = m.forfeit {
        return format!("{} forfeit", team(side));
    }
    if let Some(side) = m.dq {
        return format!("{} DQ", team(side));
    }
    match m.winner {
        Some(Winner::Home) => format!("{} win", team(Side::Home)),
        Some(Winner::Away) => format!("{} win", team(Side::Away)),
        Some(Winner::Tie) => "Tie".into(),
        None => String::new(),
    }
}
