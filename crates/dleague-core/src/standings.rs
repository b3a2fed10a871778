// Standings ordering, draft order, and merging freshly scored results.

use crate::model::{Conference, Team};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Win/loss/points changes for one team from newly scored matchups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDelta {
    pub wins: u32,
    pub losses: u32,
    pub points_for: f64,
    pub points_against: f64,
}

impl TeamDelta {
    pub fn has_record(&self) -> bool {
        self.wins > 0 || self.losses > 0
    }
}

/// Per-team deltas keyed by team name.
pub type StandingsDelta = BTreeMap<String, TeamDelta>;

/// Winning percentage, or `None` before a team has played.
pub fn win_pct(wins: u32, losses: u32) -> Option<f64> {
    let games = wins + losses;
    (games > 0).then(|| f64::from(wins) / f64::from(games))
}

/// Three-decimal percentage ("0.800", "1.000"), or ".000" with no games.
pub fn format_pct(wins: u32, losses: u32) -> String {
    match win_pct(wins, losses) {
        Some(pct) => format!("{pct:.3}"),
        None => ".000".to_string(),
    }
}

/// Teams in standings order, optionally filtered to one conference.
///
/// Best win percentage first (no games counts as 0), ties broken by more
/// wins. The sort is stable so equal teams keep their configured order.
pub fn sort_standings(teams: &[Team], conference: Option<Conference>) -> Vec<Team> {
    let mut sorted: Vec<Team> = teams
        .iter()
        .filter(|t| conference.map_or(true, |c| t.conference == c))
        .cloned()
        .collect();
    sorted.sort_by(|a, b| {
        let pa = win_pct(a.wins, a.losses).unwrap_or(0.0);
        let pb = win_pct(b.wins, b.losses).unwrap_or(0.0);
        pb.partial_cmp(&pa)
            .unwrap_or(Ordering::Equal)
            .then(b.wins.cmp(&a.wins))
    });
    sorted
}

/// Draft order for the next season: worst record picks first.
///
/// Teams without games sit at .500; ties go to the team with fewer wins.
pub fn draft_order(teams: &[Team]) -> Vec<Team> {
    let mut sorted = teams.to_vec();
    sorted.sort_by(|a, b| {
        let pa = win_pct(a.wins, a.losses).unwrap_or(0.5);
        let pb = win_pct(b.wins, b.losses).unwrap_or(0.5);
        pa.partial_cmp(&pb)
            .unwrap_or(Ordering::Equal)
            .then(a.wins.cmp(&b.wins))
    });
    sorted
}

/// Add each team's delta on top of its baseline record.
///
/// Deltas without any win or loss (for example a team that only has points
/// from an unfinished matchup) leave the team untouched.
pub fn merge_standings(teams: &[Team], delta: &StandingsDelta) -> Vec<Team> {
    teams
        .iter()
        .map(|team| {
            let mut merged = team.clone();
            if let Some(d) = delta.get(&team.name).filter(|d| d.has_record()) {
                merged.wins += d.wins;
                merged.losses += d.losses;
            }
            merged
        })
        .collect()
}

/// One ranked line of a standings table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub rank: usize,
    pub team: String,
    pub abbrev: String,
    pub gm: String,
    pub conference: Conference,
    pub color: String,
    pub wins: u32,
    pub losses: u32,
    pub pct: String,
}

pub fn standings_table(teams: &[Team], conference: Option<Conference>) -> Vec<StandingsRow> {
    sort_standings(teams, conference)
        .into_iter()
        .enumerate()
        .map(|(i, t)| StandingsRow {
            rank: i + 1,
            pct: format_pct(t.wins, t.losses),
            team: t.name,
            abbrev: t.abbrev,
            gm: t.gm,
            conference: t.conference,
            color: t.color,
            wins: t.wins,
            losses: t.losses,
        })
        .collect()
}

/// One slot of the next season's draft order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSlot {
    pub pick: usize,
    pub team: String,
    pub abbrev: String,
    pub gm: String,
    pub color: String,
    pub wins: u32,
    pub losses: u32,
    pub pct: String,
}

pub fn draft_board(teams: &[Team]) -> Vec<DraftSlot> {
    draft_order(teams)
        .into_iter()
        .enumerate()
        .map(|(i, t)| DraftSlot {
            pick: i + 1,
            pct: format_pct(t.wins, t.losses),
            team: t.name,
            abbrev: t.abbrev,
            gm: t.gm,
            color: t.color,
            wins: t.wins,
            losses: t.losses,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, conference: Conference, wins: u32, losses: u32) -> Team {
        Team {
            name: name.into(),
            abbrev: name.to_uppercase(),
            gm: format!("@{name}"),
            conference,
            wins,
            losses,
            color: "#000000".into(),
            roster: vec![],
        }
    }

    fn names(teams: &[Team]) -> Vec<&str> {
        teams.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn draft_board_numbers_picks() {
        let teams = vec![
            team("Suns", Conference::West, 4, 1),
            team("Knicks", Conference::East, 1, 4),
        ];
        let board = draft_board(&teams);
        assert_eq!(board[0].pick, 1);
        assert_eq!(board[0].team, "Knicks");
        assert_eq!(board[0].pct, "0.200");
        assert_eq!(board[1].pick, 2);
    }

    #[test]
    fn win_pct_none_without_games() {
        assert_eq!(win_pct(0, 0), None);
        assert_eq!(win_pct(4, 1), Some(0.8));
    }

    #[test]
    fn pct_formatting() {
        assert_eq!(format_pct(4, 1), "0.800");
        assert_eq!(format_pct(5, 0), "1.000");
        assert_eq!(format_pct(0, 0), ".000");
        assert_eq!(format_pct(1, 2), "0.333");
    }

    #[test]
    fn standings_sorted_by_pct_then_wins() {
        let teams = vec![
            team("a", Conference::West, 1, 4),
            team("b", Conference::East, 4, 1),
            team("c", Conference::West, 8, 2),
            team("d", Conference::East, 0, 0),
            team("e", Conference::West, 2, 3),
        ];
        assert_eq!(names(&sort_standings(&teams, None)), vec!["c", "b", "e", "a", "d"]);
        assert_eq!(
            names(&sort_standings(&teams, Some(Conference::East))),
            vec!["b", "d"]
        );
    }

    #[test]
    fn equal_records_keep_configured_order() {
        let teams = vec![
            team("x", Conference::West, 2, 3),
            team("y", Conference::West, 2, 3),
        ];
        assert_eq!(names(&sort_standings(&teams, None)), vec!["x", "y"]);
    }

    #[test]
    fn draft_order_worst_first_with_unplayed_at_500() {
        let teams = vec![
            team("good", Conference::West, 4, 1),
            team("new", Conference::West, 0, 0),
            team("bad", Conference::East, 1, 4),
            team("even", Conference::East, 3, 3),
            team("even_small", Conference::East, 1, 1),
        ];
        assert_eq!(
            names(&draft_order(&teams)),
            vec!["bad", "new", "even_small", "even", "good"]
        );
    }

    #[test]
    fn merge_adds_only_deltas_with_results() {
        let teams = vec![
            team("Suns", Conference::West, 4, 1),
            team("Thunder", Conference::West, 1, 4),
            team("Raptors", Conference::East, 1, 4),
        ];
        let mut delta = StandingsDelta::new();
        delta.insert(
            "Suns".into(),
            TeamDelta { wins: 1, losses: 0, points_for: 120.0, points_against: 99.0 },
        );
        delta.insert(
            "Thunder".into(),
            TeamDelta { wins: 0, losses: 0, points_for: 50.0, points_against: 0.0 },
        );

        let merged = merge_standings(&teams, &delta);
        assert_eq!((merged[0].wins, merged[0].losses), (5, 1));
        assert_eq!((merged[1].wins, merged[1].losses), (1, 4));
        assert_eq!((merged[2].wins, merged[2].losses), (1, 4));
    }

    #[test]
    fn table_rows_are_ranked() {
        let teams = vec![
            team("Thunder", Conference::West, 1, 4),
            team("Suns", Conference::West, 4, 1),
        ];
        let rows = standings_table(&teams, None);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].team, "Suns");
        assert_eq!(rows[0].pct, "0.800");
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].pct, "0.200");
    }
}
