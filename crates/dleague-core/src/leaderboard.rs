// Player leaderboards and average draft position (ADP).
//
// A player's position on a game day is their rank among every starter that
// day, best score first. ADP averages those positions across game days.

use crate::scoring::{ScoredGame, ScoredMatchup};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub player: String,
    pub team: String,
    pub game_day: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub entry: PlayerScore,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAdp {
    pub player: String,
    pub team: String,
    pub games_played: usize,
    pub avg_score: f64,
    pub adp: f64,
}

fn matchup_scores(game: &ScoredGame, m: &ScoredMatchup, out: &mut Vec<PlayerScore>) {
    let m = &m.matchup;
    let sides = [
        (&m.away, &m.away_starters, &m.away_starter_scores),
        (&m.home, &m.home_starters, &m.home_starter_scores),
    ];
    for (team, starters, scores) in sides {
        for (i, player) in starters.iter().enumerate() {
            out.push(PlayerScore {
                player: player.clone(),
                team: team.clone(),
                game_day: game.label.clone(),
                score: scores.get(i).copied().unwrap_or(0.0),
            });
        }
    }
}

fn game_scores(game: &ScoredGame) -> Vec<PlayerScore> {
    let mut out = Vec::new();
    for m in &game.matchups {
        matchup_scores(game, m, &mut out);
    }
    out
}

fn rank(mut scores: Vec<PlayerScore>) -> Vec<LeaderboardEntry> {
    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scores
        .into_iter()
        .enumerate()
        .map(|(i, entry)| LeaderboardEntry {
            entry,
            position: i + 1,
        })
        .collect()
}

/// Every starter score from game days that have been played.
pub fn all_player_scores(schedule: &[ScoredGame]) -> Vec<PlayerScore> {
    schedule
        .iter()
        .filter(|g| g.played)
        .flat_map(game_scores)
        .collect()
}

/// Ranked starters for a single game day; empty when the label is unknown.
pub fn game_day_leaderboard(schedule: &[ScoredGame], label: &str) -> Vec<LeaderboardEntry> {
    schedule
        .iter()
        .find(|g| g.label == label)
        .map(|g| rank(game_scores(g)))
        .unwrap_or_default()
}

/// Labels of played game days that have at least one starter, in schedule
/// order.
pub fn scored_game_days(schedule: &[ScoredGame]) -> Vec<&str> {
    schedule
        .iter()
        .filter(|g| g.played && !game_scores(g).is_empty())
        .map(|g| g.label.as_str())
        .collect()
}

/// Average score and ADP per player across played game days, best ADP first.
pub fn player_adp(schedule: &[ScoredGame]) -> Vec<PlayerAdp> {
    struct Acc {
        team: String,
        scores: Vec<f64>,
        positions: Vec<usize>,
    }

    let mut order: Vec<String> = Vec::new();
    let mut players: HashMap<String, Acc> = HashMap::new();

    for game in schedule.iter().filter(|g| g.played) {
        for ranked in rank(game_scores(game)) {
            let acc = players.entry(ranked.entry.player.clone()).or_insert_with(|| {
                order.push(ranked.entry.player.clone());
                Acc {
                    team: ranked.entry.team.clone(),
                    scores: Vec::new(),
                    positions: Vec::new(),
                }
            });
            acc.scores.push(ranked.entry.score);
            acc.positions.push(ranked.position);
        }
    }

    let mut results: Vec<PlayerAdp> = order
        .into_iter()
        .filter_map(|player| {
            let acc = players.remove(&player)?;
            let n = acc.scores.len();
            Some(PlayerAdp {
                games_played: n,
                avg_score: acc.scores.iter().sum::<f64>() / n as f64,
                adp: acc.positions.iter().sum::<usize>() as f64 / n as f64,
                team: acc.team,
                player,
            })
        })
        .collect();
    results.sort_by(|a, b| a.adp.partial_cmp(&b.adp).unwrap_or(Ordering::Equal));
    results
}
