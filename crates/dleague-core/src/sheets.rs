// Google Sheets CSV parsing.
//
// A season's published spreadsheet has three tabs (Standings, Schedule,
// Rosters), each exported as CSV. Header names are matched loosely since the
// sheet is maintained by hand; rows that cannot be used are skipped, never
// fatal.

use crate::model::{Game, Matchup, Team};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Wins and losses for one team as recorded on the Standings tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SheetStanding {
    pub wins: u32,
    pub losses: u32,
}

/// GM and players for one team as recorded on the Rosters tab.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetRoster {
    pub gm: String,
    pub roster: Vec<String>,
}

/// Build the CSV export URL for one tab of a published sheet.
pub fn csv_url(base: &str, gid: u64) -> String {
    format!("{base}?gid={gid}&single=true&output=csv")
}

// ---------------------------------------------------------------------------
// Row splitting
// ---------------------------------------------------------------------------

/// Split CSV text into rows of trimmed cells.
///
/// Quoted fields (with `""` escapes and embedded commas) are honoured, rows may
/// have differing lengths, and rows with no content at all are dropped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => {
                if record.iter().all(|cell| cell.is_empty()) {
                    continue;
                }
                rows.push(record.iter().map(str::to_string).collect());
            }
            Err(e) => {
                warn!("skipping malformed CSV row: {}", e);
            }
        }
    }
    rows
}

fn cell(row: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
}

fn find_col(header: &[String], variants: &[&str]) -> Option<usize> {
    variants
        .iter()
        .find_map(|v| header.iter().position(|h| h == v))
}

/// Leading digits of a cell ("4", "4.0", "4 wins"); anything else is 0.
fn parse_count(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().unwrap_or(0)
}

fn parse_score(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

/// Parse the Standings tab. Expects `Team`, `Wins` and `Losses` columns.
pub fn parse_standings(csv: &str) -> HashMap<String, SheetStanding> {
    let rows = parse_rows(csv);
    let mut result = HashMap::new();
    if rows.len() < 2 {
        return result;
    }

    let header: Vec<String> = rows[0].iter().map(|h| h.to_lowercase()).collect();
    let (Some(team_idx), Some(wins_idx), Some(losses_idx)) = (
        find_col(&header, &["team"]),
        find_col(&header, &["wins"]),
        find_col(&header, &["losses"]),
    ) else {
        warn!("standings tab is missing a team, wins or losses column");
        return result;
    };

    for row in &rows[1..] {
        let team = cell(row, Some(team_idx));
        if team.is_empty() {
            continue;
        }
        result.insert(
            team.to_string(),
            SheetStanding {
                wins: parse_count(cell(row, Some(wins_idx))),
                losses: parse_count(cell(row, Some(losses_idx))),
            },
        );
    }
    result
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Pull a Real Sports user draft code out of a sheet cell.
///
/// The cell may hold a raw code, a full entry URL (`.../view/{code}?...`), or
/// one of the markers `FORFEIT` / `DQ`, which are returned unchanged.
pub fn extract_draft_code(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("forfeit") || trimmed.eq_ignore_ascii_case("dq") {
        return trimmed.to_string();
    }
    if let Some(pos) = trimmed.find("/view/") {
        let code: String = trimmed[pos + "/view/".len()..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        if !code.is_empty() {
            return code;
        }
    }
    trimmed.to_string()
}

/// Pull a contest id out of a sheet cell holding either a number or a
/// `playerratingcontest/{id}` URL.
pub fn extract_draft_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(id) = trimmed.parse::<u64>() {
        return (id > 0).then_some(id);
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        if v.is_finite() && v >= 1.0 && v.fract() == 0.0 {
            return Some(v as u64);
        }
    }
    let pos = trimmed.find("playerratingcontest/")?;
    let digits: String = trimmed[pos + "playerratingcontest/".len()..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

struct ScheduleColumns {
    date: usize,
    game: usize,
    home: usize,
    away: usize,
    home_link: Option<usize>,
    away_link: Option<usize>,
    sport: Option<usize>,
    home_score: Option<usize>,
    away_score: Option<usize>,
    draft_id: Option<usize>,
}

impl ScheduleColumns {
    fn locate(header_row: &[String]) -> Option<Self> {
        let header: Vec<String> = header_row
            .iter()
            .map(|h| h.to_lowercase().split_whitespace().collect())
            .collect();
        Some(ScheduleColumns {
            date: find_col(&header, &["date"])?,
            game: find_col(&header, &["gameid", "game", "gameday"])?,
            home: find_col(&header, &["hometeam", "home"])?,
            away: find_col(&header, &["awayteam", "away"])?,
            home_link: find_col(&header, &["homelink", "homedraft", "homedraftlink"]),
            away_link: find_col(&header, &["awaylink", "awaydraft", "awaydraftlink"]),
            sport: find_col(&header, &["sport"]),
            home_score: find_col(&header, &["homescore"]),
            away_score: find_col(&header, &["awayscore"]),
            draft_id: find_col(&header, &["draftid", "contestid", "draft_id"]),
        })
    }
}

/// Parse the Schedule tab into game days.
///
/// One row per matchup; rows sharing a game id are grouped into one game day,
/// kept in the order each id first appears.
pub fn parse_schedule(csv: &str) -> Vec<Game> {
    let rows = parse_rows(csv);
    if rows.len() < 2 {
        return Vec::new();
    }
    let Some(cols) = ScheduleColumns::locate(&rows[0]) else {
        warn!("schedule tab is missing a date, game, home or away column");
        return Vec::new();
    };

    let mut games: Vec<Game> = Vec::new();
    let mut index_by_label: HashMap<String, usize> = HashMap::new();

    for row in &rows[1..] {
        let game_id = cell(row, Some(cols.game));
        let home = cell(row, Some(cols.home));
        let away = cell(row, Some(cols.away));
        if game_id.is_empty() || home.is_empty() || away.is_empty() {
            continue;
        }

        let raw_home_link = cell(row, cols.home_link);
        let raw_away_link = cell(row, cols.away_link);

        let mut matchup = Matchup::new(away, home);
        matchup.draft_id = extract_draft_id(cell(row, cols.draft_id))
            .or_else(|| extract_draft_id(raw_home_link))
            .or_else(|| extract_draft_id(raw_away_link));
        let home_code = extract_draft_code(raw_home_link);
        if !home_code.is_empty() {
            matchup.home_draft_code = Some(home_code);
        }
        let away_code = extract_draft_code(raw_away_link);
        if !away_code.is_empty() {
            matchup.away_draft_code = Some(away_code);
        }
        matchup.home_score = parse_score(cell(row, cols.home_score));
        matchup.away_score = parse_score(cell(row, cols.away_score));

        let idx = match index_by_label.get(game_id) {
            Some(&idx) => idx,
            None => {
                let sport = cell(row, cols.sport);
                games.push(Game {
                    id: games.len(),
                    label: game_id.to_string(),
                    date: cell(row, Some(cols.date)).to_string(),
                    sport: if sport.is_empty() { "NBA".into() } else { sport.into() },
                    matchups: Vec::new(),
                    played: false,
                });
                index_by_label.insert(game_id.to_string(), games.len() - 1);
                games.len() - 1
            }
        };
        games[idx].matchups.push(matchup);
    }

    for game in &mut games {
        game.played = game.matchups.iter().any(Matchup::has_scores);
    }

    debug!(
        games = games.len(),
        with_drafts = games
            .iter()
            .filter(|g| g.matchups.iter().any(|m| m.draft_id.is_some()))
            .count(),
        "parsed schedule tab"
    );
    games
}

// ---------------------------------------------------------------------------
// Rosters
// ---------------------------------------------------------------------------

/// Parse the Rosters tab. Expects `Team` and `GM` columns; every non-empty
/// cell to the right of the GM column is a player.
pub fn parse_rosters(csv: &str) -> HashMap<String, SheetRoster> {
    let rows = parse_rows(csv);
    let mut result = HashMap::new();
    if rows.len() < 2 {
        return result;
    }

    let header: Vec<String> = rows[0].iter().map(|h| h.to_lowercase()).collect();
    let (Some(team_idx), Some(gm_idx)) = (find_col(&header, &["team"]), find_col(&header, &["gm"]))
    else {
        warn!("rosters tab is missing a team or gm column");
        return result;
    };

    for row in &rows[1..] {
        let team = cell(row, Some(team_idx));
        if team.is_empty() {
            continue;
        }
        let roster = row
            .iter()
            .skip(gm_idx + 1)
            .filter(|p| !p.is_empty())
            .cloned()
            .collect();
        result.insert(
            team.to_string(),
            SheetRoster {
                gm: cell(row, Some(gm_idx)).to_string(),
                roster,
            },
        );
    }
    result
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Overlay sheet standings and rosters on the configured team list.
///
/// Identity fields (abbreviation, color, conference) always come from the
/// configured teams; sheet rows for teams not configured are ignored.
pub fn merge_season(
    fallback: &[Team],
    standings: &HashMap<String, SheetStanding>,
    rosters: &HashMap<String, SheetRoster>,
) -> Vec<Team> {
    fallback
        .iter()
        .map(|team| {
            let mut merged = team.clone();
            if let Some(s) = standings.get(&team.name) {
                merged.wins = s.wins;
                merged.losses = s.losses;
            }
            if let Some(r) = rosters.get(&team.name) {
                if !r.gm.is_empty() {
                    merged.gm = r.gm.clone();
                }
                if !r.roster.is_empty() {
                    merged.roster = r.roster.clone();
                }
            }
            merged
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
