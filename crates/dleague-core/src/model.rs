// League domain types shared by every crate in the workspace.
//
// Everything here serializes camelCase so the JSON API mirrors the shapes the
// site front end consumes.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

/// The two conferences a league team can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conference {
    West,
    East,
}

impl Conference {
    pub const ALL: [Conference; 2] = [Conference::West, Conference::East];

    pub fn as_str(self) -> &'static str {
        match self {
            Conference::West => "West",
            Conference::East => "East",
        }
    }

    /// Parse a conference name case-insensitively ("west", "East", ...).
    pub fn parse(s: &str) -> Option<Conference> {
        match s.trim().to_ascii_lowercase().as_str() {
            "west" => Some(Conference::West),
            "east" => Some(Conference::East),
            _ => None,
        }
    }
}

impl std::fmt::Display for Conference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A league team with its baseline record and roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    pub abbrev: String,
    pub gm: String,
    pub conference: Conference,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    pub color: String,
    #[serde(default)]
    pub roster: Vec<String>,
}

impl Team {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Look up a team's display color, falling back to neutral grey.
pub fn team_color<'a>(teams: &'a [Team], name: &str) -> &'a str {
    teams
        .iter()
        .find(|t| t.name == name)
        .map(|t| t.color.as_str())
        .unwrap_or("#888888")
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// One head-to-head pairing on a game day.
///
/// Scores are present when the sheet already recorded them. Draft codes are
/// Real Sports user entry codes, or the markers `FORFEIT` / `DQ`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    pub away: String,
    pub home: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub away_starters: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub home_starters: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub away_starter_scores: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub home_starter_scores: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub away_draft_links: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub home_draft_links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_draft_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_draft_code: Option<String>,
}

impl Matchup {
    pub fn new(away: impl Into<String>, home: impl Into<String>) -> Self {
        Matchup {
            away: away.into(),
            home: home.into(),
            ..Default::default()
        }
    }

    /// True when the sheet recorded a final score for both sides.
    pub fn has_scores(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

/// A game day: a slate of matchups sharing a label and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default)]
    pub id: usize,
    pub label: String,
    /// Month/day as written in the sheet, e.g. "1/26".
    pub date: String,
    #[serde(default = "default_sport")]
    pub sport: String,
    #[serde(default)]
    pub matchups: Vec<Matchup>,
    #[serde(default)]
    pub played: bool,
}

fn default_sport() -> String {
    "NBA".to_string()
}

impl Game {
    pub fn is_preseason(&self) -> bool {
        is_preseason_label(&self.label)
    }
}

pub fn is_preseason_label(label: &str) -> bool {
    label.to_lowercase().contains("preseason")
}

/// Which side of a matchup something applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Outcome of a scored matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Home,
    Away,
    Tie,
}

impl Winner {
    /// Compare two totals. Equal totals are a tie.
    pub fn decide(home: f64, away: f64) -> Winner {
        if home > away {
            Winner::Home
        } else if away > home {
            Winner::Away
        } else {
            Winner::Tie
        }
    }
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Home => Winner::Home,
            Side::Away => Winner::Away,
        }
    }
}

// ---------------------------------------------------------------------------
// Draft capital
// ---------------------------------------------------------------------------

/// A future draft pick: the round and the team it originally belonged to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    pub round: String,
    pub origin: String,
}

/// Picks a team holds for one future season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonPicks {
    pub season: String,
    #[serde(default)]
    pub picks: Vec<DraftPick>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDraftCapital {
    pub team: String,
    #[serde(default)]
    pub seasons: Vec<SeasonPicks>,
}

impl TeamDraftCapital {
    /// Picks acquired from other teams, across all seasons.
    pub fn acquired(&self) -> impl Iterator<Item = &DraftPick> {
        self.seasons
            .iter()
            .flat_map(|s| s.picks.iter())
            .filter(move |p| p.origin != self.team)
    }
}

// ---------------------------------------------------------------------------
// Real Sports drafts
// ---------------------------------------------------------------------------

/// One player slot in a Real Sports lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealSportsPlayer {
    pub order: u32,
    pub player_id: u64,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub multiplier: f64,
    pub multiplier_display: String,
    pub score: f64,
    pub avatar: String,
    pub team_id: u64,
    pub jersey: u32,
    pub background_color: String,
}

/// A single user's draft entry for a contest, with its lineup total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealSportsDraft {
    pub contest_id: u64,
    pub contest_day: String,
    pub sport: String,
    pub is_finalized: bool,
    pub lineup_size: u32,
    pub user_name: String,
    pub user_id: String,
    pub lineup: Vec<RealSportsPlayer>,
    pub total_score: f64,
}

impl RealSportsDraft {
    pub fn lineup_total(lineup: &[RealSportsPlayer]) -> f64 {
        lineup.iter().map(|p| p.score).sum()
    }
}

/// Render a score without a trailing ".0" for whole numbers.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        format!("{}", score as i64)
    } else {
        format!("{score:.1}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
