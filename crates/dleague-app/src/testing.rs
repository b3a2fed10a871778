// Shared fixtures for the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use dleague_core::config::{parse_config, Config, CredentialsConfig};
use dleague_core::model::{RealSportsDraft, RealSportsPlayer};
use dleague_core::source::{DraftSource, FetchError};

use crate::sheets::SheetSource;

pub const LEAGUE: &str = r##"
[league]
name = "Test League"

[[teams]]
name = "Suns"
abbrev = "PHX"
gm = "@dbook"
conference = "West"
wins = 1
losses = 0
color = "#E56020"
roster = ["@jaxon"]

[[teams]]
name = "Thunder"
abbrev = "OKC"
gm = "@frager"
conference = "West"
wins = 0
losses = 1
color = "#007AC1"

[[teams]]
name = "Knicks"
abbrev = "NYK"
gm = "@kw"
conference = "East"
color = "#006BB6"

[[teams]]
name = "Celtics"
abbrev = "BOS"
gm = "@cc"
conference = "East"
color = "#007A33"

[[schedule]]
label = "Preseason Game 1"
date = "1/26"
matchups = [{ away = "Thunder", home = "Suns", awayScore = 80.0, homeScore = 90.0 }]

[[schedule]]
label = "Game 1"
date = "1/28"
matchups = [
  { away = "Thunder", home = "Suns", draftId = 1429, homeDraftCode = "HOME1", awayDraftCode = "AWAY1" },
  { away = "Celtics", home = "Knicks" },
]

[[draft_capital]]
team = "Suns"
[[draft_capital.seasons]]
season = "S2"
picks = [{ round = "1st", origin = "Suns" }, { round = "2nd", origin = "Thunder" }]
"##;

pub const SITE: &str = r#"
[http]
bind = "127.0.0.1"
port = 0

[sheets]
timeout_ms = 1000
cache_ttl_secs = 60

[real_sports]
base_url = "http://127.0.0.1:9"
origin = "https://realsports.io"
version = "27"
device_type = "desktop_web"
timeout_ms = 1000
cache_ttl_secs = 30
score_batch_size = 2

[tui]
refresh_secs = 120

[[seasons]]
id = 1
label = "Season 1"
locked = false
year = 2026

[[seasons]]
id = 2
label = "Season 2"
locked = true
description = "Coming soon"
year = 2027
"#;

pub fn test_config() -> Config {
    parse_config(LEAGUE, SITE, CredentialsConfig::default()).unwrap()
}

/// Same as `test_config`, with season 1 reading from a published sheet.
pub fn sheet_config() -> Config {
    let mut config = test_config();
    config.seasons[0].sheet_base_url = "https://sheets.test/pub".into();
    config.seasons[0].gids.standings = 11;
    config.seasons[0].gids.schedule = 22;
    config.seasons[0].gids.rosters = 33;
    config
}

#[derive(Default)]
pub struct FakeSheets {
    pub tabs: HashMap<String, String>,
    pub calls: AtomicUsize,
}

impl FakeSheets {
    pub fn with_tab(mut self, gid: u64, csv: &str) -> Self {
        self.tabs.insert(
            dleague_core::sheets::csv_url("https://sheets.test/pub", gid),
            csv.to_string(),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SheetSource for FakeSheets {
    async fn fetch_csv(&self, url: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tabs
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no tab at {url}"))
    }
}

#[derive(Default)]
pub struct FakeDrafts {
    pub drafts: HashMap<String, RealSportsDraft>,
    pub requested: Mutex<Vec<(u64, String)>>,
}

impl FakeDrafts {
    pub fn with_draft(mut self, code: &str, scores: &[(&str, f64)]) -> Self {
        self.drafts.insert(code.to_string(), draft(scores));
        self
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

#[async_trait]
impl DraftSource for FakeDrafts {
    async fn fetch_draft(&self, draft_id: u64, user_code: &str) -> Result<RealSportsDraft, FetchError> {
        self.requested
            .lock()
            .unwrap()
            .push((draft_id, user_code.to_string()));
        self.drafts
            .get(user_code)
            .cloned()
            .ok_or(FetchError::Status { status: 404 })
    }
}

pub fn draft(scores: &[(&str, f64)]) -> RealSportsDraft {
    let lineup: Vec<RealSportsPlayer> = scores
        .iter()
        .enumerate()
        .map(|(i, (name, score))| RealSportsPlayer {
            order: i as u32 + 1,
            player_id: i as u64 + 100,
            display_name: name.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            multiplier: 1.0,
            multiplier_display: "1x".into(),
            score: *score,
            avatar: String::new(),
            team_id: 0,
            jersey: 0,
            background_color: "#333333".into(),
        })
        .collect();
    RealSportsDraft {
        contest_id: 1429,
        contest_day: String::new(),
        sport: "nba".into(),
        is_finalized: true,
        lineup_size: lineup.len() as u32,
        user_name: String::new(),
        user_id: String::new(),
        total_score: RealSportsDraft::lineup_total(&lineup),
        lineup,
    }
}
