// Messages between the season loader task and the TUI render loop.

use std::sync::Arc;

use dleague_app::SeasonSnapshot;
use dleague_core::config::SeasonConfig;

/// Main panel tabs, in key order (`1`..`5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Standings,
    Schedule,
    Teams,
    Draft,
    Scoring,
}

impl TabId {
    pub const ALL: [TabId; 5] = [
        TabId::Standings,
        TabId::Schedule,
        TabId::Teams,
        TabId::Draft,
        TabId::Scoring,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TabId::Standings => "Standings",
            TabId::Schedule => "Schedule",
            TabId::Teams => "Teams",
            TabId::Draft => "Draft",
            TabId::Scoring => "Scoring",
        }
    }

    /// Tab for a number key, `'1'` through `'5'`.
    pub fn from_key(c: char) -> Option<TabId> {
        let idx = c.to_digit(10)?.checked_sub(1)? as usize;
        TabId::ALL.get(idx).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// League name and the configured seasons, sent once at startup.
    Seasons {
        league: String,
        seasons: Vec<SeasonConfig>,
    },
    Status {
        season: u32,
        status: LoadStatus,
    },
    Snapshot(Arc<SeasonSnapshot>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    SelectSeason(u32),
    Refresh,
    Quit,
}
