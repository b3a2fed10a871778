// Test fixtures: a league service over the shipped defaults with offline
// sheet and draft sources.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use dleague_app::sheets::SheetSource;
use dleague_app::LeagueService;
use dleague_core::config::{parse_config, Config, CredentialsConfig};
use dleague_core::model::RealSportsDraft;
use dleague_core::source::{DraftSource, FetchError};

fn project_root() -> PathBuf {
    let cwd = std::env::current_dir().unwrap();
    if cwd.join("defaults").exists() {
        cwd
    } else if cwd.join("../../defaults").exists() {
        cwd.join("../..")
    } else {
        panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
    }
}

pub fn default_config() -> Config {
    let root = project_root();
    let league = std::fs::read_to_string(root.join("defaults/league.toml")).unwrap();
    let site = std::fs::read_to_string(root.join("defaults/site.toml")).unwrap();
    parse_config(&league, &site, CredentialsConfig::default()).unwrap()
}

struct OfflineSheets;

#[async_trait]
impl SheetSource for OfflineSheets {
    async fn fetch_csv(&self, url: &str) -> anyhow::Result<String> {
        anyhow::bail!("offline: {url}")
    }
}

struct OfflineDrafts;

#[async_trait]
impl DraftSource for OfflineDrafts {
    async fn fetch_draft(&self, _draft_id: u64, _user_code: &str) -> Result<RealSportsDraft, FetchError> {
        Err(FetchError::NotConfigured)
    }
}

pub fn test_service() -> Arc<LeagueService> {
    Arc::new(LeagueService::new(
        default_config(),
        Arc::new(OfflineSheets),
        Arc::new(OfflineDrafts),
    ))
}

/// Snapshot of the default season, built through the service.
pub async fn default_snapshot() -> Arc<dleague_app::SeasonSnapshot> {
    test_service().snapshot(1).await.unwrap()
}

/// The default snapshot with "Game 1" played and one matchup's lineups
/// filled in.
pub async fn scored_snapshot() -> Arc<dleague_app::SeasonSnapshot> {
    let mut snapshot = (*default_snapshot().await).clone();
    if let Some(game) = snapshot.schedule.iter_mut().find(|g| g.label == "Game 1") {
        game.played = true;
        let m = &mut game.matchups[0];
        m.matchup.away_starters = vec!["@hankthetank4".into(), "@elitrem".into()];
        m.matchup.away_starter_scores = vec![41.5, 12.0];
        m.matchup.home_starters = vec!["@lotto12".into()];
        m.matchup.home_starter_scores = vec![30.0];
        m.away_total = Some(53.5);
        m.home_total = Some(30.0);
        m.winner = Some(dleague_core::model::Winner::Away);
    }
    snapshot.summary = dleague_core::calendar::season_summary(&snapshot.schedule);
    Arc::new(snapshot)
}

/// A view state with seasons and the scored snapshot applied.
pub async fn loaded_view_state() -> crate::tui::ViewState {
    let mut state = crate::tui::ViewState::default();
    state.league_name = "NBA Draft League".into();
    state.seasons = default_config().seasons;
    state.selected_season = Some(1);
    state.snapshot = Some(scored_snapshot().await);
    state.load_status = crate::protocol::LoadStatus::Ready;
    state
}

/// Render with `draw` on a test terminal and return the buffer as text.
pub fn render_to_string(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
