// League service: the one place the server and TUI get season data from.
//
// A snapshot is the season's merged teams plus its fully scored schedule.
// Snapshots are cached for the sheet TTL; draft lookups for the Real Sports
// TTL, so repeated page loads do not refetch every lineup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info};

use dleague_core::calendar::{season_summary, SeasonSummary};
use dleague_core::config::{Config, SeasonConfig};
use dleague_core::model::{RealSportsDraft, Team, TeamDraftCapital};
use dleague_core::scoring::{calculate_scores, score_matchups, ScoreRequest, ScoredGame, ScoresResponse};
use dleague_core::source::{DraftSource, FetchError};
use dleague_core::standings::{merge_standings, StandingsDelta};
use dleague_realsports::RealSportsClient;

use crate::cache::TtlCache;
use crate::season::load_season_data;
use crate::sheets::{HttpSheetSource, SheetSource};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Season {0} not found")]
    UnknownSeason(u32),

    #[error("Season {0} is locked")]
    SeasonLocked(u32),
}

/// Everything the site shows for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSnapshot {
    #[serde(serialize_with = "serialize_season_info")]
    pub season: SeasonConfig,
    pub league_name: String,
    /// Teams with the new results added to their baseline records.
    pub teams: Vec<Team>,
    pub schedule: Vec<ScoredGame>,
    pub new_results: StandingsDelta,
    pub draft_capital: Vec<TeamDraftCapital>,
    pub summary: SeasonSummary,
}

fn serialize_season_info<S: serde::Serializer>(
    season: &SeasonConfig,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    season.info().serialize(serializer)
}

// ---------------------------------------------------------------------------
// CachedDraftSource
// ---------------------------------------------------------------------------

/// `DraftSource` wrapper that remembers successful lookups.
pub struct CachedDraftSource {
    inner: Arc<dyn DraftSource>,
    cache: TtlCache<(u64, String), RealSportsDraft>,
}

impl CachedDraftSource {
    pub fn new(inner: Arc<dyn DraftSource>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl),
        }
    }
}

#[async_trait]
impl DraftSource for CachedDraftSource {
    async fn fetch_draft(
        &self,
        draft_id: u64,
        user_code: &str,
    ) -> Result<RealSportsDraft, FetchError> {
        self.cache
            .get_or_try_insert_with((draft_id, user_code.to_string()), || {
                self.inner.fetch_draft(draft_id, user_code)
            })
            .await
    }
}

// ---------------------------------------------------------------------------
// LeagueService
// ---------------------------------------------------------------------------

pub struct LeagueService {
    config: Config,
    sheets: Arc<dyn SheetSource>,
    drafts: CachedDraftSource,
    snapshots: TtlCache<u32, Arc<SeasonSnapshot>>,
}

impl LeagueService {
    pub fn new(config: Config, sheets: Arc<dyn SheetSource>, drafts: Arc<dyn DraftSource>) -> Self {
        let drafts = CachedDraftSource::new(
            drafts,
            Duration::from_secs(config.site.real_sports.cache_ttl_secs),
        );
        let snapshots = TtlCache::new(Duration::from_secs(config.site.sheets.cache_ttl_secs));
        Self {
            config,
            sheets,
            drafts,
            snapshots,
        }
    }

    /// Service backed by the live sheet and Real Sports clients.
    pub fn from_config(config: Config) -> Self {
        let sheets = Arc::new(HttpSheetSource::new(&config.site.sheets));
        let client = RealSportsClient::from_config(&config);
        if !client.is_active() {
            info!("Real Sports credentials not set; draft lookups are disabled");
        }
        Self::new(config, sheets, Arc::new(client))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn league_name(&self) -> &str {
        &self.config.league.league.name
    }

    pub fn seasons(&self) -> &[SeasonConfig] {
        &self.config.seasons
    }

    /// The first season that is not locked.
    pub fn default_season(&self) -> Option<&SeasonConfig> {
        self.config.seasons.iter().find(|s| !s.locked)
    }

    fn open_season(&self, id: u32) -> Result<&SeasonConfig, ServiceError> {
        let season = self.config.season(id).ok_or(ServiceError::UnknownSeason(id))?;
        if season.locked {
            return Err(ServiceError::SeasonLocked(id));
        }
        Ok(season)
    }

    pub async fn snapshot(&self, id: u32) -> Result<Arc<SeasonSnapshot>, ServiceError> {
        let season = self.open_season(id)?;
        if let Some(snapshot) = self.snapshots.get(&id).await {
            debug!(season = id, "season snapshot served from cache");
            return Ok(snapshot);
        }

        let snapshot = Arc::new(self.build_snapshot(season).await);
        self.snapshots.insert(id, snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Drop the cached snapshot and build a fresh one.
    pub async fn refresh(&self, id: u32) -> Result<Arc<SeasonSnapshot>, ServiceError> {
        self.open_season(id)?;
        self.snapshots.invalidate(&id).await;
        self.snapshot(id).await
    }

    async fn build_snapshot(&self, season: &SeasonConfig) -> SeasonSnapshot {
        let started = Instant::now();
        let data = load_season_data(&self.config.league, season, self.sheets.as_ref()).await;
        let report = calculate_scores(
            &data.schedule,
            &self.drafts,
            self.config.site.real_sports.score_batch_size,
        )
        .await;

        let teams = merge_standings(&data.teams, &report.new_results);
        let summary = season_summary(&report.schedule);
        info!(
            season = season.id,
            games = report.schedule.len(),
            played = summary.played_games,
            new_results = report.new_results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built season snapshot"
        );

        SeasonSnapshot {
            season: season.clone(),
            league_name: self.league_name().to_string(),
            teams,
            schedule: report.schedule,
            new_results: report.new_results,
            draft_capital: self.config.league.draft_capital.clone(),
            summary,
        }
    }

    pub async fn fetch_draft(
        &self,
        draft_id: u64,
        user_code: &str,
    ) -> Result<RealSportsDraft, FetchError> {
        self.drafts.fetch_draft(draft_id, user_code).await
    }

    pub async fn score_matchups(&self, requests: &[ScoreRequest]) -> ScoresResponse {
        score_matchups(
            requests,
            &self.drafts,
            self.config.site.real_sports.score_batch_size,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sheet_config, test_config, FakeDrafts, FakeSheets};
    use dleague_core::model::Winner;

    fn service(
        config: Config,
        sheets: FakeSheets,
        drafts: FakeDrafts,
    ) -> (LeagueService, Arc<FakeSheets>, Arc<FakeDrafts>) {
        let sheets = Arc::new(sheets);
        let drafts = Arc::new(drafts);
        (
            LeagueService::new(config, sheets.clone(), drafts.clone()),
            sheets,
            drafts,
        )
    }

    fn scored_drafts() -> FakeDrafts {
        FakeDrafts::default()
            .with_draft("HOME1", &[("Jokic", 60.0), ("Curry", 40.5)])
            .with_draft("AWAY1", &[("SGA", 55.0), ("Holmgren", 20.0)])
    }

    #[tokio::test]
    async fn unknown_and_locked_seasons() {
        let (svc, _, _) = service(test_config(), FakeSheets::default(), FakeDrafts::default());
        assert_eq!(svc.snapshot(9).await.unwrap_err(), ServiceError::UnknownSeason(9));
        assert_eq!(svc.snapshot(2).await.unwrap_err(), ServiceError::SeasonLocked(2));
        assert_eq!(svc.refresh(2).await.unwrap_err(), ServiceError::SeasonLocked(2));
        assert_eq!(svc.default_season().map(|s| s.id), Some(1));
    }

    #[tokio::test]
    async fn snapshot_scores_fallback_schedule() {
        let (svc, _, drafts) = service(test_config(), FakeSheets::default(), scored_drafts());
        let snap = svc.snapshot(1).await.unwrap();

        assert_eq!(snap.league_name, "Test League");
        assert_eq!(snap.schedule.len(), 2);
        assert_eq!(drafts.calls(), 2);

        let m = &snap.schedule[1].matchups[0];
        assert_eq!(m.home_total, Some(100.5));
        assert_eq!(m.away_total, Some(75.0));
        assert_eq!(m.winner, Some(Winner::Home));
        assert!(snap.schedule[1].played);

        // Suns 1-0 baseline plus the fetched win; preseason is excluded.
        let suns = snap.teams.iter().find(|t| t.name == "Suns").unwrap();
        assert_eq!((suns.wins, suns.losses), (2, 0));
        let thunder = snap.teams.iter().find(|t| t.name == "Thunder").unwrap();
        assert_eq!((thunder.wins, thunder.losses), (0, 2));

        assert_eq!(snap.summary.total_games, 1);
        assert_eq!(snap.summary.played_games, 1);
        assert_eq!(snap.draft_capital.len(), 1);
    }

    #[tokio::test]
    async fn snapshot_is_cached_until_refresh() {
        let sheets = FakeSheets::default().with_tab(11, "Team,Wins,Losses\nSuns,3,2\n");
        let (svc, sheets, _) = service(sheet_config(), sheets, scored_drafts());

        let first = svc.snapshot(1).await.unwrap();
        let second = svc.snapshot(1).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(sheets.calls(), 3);

        svc.refresh(1).await.unwrap();
        assert_eq!(sheets.calls(), 6);
    }

    #[tokio::test]
    async fn draft_lookups_are_cached() {
        let (svc, _, drafts) = service(test_config(), FakeSheets::default(), scored_drafts());
        let a = svc.fetch_draft(1429, "HOME1").await.unwrap();
        let b = svc.fetch_draft(1429, "HOME1").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total_score, 100.5);
        assert_eq!(drafts.calls(), 1);

        assert_eq!(
            svc.fetch_draft(1429, "missing").await.unwrap_err(),
            FetchError::Status { status: 404 }
        );
        assert!(svc.fetch_draft(1429, "missing").await.is_err());
        assert_eq!(drafts.calls(), 3);
    }

    #[tokio::test]
    async fn score_matchups_uses_shared_draft_cache() {
        let drafts = FakeDrafts::default()
            .with_draft("h", &[("A", 10.0)])
            .with_draft("a", &[("B", 12.0)]);
        let (svc, _, drafts) = service(test_config(), FakeSheets::default(), drafts);

        let requests = vec![ScoreRequest {
            game_label: "Game 1".into(),
            home: "Suns".into(),
            away: "Thunder".into(),
            draft_id: Some(1),
            home_draft_code: Some("h".into()),
            away_draft_code: Some("a".into()),
        }];
        let response = svc.score_matchups(&requests).await;
        assert_eq!(response.results[0].winner, Some(Winner::Away));
        assert_eq!(response.standings["Thunder"].wins, 1);

        svc.score_matchups(&requests).await;
        assert_eq!(drafts.calls(), 2);
    }
}
