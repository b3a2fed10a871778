// Season data loading: published sheet tabs merged over the configured
// fallback data.

use futures_util::future::join3;
use tracing::{info, warn};

use dleague_core::config::{LeagueData, SeasonConfig};
use dleague_core::model::{Game, Team};
use dleague_core::sheets::{csv_url, merge_season, parse_rosters, parse_schedule, parse_standings};

use crate::sheets::{fetch_tab, SheetSource};

/// Teams and schedule for one season, before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonData {
    pub teams: Vec<Team>,
    pub schedule: Vec<Game>,
}

impl SeasonData {
    fn fallback(league: &LeagueData) -> Self {
        SeasonData {
            teams: league.teams.clone(),
            schedule: league.schedule.clone(),
        }
    }
}

/// Load a season's teams and schedule.
///
/// Seasons without a sheet URL use the configured data as-is. Otherwise the
/// standings, schedule and rosters tabs are fetched together; any tab that
/// fails or parses empty leaves the matching fallback data in place.
pub async fn load_season_data(
    league: &LeagueData,
    season: &SeasonConfig,
    sheets: &dyn SheetSource,
) -> SeasonData {
    if !season.sheet_enabled() {
        return SeasonData::fallback(league);
    }

    let base = season.sheet_base_url.trim();
    let standings_url = csv_url(base, season.gids.standings);
    let schedule_url = csv_url(base, season.gids.schedule);
    let rosters_url = csv_url(base, season.gids.rosters);

    let (standings_csv, schedule_csv, rosters_csv) = join3(
        fetch_tab(sheets, &standings_url),
        fetch_tab(sheets, &schedule_url),
        fetch_tab(sheets, &rosters_url),
    )
    .await;

    let standings = standings_csv.as_deref().map(parse_standings).unwrap_or_default();
    let rosters = rosters_csv.as_deref().map(parse_rosters).unwrap_or_default();
    let parsed_schedule = schedule_csv.as_deref().map(parse_schedule).unwrap_or_default();

    let schedule = if parsed_schedule.is_empty() {
        if schedule_csv.is_some() {
            warn!(season = season.id, "schedule tab parsed empty; keeping fallback schedule");
        }
        league.schedule.clone()
    } else {
        parsed_schedule
    };

    info!(
        season = season.id,
        standings = standings.len(),
        rosters = rosters.len(),
        games = schedule.len(),
        "loaded season from sheet"
    );

    SeasonData {
        teams: merge_season(&league.teams, &standings, &rosters),
        schedule,
    }
}
