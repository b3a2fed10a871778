// Route handlers. Every season route reads from the cached snapshot.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use dleague_core::calendar::{calendar, next_game_day};
use dleague_core::config::{SeasonConfig, SeasonInfo};
use dleague_core::leaderboard::{game_day_leaderboard, player_adp, scored_game_days};
use dleague_core::model::{Conference, Team};
use dleague_core::scoring::ScoreRequest;
use dleague_core::standings::{draft_board, standings_table};

use crate::error::ApiError;
use crate::AppState;

type ApiResult = Result<Response, ApiError>;

// ---------------------------------------------------------------------------
// Query and body types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConferenceQuery {
    conference: Option<String>,
}

impl ConferenceQuery {
    /// Blank or `all` means no filter.
    fn filter(&self) -> Result<Option<Conference>, ApiError> {
        match self.conference.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
            Some(s) => Conference::parse(s)
                .map(Some)
                .ok_or_else(|| ApiError::bad_request(format!("Invalid conference: {s}"))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScoringQuery {
    game_day: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScoresBody {
    #[serde(default)]
    matchups: Option<Vec<ScoreRequest>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub(crate) async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn seasons(State(state): State<AppState>) -> Response {
    let seasons: Vec<SeasonInfo> = state
        .service
        .seasons()
        .iter()
        .map(SeasonConfig::info)
        .collect();
    Json(json!({
        "league": state.service.league_name(),
        "seasons": seasons,
    }))
    .into_response()
}

pub(crate) async fn season(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult {
    let snapshot = state.service.snapshot(id).await?;
    Ok(Json(&*snapshot).into_response())
}

pub(crate) async fn standings(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(query): Query<ConferenceQuery>,
) -> ApiResult {
    let conference = query.filter()?;
    let snapshot = state.service.snapshot(id).await?;
    Ok(Json(json!({
        "conference": conference,
        "standings": standings_table(&snapshot.teams, conference),
        "newResults": snapshot.new_results,
    }))
    .into_response())
}

pub(crate) async fn schedule(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult {
    let snapshot = state.service.snapshot(id).await?;
    Ok(Json(json!({
        "schedule": snapshot.schedule,
        "summary": snapshot.summary,
    }))
    .into_response())
}

pub(crate) async fn season_calendar(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult {
    let snapshot = state.service.snapshot(id).await?;
    let year = snapshot.season.year;
    let today = chrono::Local::now().date_naive();
    Ok(Json(json!({
        "calendar": calendar(&snapshot.schedule, year),
        "nextGameDay": next_game_day(&snapshot.schedule, year, today),
        "summary": snapshot.summary,
    }))
    .into_response())
}

pub(crate) async fn teams(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(query): Query<ConferenceQuery>,
) -> ApiResult {
    let conference = query.filter()?;
    let snapshot = state.service.snapshot(id).await?;
    let teams: Vec<&Team> = snapshot
        .teams
        .iter()
        .filter(|t| conference.map_or(true, |c| t.conference == c))
        .collect();
    Ok(Json(json!({ "teams": teams })).into_response())
}

pub(crate) async fn draft_capital(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult {
    let snapshot = state.service.snapshot(id).await?;
    Ok(Json(json!({
        "order": draft_board(&snapshot.teams),
        "capital": snapshot.draft_capital,
    }))
    .into_response())
}

pub(crate) async fn scoring(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(query): Query<ScoringQuery>,
) -> ApiResult {
    let snapshot = state.service.snapshot(id).await?;
    let game_days = scored_game_days(&snapshot.schedule);
    let selected = query
        .game_day
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .or_else(|| game_days.last().copied());
    let leaderboard = selected
        .map(|label| game_day_leaderboard(&snapshot.schedule, label))
        .unwrap_or_default();
    Ok(Json(json!({
        "gameDays": game_days,
        "gameDay": selected,
        "leaderboard": leaderboard,
        "adp": player_adp(&snapshot.schedule),
    }))
    .into_response())
}

pub(crate) async fn refresh(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult {
    let snapshot = state.service.refresh(id).await?;
    info!(season = id, "season refreshed on request");
    Ok(Json(json!({
        "refreshed": true,
        "summary": snapshot.summary,
    }))
    .into_response())
}

/// `GET /api/draft?draftId=1442&code=xnrW4GxJ`: proxy a single draft lookup.
pub(crate) async fn draft(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    let draft_id = params.get("draftId").filter(|v| !v.is_empty());
    let code = params.get("code").filter(|v| !v.is_empty());
    let (Some(draft_id), Some(code)) = (draft_id, code) else {
        return Err(ApiError::bad_request("Missing draftId or code parameter"));
    };
    let draft_id = parse_leading_int(draft_id)
        .filter(|&id| id > 0)
        .ok_or_else(|| ApiError::bad_request("Invalid draftId"))?;

    let draft = state
        .service
        .fetch_draft(draft_id, code)
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(draft).into_response())
}

/// `POST /api/scores`: score submitted matchups and tally standings.
pub(crate) async fn scores(
    State(state): State<AppState>,
    body: Result<Json<ScoresBody>, JsonRejection>,
) -> ApiResult {
    let Json(body) = body.map_err(|e| {
        debug!(error = %e, "rejected scores body");
        ApiError::bad_request("Invalid request body")
    })?;
    let requests = body.matchups.unwrap_or_default();
    let response = state.service.score_matchups(&requests).await;
    info!(
        matchups = requests.len(),
        teams = response.standings.len(),
        "scored submitted matchups"
    );
    Ok(Json(response).into_response())
}

/// Leading decimal digits, so `"1442abc"` reads as 1442.
fn parse_leading_int(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let digits = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, c)| &trimmed[..i + c.len_utf8()])?;
    digits.parse().ok()
}
