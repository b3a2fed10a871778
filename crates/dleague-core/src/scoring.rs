// Matchup scoring.
//
// A matchup is settled, in order of precedence, by a forfeit marker, by scores
// already recorded on the sheet, or by fetching both sides' Real Sports drafts
// and comparing lineup totals. Fetches run concurrently within bounded
// batches; a failed fetch leaves that side unscored and is only logged.

use crate::model::{Game, Matchup, RealSportsDraft, Side, Winner};
use crate::source::DraftSource;
use crate::standings::StandingsDelta;
use futures_util::future::{join, join_all};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

const FORFEIT: &str = "forfeit";
const DQ: &str = "dq";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A schedule matchup after scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatchup {
    #[serde(flatten)]
    pub matchup: Matchup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    #[serde(default)]
    pub home_draft_fetched: bool,
    #[serde(default)]
    pub away_draft_fetched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forfeit: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<Side>,
}

impl ScoredMatchup {
    fn unscored(matchup: &Matchup) -> Self {
        ScoredMatchup {
            matchup: matchup.clone(),
            home_total: None,
            away_total: None,
            winner: None,
            home_draft_fetched: false,
            away_draft_fetched: false,
            forfeit: None,
            dq: None,
        }
    }

    pub fn has_totals(&self) -> bool {
        self.home_total.is_some() && self.away_total.is_some()
    }

    /// True when this result came from fetched drafts or a forfeit/DQ marker
    /// rather than from scores typed into the sheet.
    fn is_new_result(&self) -> bool {
        self.home_draft_fetched || self.away_draft_fetched || self.forfeit.is_some() || self.dq.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredGame {
    pub id: usize,
    pub label: String,
    pub date: String,
    pub sport: String,
    pub matchups: Vec<ScoredMatchup>,
    pub played: bool,
}

impl ScoredGame {
    pub fn is_preseason(&self) -> bool {
        crate::model::is_preseason_label(&self.label)
    }
}

/// Output of scoring a whole schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub schedule: Vec<ScoredGame>,
    pub new_results: StandingsDelta,
}

/// One matchup submitted to the ad-hoc scoring endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(default)]
    pub game_label: String,
    pub home: String,
    pub away: String,
    #[serde(default)]
    pub draft_id: Option<u64>,
    #[serde(default)]
    pub home_draft_code: Option<String>,
    #[serde(default)]
    pub away_draft_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupResult {
    pub game_label: String,
    pub home: String,
    pub away: String,
    pub home_score: Option<f64>,
    pub away_score: Option<f64>,
    pub winner: Option<Winner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forfeit: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<Side>,
}

/// Running record for one team across submitted matchups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTally {
    pub wins: u32,
    pub losses: u32,
    pub pf: f64,
    pub pa: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoresResponse {
    pub results: Vec<MatchupResult>,
    pub standings: BTreeMap<String, ScoreTally>,
}

// ---------------------------------------------------------------------------
// Shared resolution
// ---------------------------------------------------------------------------

fn is_marker(code: Option<&str>, marker: &str) -> bool {
    code.is_some_and(|c| c.trim().eq_ignore_ascii_case(marker))
}

/// The side that forfeited, home checked first.
fn forfeit_side(home_code: Option<&str>, away_code: Option<&str>) -> Option<Side> {
    if is_marker(home_code, FORFEIT) {
        Some(Side::Home)
    } else if is_marker(away_code, FORFEIT) {
        Some(Side::Away)
    } else {
        None
    }
}

#[derive(Debug, Default)]
struct SideOutcome {
    total: Option<f64>,
    draft: Option<RealSportsDraft>,
}

#[derive(Debug, Default)]
struct DraftOutcome {
    home: SideOutcome,
    away: SideOutcome,
    dq: Option<Side>,
}

impl DraftOutcome {
    fn winner(&self) -> Option<Winner> {
        match (self.home.total, self.away.total) {
            (Some(h), Some(a)) => Some(Winner::decide(h, a)),
            _ => None,
        }
    }
}

async fn resolve_side(
    source: &dyn DraftSource,
    draft_id: Option<u64>,
    code: Option<&str>,
    team: &str,
) -> SideOutcome {
    if is_marker(code, DQ) {
        return SideOutcome {
            total: Some(0.0),
            draft: None,
        };
    }
    let (Some(draft_id), Some(code)) = (draft_id, code.filter(|c| !c.trim().is_empty())) else {
        return SideOutcome::default();
    };
    match source.fetch_draft(draft_id, code).await {
        Ok(draft) => SideOutcome {
            total: Some(draft.total_score),
            draft: Some(draft),
        },
        Err(e) => {
            warn!(draft_id, code, team, "failed to fetch draft: {}", e);
            SideOutcome::default()
        }
    }
}

/// Fetch both sides of a matchup concurrently, honouring DQ markers.
async fn resolve_drafts(
    source: &dyn DraftSource,
    draft_id: Option<u64>,
    home: (&str, Option<&str>),
    away: (&str, Option<&str>),
) -> DraftOutcome {
    let dq = if is_marker(away.1, DQ) {
        Some(Side::Away)
    } else if is_marker(home.1, DQ) {
        Some(Side::Home)
    } else {
        None
    };
    let (home_outcome, away_outcome) = join(
        resolve_side(source, draft_id, home.1, home.0),
        resolve_side(source, draft_id, away.1, away.0),
    )
    .await;
    DraftOutcome {
        home: home_outcome,
        away: away_outcome,
        dq,
    }
}

fn fill_lineup(draft: &RealSportsDraft, starters: &mut Vec<String>, scores: &mut Vec<f64>) {
    *starters = draft.lineup.iter().map(|p| p.display_name.clone()).collect();
    *scores = draft.lineup.iter().map(|p| p.score).collect();
}

// ---------------------------------------------------------------------------
// Season schedule scoring
// ---------------------------------------------------------------------------

/// Score one schedule matchup.
pub async fn score_matchup(matchup: &Matchup, source: &dyn DraftSource) -> ScoredMatchup {
    let mut scored = ScoredMatchup::unscored(matchup);
    let home_code = matchup.home_draft_code.as_deref();
    let away_code = matchup.away_draft_code.as_deref();

    if let Some(side) = forfeit_side(home_code, away_code) {
        let (home, away) = match side {
            Side::Home => (0.0, 1.0),
            Side::Away => (1.0, 0.0),
        };
        scored.matchup.home_score = Some(home);
        scored.matchup.away_score = Some(away);
        scored.forfeit = Some(side);
        scored.winner = Some(side.opponent().into());
        return scored;
    }

    if let (Some(home), Some(away)) = (matchup.home_score, matchup.away_score) {
        scored.home_total = Some(home);
        scored.away_total = Some(away);
        scored.winner = Some(Winner::decide(home, away));
        return scored;
    }

    let has_code = [home_code, away_code]
        .into_iter()
        .any(|c| c.is_some_and(|c| !c.trim().is_empty()));
    if matchup.draft_id.is_none() || !has_code {
        return scored;
    }

    let outcome = resolve_drafts(
        source,
        matchup.draft_id,
        (&matchup.home, home_code),
        (&matchup.away, away_code),
    )
    .await;

    scored.dq = outcome.dq;
    scored.winner = outcome.winner();
    if let Some(total) = outcome.home.total {
        scored.home_total = Some(total);
        scored.matchup.home_score = Some(total);
    }
    if let Some(total) = outcome.away.total {
        scored.away_total = Some(total);
        scored.matchup.away_score = Some(total);
    }
    if let Some(draft) = &outcome.home.draft {
        scored.home_draft_fetched = true;
        fill_lineup(
            draft,
            &mut scored.matchup.home_starters,
            &mut scored.matchup.home_starter_scores,
        );
    }
    if let Some(draft) = &outcome.away.draft {
        scored.away_draft_fetched = true;
        fill_lineup(
            draft,
            &mut scored.matchup.away_starters,
            &mut scored.matchup.away_starter_scores,
        );
    }
    scored
}

fn record(delta: &mut StandingsDelta, m: &ScoredMatchup) {
    let mut home = delta.get(&m.matchup.home).copied().unwrap_or_default();
    let mut away = delta.get(&m.matchup.away).copied().unwrap_or_default();

    if let Some(total) = m.home_total {
        home.points_for += total;
        away.points_against += total;
    }
    if let Some(total) = m.away_total {
        away.points_for += total;
        home.points_against += total;
    }
    match m.winner {
        Some(Winner::Home) => {
            home.wins += 1;
            away.losses += 1;
        }
        Some(Winner::Away) => {
            away.wins += 1;
            home.losses += 1;
        }
        Some(Winner::Tie) | None => {}
    }

    delta.insert(m.matchup.home.clone(), home);
    delta.insert(m.matchup.away.clone(), away);
}

/// Score every game day in order.
///
/// Returns the scored schedule and the standings delta from new results:
/// fetched drafts, forfeits and DQs outside the preseason. Scores already on
/// the sheet are assumed to be part of the baseline standings.
pub async fn calculate_scores(
    schedule: &[Game],
    source: &dyn DraftSource,
    batch_size: usize,
) -> ScoreReport {
    let batch_size = batch_size.max(1);
    let mut report = ScoreReport::default();

    for game in schedule {
        let mut matchups = Vec::with_capacity(game.matchups.len());
        for batch in game.matchups.chunks(batch_size) {
            matchups.extend(join_all(batch.iter().map(|m| score_matchup(m, source))).await);
        }

        if !game.is_preseason() {
            for m in &matchups {
                if !m.is_new_result() {
                    continue;
                }
                if m.home_total.is_none() && m.away_total.is_none() && m.forfeit.is_none() {
                    continue;
                }
                record(&mut report.new_results, m);
            }
        }

        let played = game.played || matchups.iter().any(ScoredMatchup::has_totals);
        report.schedule.push(ScoredGame {
            id: game.id,
            label: game.label.clone(),
            date: game.date.clone(),
            sport: game.sport.clone(),
            matchups,
            played,
        });
    }

    debug!(
        games = report.schedule.len(),
        teams_with_results = report.new_results.len(),
        "scored schedule"
    );
    report
}

// ---------------------------------------------------------------------------
// Ad-hoc matchup scoring
// ---------------------------------------------------------------------------

async fn score_request(req: &ScoreRequest, source: &dyn DraftSource) -> MatchupResult {
    let mut result = MatchupResult {
        game_label: req.game_label.clone(),
        home: req.home.clone(),
        away: req.away.clone(),
        home_score: None,
        away_score: None,
        winner: None,
        forfeit: None,
        dq: None,
    };
    let home_code = req.home_draft_code.as_deref();
    let away_code = req.away_draft_code.as_deref();

    if let Some(side) = forfeit_side(home_code, away_code) {
        let (home, away) = match side {
            Side::Home => (0.0, 1.0),
            Side::Away => (1.0, 0.0),
        };
        result.home_score = Some(home);
        result.away_score = Some(away);
        result.forfeit = Some(side);
        result.winner = Some(side.opponent().into());
        return result;
    }

    let outcome = resolve_drafts(
        source,
        req.draft_id,
        (&req.home, home_code),
        (&req.away, away_code),
    )
    .await;
    result.home_score = outcome.home.total;
    result.away_score = outcome.away.total;
    result.winner = outcome.winner();
    result.dq = outcome.dq;
    result
}

/// Score a list of submitted matchups in batches of `batch_size`, waiting for
/// each batch before starting the next, and tally a standings table.
///
/// Forfeits are tallied with their 1-0 placeholder scores.
pub async fn score_matchups(
    requests: &[ScoreRequest],
    source: &dyn DraftSource,
    batch_size: usize,
) -> ScoresResponse {
    let batch_size = batch_size.max(1);
    let mut response = ScoresResponse::default();

    for batch in requests.chunks(batch_size) {
        response
            .results
            .extend(join_all(batch.iter().map(|r| score_request(r, source))).await);
    }

    for r in &response.results {
        if r.home_score.is_none() && r.away_score.is_none() {
            continue;
        }
        let mut home = response.standings.get(&r.home).copied().unwrap_or_default();
        let mut away = response.standings.get(&r.away).copied().unwrap_or_default();

        if let Some(score) = r.home_score {
            home.pf += score;
            away.pa += score;
        }
        if let Some(score) = r.away_score {
            away.pf += score;
            home.pa += score;
        }
        match r.winner {
            Some(Winner::Home) => {
                home.wins += 1;
                away.losses += 1;
            }
            Some(Winner::Away) => {
                away.wins += 1;
                home.losses += 1;
            }
            Some(Winner::Tie) | None => {}
        }

        response.standings.insert(r.home.clone(), home);
        response.standings.insert(r.away.clone(), away);
    }

    response
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RealSportsPlayer;
    use crate::source::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn player(name: &str, score: f64) -> RealSportsPlayer {
        RealSportsPlayer {
            order: 1,
            player_id: 1,
            display_name: name.into(),
            first_name: String::new(),
            last_name: String::new(),
            multiplier: 1.0,
            multiplier_display: "1x".into(),
            score,
            avatar: String::new(),
            team_id: 0,
            jersey: 0,
            background_color: "#333333".into(),
        }
    }

    fn draft(draft_id: u64, players: &[(&str, f64)]) -> RealSportsDraft {
        let lineup: Vec<_> = players.iter().map(|(n, s)| player(n, *s)).collect();
        RealSportsDraft {
            contest_id: draft_id,
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

    /// In-memory draft source that also tracks call counts and peak concurrency.
    #[derive(Default)]
    struct FakeSource {
        drafts: HashMap<(u64, String), RealSportsDraft>,
        calls: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl FakeSource {
        fn with(mut self, id: u64, code: &str, players: &[(&str, f64)]) -> Self {
            self.drafts.insert((id, code.to_string()), draft(id, players));
            self
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DraftSource for FakeSource {
        async fn fetch_draft(&self, draft_id: u64, code: &str) -> Result<RealSportsDraft, FetchError> {
            self.calls.lock().unwrap().push(code.to_string());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.drafts
                .get(&(draft_id, code.to_string()))
                .cloned()
                .ok_or(FetchError::Status { status: 404 })
        }
    }

    fn matchup(away: &str, home: &str, id: Option<u64>, home_code: &str, away_code: &str) -> Matchup {
        let mut m = Matchup::new(away, home);
        m.draft_id = id;
        if !home_code.is_empty() {
            m.home_draft_code = Some(home_code.into());
        }
        if !away_code.is_empty() {
            m.away_draft_code = Some(away_code.into());
        }
        m
    }

    fn game(id: usize, label: &str, matchups: Vec<Matchup>) -> Game {
        Game {
            id,
            label: label.into(),
            date: "2/8".into(),
            sport: "NBA".into(),
            matchups,
            played: false,
        }
    }

    fn request(home: &str, away: &str, id: u64, home_code: &str, away_code: &str) -> ScoreRequest {
        ScoreRequest {
            game_label: "Game 7".into(),
            home: home.into(),
            away: away.into(),
            draft_id: Some(id),
            home_draft_code: (!home_code.is_empty()).then(|| home_code.to_string()),
            away_draft_code: (!away_code.is_empty()).then(|| away_code.to_string()),
        }
    }

    // -- Single matchup resolution --

    #[tokio::test]
    async fn home_forfeit_gives_away_the_win() {
        let source = FakeSource::default();
        let m = matchup("Suns", "Warriors", Some(1), "FORFEIT", "abc");
        let scored = score_matchup(&m, &source).await;
        assert_eq!(scored.forfeit, Some(Side::Home));
        assert_eq!(scored.winner, Some(Winner::Away));
        assert_eq!(scored.matchup.home_score, Some(0.0));
        assert_eq!(scored.matchup.away_score, Some(1.0));
        assert!(scored.home_total.is_none());
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn home_forfeit_checked_before_away() {
        let source = FakeSource::default();
        let m = matchup("Suns", "Warriors", None, "forfeit", "Forfeit");
        let scored = score_matchup(&m, &source).await;
        assert_eq!(scored.forfeit, Some(Side::Home));
    }

    #[tokio::test]
    async fn sheet_scores_are_used_without_fetching() {
        let source = FakeSource::default();
        let mut m = matchup("Suns", "Warriors", Some(1), "h", "a");
        m.home_score = Some(80.0);
        m.away_score = Some(95.5);
        let scored = score_matchup(&m, &source).await;
        assert_eq!(scored.home_total, Some(80.0));
        assert_eq!(scored.away_total, Some(95.5));
        assert_eq!(scored.winner, Some(Winner::Away));
        assert!(!scored.home_draft_fetched);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn fetched_drafts_fill_totals_and_starters() {
        let source = FakeSource::default()
            .with(7, "home1", &[("Jokic", 60.0), ("Curry", 40.0)])
            .with(7, "away1", &[("Tatum", 30.0), ("Brown", 20.5)]);
        let m = matchup("Pacers", "Pistons", Some(7), "home1", "away1");
        let scored = score_matchup(&m, &source).await;

        assert_eq!(scored.home_total, Some(100.0));
        assert_eq!(scored.away_total, Some(50.5));
        assert_eq!(scored.matchup.home_score, Some(100.0));
        assert_eq!(scored.winner, Some(Winner::Home));
        assert!(scored.home_draft_fetched && scored.away_draft_fetched);
        assert_eq!(scored.matchup.home_starters, vec!["Jokic", "Curry"]);
        assert_eq!(scored.matchup.away_starter_scores, vec![30.0, 20.5]);
    }

    #[tokio::test]
    async fn dq_side_scores_zero_without_fetch() {
        let source = FakeSource::default().with(7, "away1", &[("Tatum", 12.0)]);
        let m = matchup("Pacers", "Pistons", Some(7), "DQ", "away1");
        let scored = score_matchup(&m, &source).await;
        assert_eq!(scored.dq, Some(Side::Home));
        assert_eq!(scored.home_total, Some(0.0));
        assert_eq!(scored.away_total, Some(12.0));
        assert_eq!(scored.winner, Some(Winner::Away));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_side_unscored_and_no_winner() {
        let source = FakeSource::default().with(7, "home1", &[("Jokic", 60.0)]);
        let m = matchup("Pacers", "Pistons", Some(7), "home1", "missing");
        let scored = score_matchup(&m, &source).await;
        assert_eq!(scored.home_total, Some(60.0));
        assert!(scored.away_total.is_none());
        assert!(scored.winner.is_none());
        assert!(!scored.away_draft_fetched);
    }

    #[tokio::test]
    async fn no_draft_id_means_unchanged() {
        let source = FakeSource::default();
        let m = matchup("Pacers", "Pistons", None, "home1", "away1");
        let scored = score_matchup(&m, &source).await;
        assert_eq!(scored.matchup, m);
        assert!(scored.winner.is_none());
        assert_eq!(source.call_count(), 0);
    }

    // -- Season calculation --

    #[tokio::test]
    async fn calculate_scores_counts_only_new_non_preseason_results() {
        let source = FakeSource::default()
            .with(1, "p_home", &[("A", 50.0)])
            .with(1, "p_away", &[("B", 40.0)])
            .with(2, "h", &[("C", 70.0)])
            .with(2, "a", &[("D", 75.0)]);

        let mut sheet_scored = matchup("Thunder", "Suns", None, "", "");
        sheet_scored.home_score = Some(99.0);
        sheet_scored.away_score = Some(98.0);

        let schedule = vec![
            game(0, "Preseason Game 1", vec![matchup("Pistons", "Suns", Some(1), "p_home", "p_away")]),
            game(
                1,
                "Game 7",
                vec![
                    matchup("Pacers", "Pistons", Some(2), "h", "a"),
                    matchup("Raptors", "Warriors", Some(2), "forfeit", ""),
                    sheet_scored,
                    matchup("Timberwolves", "76ers", None, "", ""),
                ],
            ),
            game(2, "Game 8", vec![matchup("Raptors", "Warriors", None, "", "")]),
        ];

        let report = calculate_scores(&schedule, &source, 2).await;

        assert_eq!(report.schedule.len(), 3);
        assert!(report.schedule[0].played);
        assert!(report.schedule[1].played);
        assert!(!report.schedule[2].played);

        let d = &report.new_results;
        assert_eq!(d.len(), 4);
        assert!(!d.contains_key("Suns"));
        assert_eq!(d["Pacers"].wins, 1);
        assert_eq!(d["Pacers"].points_for, 75.0);
        assert_eq!(d["Pacers"].points_against, 70.0);
        assert_eq!(d["Pistons"].losses, 1);
        assert_eq!(d["Raptors"].wins, 1);
        assert_eq!(d["Raptors"].points_for, 0.0);
        assert_eq!(d["Warriors"].losses, 1);
    }

    #[tokio::test]
    async fn tie_counts_points_but_no_record() {
        let source = FakeSource::default()
            .with(3, "h", &[("A", 50.0)])
            .with(3, "a", &[("B", 50.0)]);
        let schedule = vec![game(0, "Game 1", vec![matchup("Pacers", "Pistons", Some(3), "h", "a")])];
        let report = calculate_scores(&schedule, &source, 4).await;
        let m = &report.schedule[0].matchups[0];
        assert_eq!(m.winner, Some(Winner::Tie));
        let pacers = report.new_results["Pacers"];
        assert_eq!((pacers.wins, pacers.losses), (0, 0));
        assert_eq!(pacers.points_for, 50.0);
    }

    #[tokio::test]
    async fn matchups_run_in_bounded_batches() {
        let mut source = FakeSource::default();
        let mut ms = Vec::new();
        for i in 0..6 {
            let (h, a) = (format!("h{i}"), format!("a{i}"));
            source = source.with(9, &h, &[("X", 1.0)]).with(9, &a, &[("Y", 2.0)]);
            ms.push(matchup("Pacers", "Pistons", Some(9), &h, &a));
        }
        let schedule = vec![game(0, "Game 1", ms)];
        let report = calculate_scores(&schedule, &source, 2).await;

        assert_eq!(report.schedule[0].matchups.len(), 6);
        assert_eq!(source.call_count(), 12);
        // Two matchups per batch, two fetches per matchup.
        assert!(source.peak.load(Ordering::SeqCst) <= 4);
    }

    // -- Ad-hoc scoring --

    #[tokio::test]
    async fn score_matchups_empty_input() {
        let source = FakeSource::default();
        let response = score_matchups(&[], &source, 4).await;
        assert!(response.results.is_empty());
        assert!(response.standings.is_empty());
    }

    #[tokio::test]
    async fn score_matchups_tallies_results() {
        let source = FakeSource::default()
            .with(5, "h1", &[("A", 10.0), ("B", 5.0)])
            .with(5, "a1", &[("C", 9.0)]);
        let requests = vec![
            request("Pistons", "Pacers", 5, "h1", "a1"),
            request("Suns", "Warriors", 5, "", "FORFEIT"),
            request("Thunder", "Raptors", 5, "dq", "dq"),
            request("76ers", "Timberwolves", 5, "nope", "nope2"),
        ];
        let response = score_matchups(&requests, &source, 3).await;

        assert_eq!(response.results.len(), 4);
        let r0 = &response.results[0];
        assert_eq!(r0.home_score, Some(15.0));
        assert_eq!(r0.away_score, Some(9.0));
        assert_eq!(r0.winner, Some(Winner::Home));

        let r1 = &response.results[1];
        assert_eq!(r1.forfeit, Some(Side::Away));
        assert_eq!((r1.home_score, r1.away_score), (Some(1.0), Some(0.0)));
        assert_eq!(r1.winner, Some(Winner::Home));

        let r2 = &response.results[2];
        assert_eq!(r2.winner, Some(Winner::Tie));
        assert_eq!(r2.dq, Some(Side::Away));

        let r3 = &response.results[3];
        assert!(r3.winner.is_none());
        assert!(r3.home_score.is_none());

        let s = &response.standings;
        assert_eq!(s["Pistons"], ScoreTally { wins: 1, losses: 0, pf: 15.0, pa: 9.0 });
        assert_eq!(s["Pacers"].losses, 1);
        assert_eq!(s["Suns"], ScoreTally { wins: 1, losses: 0, pf: 1.0, pa: 0.0 });
        assert_eq!(s["Warriors"], ScoreTally { wins: 0, losses: 1, pf: 0.0, pa: 1.0 });
        assert_eq!(s["Thunder"], ScoreTally::default());
        assert!(!s.contains_key("76ers"));
    }

    #[test]
    fn result_serializes_nulls_for_missing_scores() {
        let r = MatchupResult {
            game_label: "Game 7".into(),
            home: "Suns".into(),
            away: "Warriors".into(),
            home_score: None,
            away_score: Some(3.0),
            winner: None,
            forfeit: None,
            dq: None,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert!(json["homeScore"].is_null());
        assert_eq!(json["awayScore"], 3.0);
        assert!(json["winner"].is_null());
        assert!(json.get("forfeit").is_none());
        assert_eq!(json["gameLabel"], "Game 7");
    }

    #[test]
    fn request_deserializes_from_camel_case() {
        let req: ScoreRequest = serde_json::from_str(
            r#"{"gameLabel":"Game 9","home":"Suns","away":"Thunder","draftId":1429,"homeDraftCode":"abc"}"#,
        )
        .unwrap();
        assert_eq!(req.draft_id, Some(1429));
        assert_eq!(req.home_draft_code.as_deref(), Some("abc"));
        assert!(req.away_draft_code.is_none());
    }
}
