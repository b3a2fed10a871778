// Mapping of the Real Sports draft view JSON onto the league's draft types.
//
// The endpoint is undocumented, so every field is optional and falls back to
// a neutral default rather than failing the whole lookup.

use dleague_core::model::{RealSportsDraft, RealSportsPlayer};
use serde_json::Value;

fn as_f64(v: Option<&Value>) -> Option<f64> {
    match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_u64(v: Option<&Value>) -> Option<u64> {
    as_f64(v).filter(|n| *n >= 0.0).map(|n| n as u64)
}

fn as_string(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Map one lineup entry.
pub(crate) fn parse_player(p: &Value) -> RealSportsPlayer {
    let first_name = as_string(p.get("firstName")).unwrap_or_default();
    let last_name = as_string(p.get("lastName")).unwrap_or_default();
    let display_name = as_string(p.get("displayName"))
        .unwrap_or_else(|| format!("{first_name} {last_name}").trim().to_string());

    RealSportsPlayer {
        order: as_u64(p.get("order")).unwrap_or(0) as u32,
        player_id: as_u64(p.get("playerId"))
            .or_else(|| as_u64(p.get("id")))
            .unwrap_or(0),
        display_name,
        first_name,
        last_name,
        multiplier: as_f64(p.get("multiplier")).unwrap_or(1.0),
        multiplier_display: as_string(p.get("multiplierDisplay")).unwrap_or_else(|| "1x".into()),
        score: as_f64(p.get("score")).unwrap_or(0.0),
        avatar: as_string(p.get("avatar")).unwrap_or_default(),
        team_id: as_u64(p.get("teamId")).unwrap_or(0),
        jersey: as_u64(p.get("jersey")).unwrap_or(0) as u32,
        background_color: as_string(p.get("backgroundColor"))
            .unwrap_or_else(|| "#333333".into()),
    }
}

/// Map a full draft view response. `requested_id` stands in when the body
/// does not echo the contest id.
pub(crate) fn parse_draft(body: &Value, requested_id: u64) -> RealSportsDraft {
    let lineup: Vec<RealSportsPlayer> = body
        .get("lineup")
        .and_then(Value::as_array)
        .map(|players| players.iter().map(parse_player).collect())
        .unwrap_or_default();

    let info = body.get("info");
    let contest = info.and_then(|i| i.get("contest"));
    let field = |name: &str| contest.and_then(|c| c.get(name));

    RealSportsDraft {
        contest_id: as_u64(field("id")).unwrap_or(requested_id),
        contest_day: as_string(field("day")).unwrap_or_default(),
        sport: as_string(field("sport")).unwrap_or_else(|| "nba".into()),
        is_finalized: field("isFinalized").and_then(Value::as_bool).unwrap_or(false),
        lineup_size: as_u64(
            field("additionalInfo").and_then(|a| a.get("lineupSize")),
        )
        .unwrap_or(5) as u32,
        user_name: as_string(
            info.and_then(|i| i.get("user")).and_then(|u| u.get("userName")),
        )
        .unwrap_or_default(),
        user_id: as_string(info.and_then(|i| i.get("userId"))).unwrap_or_default(),
        total_score: RealSportsDraft::lineup_total(&lineup),
        lineup,
    }
}
