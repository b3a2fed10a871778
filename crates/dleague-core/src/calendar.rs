// Calendar view of a season schedule.
//
// Sheet dates are written "M/D" without a year, so the season's configured
// year is supplied by the caller.

use crate::model::{is_preseason_label, Game};
use crate::scoring::ScoredGame;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// The fields the calendar needs from either a raw or a scored game day.
pub trait GameDay {
    fn id(&self) -> usize;
    fn label(&self) -> &str;
    fn date(&self) -> &str;
    fn sport(&self) -> &str;
    fn played(&self) -> bool;
}

macro_rules! impl_game_day {
    ($ty:ty) => {
        impl GameDay for $ty {
            fn id(&self) -> usize {
                self.id
            }
            fn label(&self) -> &str {
                &self.label
            }
            fn date(&self) -> &str {
                &self.date
            }
            fn sport(&self) -> &str {
                &self.sport
            }
            fn played(&self) -> bool {
                self.played
            }
        }
    };
}

impl_game_day!(Game);
impl_game_day!(ScoredGame);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub id: usize,
    pub label: String,
    pub sport: String,
    pub played: bool,
}

impl CalendarEntry {
    fn from_game<G: GameDay>(g: &G) -> Self {
        CalendarEntry {
            id: g.id(),
            label: g.label().to_string(),
            sport: g.sport().to_string(),
            played: g.played(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub month_name: String,
    pub games: Vec<CalendarEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Calendar {
    pub days: Vec<CalendarDay>,
    /// Games whose date could not be read.
    pub undated: Vec<CalendarEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub total_games: usize,
    pub played_games: usize,
    pub status: String,
}

/// Parse a sheet date like "1/26" or "02/08" in the given year.
pub fn parse_game_date(raw: &str, year: i32) -> Option<NaiveDate> {
    let (month, day) = raw.trim().split_once('/')?;
    // Some sheets write "1/26/2026"; the configured year still wins.
    let day = day.split('/').next()?;
    NaiveDate::from_ymd_opt(year, month.trim().parse().ok()?, day.trim().parse().ok()?)
}

/// Group game days by calendar date, earliest first.
pub fn calendar<G: GameDay>(schedule: &[G], year: i32) -> Calendar {
    let mut by_date: BTreeMap<NaiveDate, Vec<CalendarEntry>> = BTreeMap::new();
    let mut undated = Vec::new();
    for game in schedule {
        match parse_game_date(game.date(), year) {
            Some(date) => by_date.entry(date).or_default().push(CalendarEntry::from_game(game)),
            None => undated.push(CalendarEntry::from_game(game)),
        }
    }
    Calendar {
        days: by_date
            .into_iter()
            .map(|(date, games)| CalendarDay {
                month_name: date.format("%B").to_string(),
                date,
                games,
            })
            .collect(),
        undated,
    }
}

/// The first day on or after `today` that still has an unplayed game.
pub fn next_game_day<G: GameDay>(schedule: &[G], year: i32, today: NaiveDate) -> Option<CalendarDay> {
    calendar(schedule, year)
        .days
        .into_iter()
        .find(|d| d.date >= today && d.games.iter().any(|g| !g.played))
}

/// Regular-season progress; preseason game days are not counted.
pub fn season_summary<G: GameDay>(schedule: &[G]) -> SeasonSummary {
    let regular: Vec<&G> = schedule
        .iter()
        .filter(|g| !is_preseason_label(g.label()))
        .collect();
    let played_games = regular.iter().filter(|g| g.played()).count();
    SeasonSummary {
        total_games: regular.len(),
        played_games,
        status: if played_games > 0 {
            "In Progress".into()
        } else {
            "Starting Soon".into()
        },
    }
}
