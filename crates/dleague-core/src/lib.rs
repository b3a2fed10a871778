// League domain library: configuration, sheet parsing, standings, scoring and
// the calendar. Everything here is free of network I/O; draft lookups go
// through the `DraftSource` trait.

pub mod calendar;
pub mod config;
pub mod leaderboard;
pub mod model;
pub mod scoring;
pub mod sheets;
pub mod source;
pub mod standings;
