// Terminal dashboard for the league: season loader task, message protocol,
// and the ratatui front end.

pub mod app;
pub mod protocol;
pub mod tui;

#[cfg(test)]
mod test_support;
