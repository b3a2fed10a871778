// Season orchestration shared by the API server and the terminal dashboard:
// sheet downloads, caching, and the `LeagueService` facade.

pub mod cache;
pub mod season;
pub mod service;
pub mod sheets;

#[cfg(test)]
mod testing;

pub use service::{LeagueService, SeasonSnapshot, ServiceError};
