// JSON API over the league service.

mod error;
mod handlers;
mod request_tracing;

use std::sync::Arc;

use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;

use dleague_app::LeagueService;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LeagueService>,
}

impl AppState {
    pub fn new(service: LeagueService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/api/seasons", get(handlers::seasons))
        .route("/api/seasons/{id}", get(handlers::season))
        .route("/api/seasons/{id}/standings", get(handlers::standings))
        .route("/api/seasons/{id}/schedule", get(handlers::schedule))
        .route("/api/seasons/{id}/calendar", get(handlers::season_calendar))
        .route("/api/seasons/{id}/teams", get(handlers::teams))
        .route("/api/seasons/{id}/draft", get(handlers::draft_capital))
        .route("/api/seasons/{id}/scoring", get(handlers::scoring))
        .route("/api/seasons/{id}/refresh", post(handlers::refresh))
        .route("/api/draft", get(handlers::draft))
        .route("/api/scores", post(handlers::scores))
        .layer(from_fn(request_tracing::request_tracing_middleware))
        .with_state(state)
}
