// Season loader task for the dashboard.
//
// Owns the league service, loads the selected season's snapshot, and pushes
// UI updates to the TUI render loop. Reloads the current season on a timer
// and on demand.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use dleague_app::{LeagueService, ServiceError};

use crate::protocol::{LoadStatus, UiUpdate, UserCommand};

pub struct AppState {
    service: Arc<LeagueService>,
    /// Season currently shown; `None` until a season has been selected.
    pub current_season: Option<u32>,
}

impl AppState {
    pub fn new(service: Arc<LeagueService>) -> Self {
        Self {
            current_season: service.default_season().map(|s| s.id),
            service,
        }
    }

    /// Load `season` and report progress. Returns false once the TUI has
    /// gone away.
    async fn load(&mut self, season: u32, force: bool, ui_tx: &mpsc::Sender<UiUpdate>) -> bool {
        if ui_tx
            .send(UiUpdate::Status {
                season,
                status: LoadStatus::Loading,
            })
            .await
            .is_err()
        {
            return false;
        }

        let result = if force {
            self.service.refresh(season).await
        } else {
            self.service.snapshot(season).await
        };

        let update = match result {
            Ok(snapshot) => {
                self.current_season = Some(season);
                info!(season, games = snapshot.schedule.len(), "season loaded");
                UiUpdate::Snapshot(snapshot)
            }
            Err(e) => {
                warn!(season, error = %e, "season load failed");
                UiUpdate::Status {
                    season,
                    status: LoadStatus::Failed(describe(&e)),
                }
            }
        };
        ui_tx.send(update).await.is_ok()
    }
}

fn describe(e: &ServiceError) -> String {
    match e {
        ServiceError::SeasonLocked(_) => format!("{e}. Coming soon."),
        ServiceError::UnknownSeason(_) => e.to_string(),
    }
}

/// Run the loader loop until `Quit`, or until either channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
    refresh_every: Duration,
) -> anyhow::Result<()> {
    info!("Season loader started");

    let seasons = UiUpdate::Seasons {
        league: state.service.league_name().to_string(),
        seasons: state.service.seasons().to_vec(),
    };
    if ui_tx.send(seasons).await.is_err() {
        return Ok(());
    }
    if let Some(season) = state.current_season {
        if !state.load(season, false, &ui_tx).await {
            return Ok(());
        }
    }

    let mut refresh = tokio::time::interval(refresh_every.max(Duration::from_secs(1)));
    // The first tick completes immediately; the initial load already ran.
    refresh.tick().await;

    loop {
        let open = tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(UserCommand::Quit) => {
                    info!("Quit command received, shutting down");
                    break;
                }
                Some(UserCommand::SelectSeason(id)) => {
                    info!(season = id, "season selected");
                    state.load(id, false, &ui_tx).await
                }
                Some(UserCommand::Refresh) => match state.current_season {
                    Some(id) => state.load(id, true, &ui_tx).await,
                    None => true,
                },
                None => {
                    info!("Command channel closed, shutting down");
                    break;
                }
            },

            _ = refresh.tick() => match state.current_season {
                Some(id) => state.load(id, true, &ui_tx).await,
                None => true,
            },
        };
        if !open {
            info!("UI channel closed, shutting down");
            break;
        }
    }

    info!("Season loader exiting");
    Ok(())
}
