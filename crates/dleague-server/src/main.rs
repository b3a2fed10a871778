// League API server entry point.
//
// Startup sequence:
// 1. Initialize tracing (stdout)
// 2. Load config (copying defaults on first run)
// 3. Build the league service
// 4. Bind and serve until Ctrl+C

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use dleague_app::LeagueService;
use dleague_core::config;
use dleague_server::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("League API server starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, {} teams, {} seasons",
        config.league.league.name,
        config.league.teams.len(),
        config.seasons.len()
    );
    let addr = format!("{}:{}", config.site.http.bind, config.site.http.port);

    // 3. Build the league service
    let state = AppState::new(LeagueService::from_config(config));

    // 4. Serve
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("League API server shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("dleague_server=info,dleague_app=info,dleague_realsports=info,warn")
        }))
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
