//! Match Panel - A match control panel server
//!
//! This is the main entry point for the match-panel application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use match_panel::{
    config::Config,
    state::{AppState, StateReceivers},
    api::create_router,
    tasks::{banner_task, tick_dispatch_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("match_panel={},tower_http=info", config.log_level()))
        .init();

    info!("Starting match-panel server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, red={}s, yellow={}s, blue={}s",
          config.host, config.port, config.red_secs, config.yellow_secs, config.blue_secs);

    // Create application state
    let (state, receivers) = AppState::new(config.panel_settings(), config.port, config.host.clone());
    let state = Arc::new(state);
    let StateReceivers { ticks, notifications } = receivers;

    // Apply ticks from every clock and penalty countdown
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_dispatch_task(tick_state, ticks).await;
    });

    // Show finished-timer notifications
    let banner_state = Arc::clone(&state);
    tokio::spawn(async move {
        banner_task(banner_state, notifications).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /activate/:control          - Apply a panel control");
    info!("  DELETE /timers/:id                 - Delete a penalty timer");
    info!("  PUT    /timers/:id/player-number   - Set a timer's player number");
    info!("  POST   /timers/:id/input           - Record player number input");
    info!("  GET    /panel                      - Current panel snapshot");
    info!("  GET    /events                     - Live panel event stream");
    info!("  GET    /status                     - Panel and server status");
    info!("  GET    /health                     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
