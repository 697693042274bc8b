//! Tick dispatch background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::state::{AppState, Tick};

/// Background task that applies ticks from every tick source, one at a time
pub async fn tick_dispatch_task(state: Arc<AppState>, mut ticks: mpsc::UnboundedReceiver<Tick>) {
    info!("Starting tick dispatch task");

    while let Some(tick) = ticks.recv().await {
        match state.apply_tick(tick) {
            Ok(true) => {}
            Ok(false) => debug!("Ignored stale tick {:?}", tick),
            Err(e) => error!("Failed to apply tick {:?}: {}", tick, e),
        }
    }

    info!("Tick channel closed, stopping tick dispatch task");
}
