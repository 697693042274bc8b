//! Notification banner background task

use std::sync::Arc;
use tokio::{sync::mpsc, time::sleep};
use tracing::{error, info, warn};

use crate::state::{AppState, Notification};

/// Background task that shows each notification as the banner and takes it
/// down once its display time is over
pub async fn banner_task(state: Arc<AppState>, mut notifications: mpsc::UnboundedReceiver<Notification>) {
    info!("Starting banner task");

    while let Some(notification) = notifications.recv().await {
        let seq = match state.show_banner(&notification.message, notification.duration) {
            Ok(seq) => seq,
            Err(e) => {
                error!("Failed to show banner: {}", e);
                continue;
            }
        };

        let dismiss_state = Arc::clone(&state);
        tokio::spawn(async move {
            sleep(notification.duration).await;
            if let Err(e) = dismiss_state.dismiss_banner(seq) {
                warn!("Failed to dismiss banner {}: {}", seq, e);
            }
        });
    }

    info!("Notification channel closed, stopping banner task");
}
