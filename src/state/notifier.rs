//! Notification surface used by the panel

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

/// A message to show in the banner for a limited time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub duration: Duration,
}

/// Shows a message, dismissing it automatically after `duration`
pub trait Notifier {
    fn notify(&self, message: String, duration: Duration);
}

/// Forwards notifications to the banner task
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: String, duration: Duration) {
        if let Err(e) = self.tx.send(Notification { message, duration }) {
            warn!("Failed to send notification, banner task gone: {}", e);
        }
    }
}
