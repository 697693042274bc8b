//! Main application state management

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::{
    Banner, ChannelNotifier, Control, MatchPanel, Notification, PanelSettings, PanelSnapshot,
    Tick, TimerId,
};
use crate::{
    error::{PanelError, Result},
    tasks::TaskScheduler,
};

/// The panel as it runs inside the server
pub type LivePanel = MatchPanel<TaskScheduler, ChannelNotifier>;

/// Receiving ends of the channels the panel sends on, consumed by the
/// background tasks
pub struct StateReceivers {
    pub ticks: mpsc::UnboundedReceiver<Tick>,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
}

/// Shared application state: the single panel instance plus server metadata
pub struct AppState {
    /// The match engine. All activations and ticks lock this.
    pub panel: Arc<Mutex<LivePanel>>,
    /// Banner currently on screen
    pub banner: Arc<Mutex<Option<Banner>>>,
    banner_seq: AtomicU64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel carrying every new panel snapshot to the event stream
    pub snapshot_tx: watch::Sender<PanelSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<PanelSnapshot>,
}

impl AppState {
    /// Create the state and the receivers its background tasks consume
    pub fn new(settings: PanelSettings, port: u16, host: String) -> (Self, StateReceivers) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (notification_tx, notification_rx) = mpsc::unbounded_channel();

        let scheduler = TaskScheduler::new(tick_tx, settings.tick_period);
        let panel = MatchPanel::new(settings, scheduler, ChannelNotifier::new(notification_tx));
        let (snapshot_tx, snapshot_rx) = watch::channel(panel.snapshot(Utc::now(), None));

        let state = Self {
            panel: Arc::new(Mutex::new(panel)),
            banner: Arc::new(Mutex::new(None)),
            banner_seq: AtomicU64::new(0),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        };
        let receivers = StateReceivers {
            ticks: tick_rx,
            notifications: notification_rx,
        };
        (state, receivers)
    }

    /// Apply a user action to the panel and publish the new snapshot
    pub fn update_panel<F, T>(&self, action: &str, updater: F) -> Result<(T, PanelSnapshot)>
    where
        F: FnOnce(&mut LivePanel) -> T,
    {
        let mut panel = self.panel.lock()
            .map_err(|e| PanelError::poisoned("panel", e))?;

        let outcome = updater(&mut *panel);
        let snapshot = panel.snapshot(Utc::now(), self.current_banner()?);
        drop(panel); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.publish(snapshot.clone());
        Ok((outcome, snapshot))
    }

    /// Apply a named control
    pub fn activate(&self, control: Control) -> Result<PanelSnapshot> {
        self.update_panel(control.name(), |panel| panel.activate(control, Utc::now()))
            .map(|((), snapshot)| snapshot)
    }

    /// Delete a timer; false if it no longer exists
    pub fn delete_timer(&self, id: TimerId) -> Result<(bool, PanelSnapshot)> {
        self.update_panel("delete-timer", |panel| panel.delete_timer(id))
    }

    /// Commit a player number; false if the timer no longer exists
    pub fn set_player_number(&self, id: TimerId, text: &str) -> Result<(bool, PanelSnapshot)> {
        self.update_panel("player-number", |panel| panel.set_player_number(id, text))
    }

    /// Record in-progress player number input; false if the timer is not shown
    pub fn edit_player_number(&self, id: TimerId, text: &str) -> Result<(bool, PanelSnapshot)> {
        self.update_panel("player-number-input", |panel| panel.edit_player_number(id, text))
    }

    /// Apply a tick, publishing a snapshot if it changed anything
    pub fn apply_tick(&self, tick: Tick) -> Result<bool> {
        let mut panel = self.panel.lock()
            .map_err(|e| PanelError::poisoned("panel", e))?;

        if !panel.apply_tick(tick) {
            return Ok(false);
        }
        let snapshot = panel.snapshot(Utc::now(), self.current_banner()?);
        drop(panel);

        self.publish(snapshot);
        Ok(true)
    }

    /// Put a banner on screen, replacing any current one. Returns its sequence
    /// number for the later dismissal.
    pub fn show_banner(&self, message: &str, duration: Duration) -> Result<u64> {
        let seq = self.banner_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let shown_at = Utc::now();
        let expires_at = shown_at
            + chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());

        {
            let mut banner = self.banner.lock()
                .map_err(|e| PanelError::poisoned("banner", e))?;
            *banner = Some(Banner {
                seq,
                message: message.to_string(),
                shown_at,
                expires_at,
            });
        }

        info!("Showing banner {}: {}", seq, message);
        self.refresh()?;
        Ok(seq)
    }

    /// Remove the banner if it is still the one with `seq`
    pub fn dismiss_banner(&self, seq: u64) -> Result<bool> {
        let dismissed = {
            let mut banner = self.banner.lock()
                .map_err(|e| PanelError::poisoned("banner", e))?;
            match banner.as_ref() {
                Some(current) if current.seq == seq => {
                    *banner = None;
                    true
                }
                _ => false,
            }
        };

        if dismissed {
            debug!("Dismissed banner {}", seq);
            self.refresh()?;
        }
        Ok(dismissed)
    }

    /// Get the current panel snapshot
    pub fn get_snapshot(&self) -> Result<PanelSnapshot> {
        let panel = self.panel.lock()
            .map_err(|e| PanelError::poisoned("panel", e))?;
        Ok(panel.snapshot(Utc::now(), self.current_banner()?))
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<PanelSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn current_banner(&self) -> Result<Option<Banner>> {
        self.banner.lock()
            .map(|banner| banner.clone())
            .map_err(|e| PanelError::poisoned("banner", e))
    }

    fn refresh(&self) -> Result<()> {
        let snapshot = self.get_snapshot()?;
        self.publish(snapshot);
        Ok(())
    }

    fn publish(&self, snapshot: PanelSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to publish panel snapshot: {}", e);
        }
    }
}
