//! Serializable panel snapshot published to the front-end

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clock::ClockPhase;
use super::score::Scoreboard;
use super::view::TimerRow;

/// Everything the browser needs to draw the panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelSnapshot {
    /// Match time as `HH:MM:SS`
    pub match_time: String,
    pub match_elapsed_seconds: u64,
    pub match_phase: ClockPhase,
    /// Real elapsed time as `HH:MM:SS`, absent before the first start
    pub real_time: Option<String>,
    pub scores: Scoreboard,
    pub timers: Vec<TimerRow>,
    pub banner: Option<Banner>,
}

/// Notification banner currently on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    /// Increases with every banner shown, so a late dismissal can tell it was
    /// replaced
    pub seq: u64,
    pub message: String,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
