//! State management module
//!
//! The match engine (clocks, penalty registry, scores, timer list view) and
//! the shared application state that serializes access to it.

pub mod app_state;
pub mod clock;
pub mod control;
pub mod notifier;
pub mod panel;
pub mod registry;
pub mod scheduler;
pub mod score;
pub mod settings;
pub mod snapshot;
pub mod view;
pub mod violation;

// Re-export main types
pub use app_state::{AppState, LivePanel, StateReceivers};
pub use clock::{ClockEngine, ClockPhase, MatchClock, WallClock};
pub use control::Control;
pub use notifier::{ChannelNotifier, Notification, Notifier};
pub use panel::MatchPanel;
pub use registry::{CountdownTick, ViolationRegistry};
pub use scheduler::{Tick, TickHandle, TickScheduler, TickTarget};
pub use score::{Score, Scoreboard, Team};
pub use settings::PanelSettings;
pub use snapshot::{Banner, PanelSnapshot};
pub use view::{TimerRow, ViewSynchronizer};
pub use violation::{CardCategory, TimerId, ViolationTimer};
