//! Tunable panel constants

use std::time::Duration;

use super::violation::CardCategory;

/// Step sizes and durations the panel works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSettings {
    /// Seconds added or removed by the increase/decrease time controls
    pub time_step_secs: u32,
    /// Points added or removed by the score controls
    pub score_step: u32,
    pub red_secs: u32,
    pub yellow_secs: u32,
    pub blue_secs: u32,
    /// How long a notification banner stays up
    pub notification_duration: Duration,
    /// Interval between ticks of every clock and countdown
    pub tick_period: Duration,
}

impl PanelSettings {
    pub fn card_duration(&self, category: CardCategory) -> u32 {
        match category {
            CardCategory::Red => self.red_secs,
            CardCategory::Yellow => self.yellow_secs,
            CardCategory::Blue => self.blue_secs,
        }
    }
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            time_step_secs: 30,
            score_step: 10,
            red_secs: CardCategory::Red.default_duration_secs(),
            yellow_secs: CardCategory::Yellow.default_duration_secs(),
            blue_secs: CardCategory::Blue.default_duration_secs(),
            notification_duration: Duration::from_secs(3),
            tick_period: Duration::from_secs(1),
        }
    }
}
