//! Named panel controls

use serde::{Deserialize, Serialize};

/// A button on the panel. Clicks and touches both arrive as one activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Control {
    StartRealTime,
    IncreaseTime,
    DecreaseTime,
    PauseGameTime,
    ResumeGameTime,
    IncreaseOwnScore,
    DecreaseOwnScore,
    IncreaseOpponentScore,
    DecreaseOpponentScore,
    RedCard,
    YellowCard,
    BlueCard,
}

impl Control {
    /// Name used in URLs and logs
    pub fn name(self) -> &'static str {
        match self {
            Self::StartRealTime => "start-real-time",
            Self::IncreaseTime => "increase-time",
            Self::DecreaseTime => "decrease-time",
            Self::PauseGameTime => "pause-game-time",
            Self::ResumeGameTime => "resume-game-time",
            Self::IncreaseOwnScore => "increase-own-score",
            Self::DecreaseOwnScore => "decrease-own-score",
            Self::IncreaseOpponentScore => "increase-opponent-score",
            Self::DecreaseOpponentScore => "decrease-opponent-score",
            Self::RedCard => "red-card",
            Self::YellowCard => "yellow-card",
            Self::BlueCard => "blue-card",
        }
    }
}
