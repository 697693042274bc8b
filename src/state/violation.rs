//! Penalty card categories and violation timers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique timer identity, allocated from a monotonic counter and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Penalty card category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardCategory {
    Red,
    Yellow,
    Blue,
}

impl CardCategory {
    /// Default countdown length in seconds
    pub fn default_duration_secs(self) -> u32 {
        match self {
            Self::Red => 120,
            Self::Yellow => 60,
            Self::Blue => 60,
        }
    }

    /// Label shown in the timer list and in the finished notification
    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "Red card",
            Self::Yellow => "Yellow card",
            Self::Blue => "Blue card",
        }
    }
}

impl fmt::Display for CardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// A running or suspended penalty countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationTimer {
    pub id: TimerId,
    pub category: CardCategory,
    pub label: String,
    /// Total duration in seconds
    pub duration: u32,
    /// Always within `0..=duration`
    pub remaining: u32,
    /// Whether a countdown source is currently live for this timer
    pub active: bool,
    pub player_number: String,
}

impl ViolationTimer {
    pub fn new(id: TimerId, category: CardCategory, duration: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            category,
            label: label.into(),
            duration,
            remaining: duration,
            active: false,
            player_number: String::new(),
        }
    }

    /// Count down one second, returning true once the timer has run out.
    pub fn count_down(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Message shown when the countdown runs out
    pub fn finished_message(&self) -> String {
        format!("{} timer finished", self.label)
    }
}
