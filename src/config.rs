//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::state::PanelSettings;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "match-panel")]
#[command(about = "A match control panel server tracking game clock, scores and penalty card timers")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Seconds added or removed by the increase/decrease time controls
    #[arg(long, default_value = "30")]
    pub time_step: u32,

    /// Points added or removed by the score controls
    #[arg(long, default_value = "10")]
    pub score_step: u32,

    /// Red card penalty length in seconds
    #[arg(long, default_value = "120")]
    pub red_secs: u32,

    /// Yellow card penalty length in seconds
    #[arg(long, default_value = "60")]
    pub yellow_secs: u32,

    /// Blue card penalty length in seconds
    #[arg(long, default_value = "60")]
    pub blue_secs: u32,

    /// How long a notification banner stays up, in seconds
    #[arg(long, default_value = "3")]
    pub notification_secs: u64,

    /// Length of one clock tick in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_millis: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Engine settings derived from the command line
    pub fn panel_settings(&self) -> PanelSettings {
        PanelSettings {
            time_step_secs: self.time_step,
            score_step: self.score_step,
            red_secs: self.red_secs,
            yellow_secs: self.yellow_secs,
            blue_secs: self.blue_secs,
            notification_duration: Duration::from_secs(self.notification_secs),
            tick_period: Duration::from_millis(self.tick_millis),
        }
    }
}
