//! Clock display formatting

/// Format seconds as zero-padded `MM:SS`, used for penalty countdowns.
///
/// Minutes are not capped, so values past 99 minutes simply widen.
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format seconds as zero-padded `HH:MM:SS`, used for match and real time.
pub fn format_hh_mm_ss(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
