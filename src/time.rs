//! Display formatting for playback positions.

fn whole_seconds(seconds: f32) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}

/// Format seconds as `HH:MM:SS` for the large time display.
pub fn format_time(seconds: f32) -> String {
    let total = whole_seconds(seconds);
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{mins:02}:{secs:02}")
}

/// Format seconds as `M:SS` for marker labels. Minutes are not wrapped into hours.
pub fn format_short_time(seconds: f32) -> String {
    let total = whole_seconds(seconds);
    format!("{}:{:02}", total / 60, total % 60)
}
