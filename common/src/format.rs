// Human-readable duration formatting for the executions table

use chrono::{DateTime, Utc};

/// Format the elapsed time between two optional timestamps as the largest
/// non-zero unit chain: "1h 2m 3s", "2m 3s", or "3s".
///
/// Returns an empty string when either side is absent (an execution that has
/// not started or not finished has no duration). The difference is taken as
/// an absolute value so clock skew between the two timestamps can never
/// produce negative output.
pub fn format_duration(
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
) -> String {
    let (start, end) = match (started_at, finished_at) {
        (Some(start), Some(end)) => (start, end),
        _ => return String::new(),
    };

    let total_seconds = (end - start).num_seconds().abs();
    let seconds = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = total_seconds / 3600;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
