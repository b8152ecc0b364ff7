//! Timestamp formatting helpers.

/// Format seconds as `H:MM:SS`, or `M:SS` when under an hour.
///
/// Fractional seconds are truncated; negative input is clamped to zero.
///
/// # Examples
/// ```
/// use clipmine_models::timestamp::format_timestamp;
/// assert_eq!(format_timestamp(45.0), "0:45");
/// assert_eq!(format_timestamp(3665.0), "1:01:05");
/// ```
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_under_an_hour() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(45.0), "0:45");
        assert_eq!(format_timestamp(125.0), "2:05");
    }

    #[test]
    fn test_format_with_hours() {
        assert_eq!(format_timestamp(3665.0), "1:01:05");
        assert_eq!(format_timestamp(7325.0), "2:02:05");
    }

    #[test]
    fn test_format_truncates_and_clamps() {
        assert_eq!(format_timestamp(59.9), "0:59");
        assert_eq!(format_timestamp(-3.0), "0:00");
    }
}
