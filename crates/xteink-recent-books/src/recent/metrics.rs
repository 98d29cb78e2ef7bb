//! Reading metrics shown next to each recent book.
//!
//! Durations are truncated to the minute. The remaining-time estimate
//! extrapolates the reading time spent so far over the whole book and is
//! rounded to the nearest second before the elapsed time is subtracted.

use alloc::format;
use alloc::string::String;

/// Shown instead of a percentage when progress is unknown
pub const UNKNOWN_PROGRESS_TEXT: &str = "--%";
/// Shown instead of a duration when no estimate is possible
pub const UNKNOWN_DURATION_TEXT: &str = "--";
pub const METRICS_SEPARATOR: &str = " · ";

pub fn clamp_percent(percent: i32) -> u8 {
    percent.clamp(0, 100) as u8
}

pub fn progress_text(percent: Option<u8>) -> String {
    match percent {
        Some(percent) => format!("{}%", percent.min(100)),
        None => String::from(UNKNOWN_PROGRESS_TEXT),
    }
}

/// `"<H>h <MM>m"`, e.g. `"12h 05m"`
pub fn format_duration(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    format!("{}h {:02}m", hours, minutes)
}

/// Estimated seconds left, `None` when it cannot be estimated yet.
pub fn remaining_seconds(percent: Option<u8>, elapsed_seconds: u32) -> Option<u32> {
    let percent = u64::from(percent?);
    if percent >= 100 {
        return Some(0);
    }
    if percent == 0 || elapsed_seconds == 0 {
        return None;
    }

    let elapsed = u64::from(elapsed_seconds);
    let estimated_total = (elapsed * 100 + percent / 2) / percent;
    let estimated_total = u32::try_from(estimated_total).unwrap_or(u32::MAX);
    Some(estimated_total.saturating_sub(elapsed_seconds))
}

/// `"<elapsed> · <remaining>"` with `--` standing in for an unknown estimate
pub fn metrics_text(elapsed_seconds: u32, remaining_seconds: Option<u32>) -> String {
    let remaining = match remaining_seconds {
        Some(seconds) => format_duration(seconds),
        None => String::from(UNKNOWN_DURATION_TEXT),
    };
    format!(
        "{}{}{}",
        format_duration(elapsed_seconds),
        METRICS_SEPARATOR,
        remaining
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_percent() {
        assert_eq!(clamp_percent(-5), 0);
        assert_eq!(clamp_percent(45), 45);
        assert_eq!(clamp_percent(250), 100);
        assert_eq!(clamp_percent(i32::MIN), 0);
    }

    #[test]
    fn progress_text_known_and_unknown() {
        assert_eq!(progress_text(Some(45)), "45%");
        assert_eq!(progress_text(Some(0)), "0%");
        assert_eq!(progress_text(None), "--%");
    }

    #[test]
    fn durations_truncate_to_minute() {
        assert_eq!(format_duration(0), "0h 00m");
        assert_eq!(format_duration(59), "0h 00m");
        assert_eq!(format_duration(1800), "0h 30m");
        assert_eq!(format_duration(3600), "1h 00m");
        assert_eq!(format_duration(3599), "0h 59m");
        assert_eq!(format_duration(45_300), "12h 35m");
        assert_eq!(format_duration(u32::MAX), "1193046h 28m");
    }

    #[test]
    fn half_way_doubles_elapsed() {
        assert_eq!(remaining_seconds(Some(50), 3600), Some(3600));
        assert_eq!(metrics_text(3600, Some(3600)), "1h 00m · 1h 00m");
    }

    #[test]
    fn no_estimate_without_progress_or_time() {
        assert_eq!(remaining_seconds(Some(0), 3600), None);
        assert_eq!(remaining_seconds(Some(40), 0), None);
        assert_eq!(remaining_seconds(None, 3600), None);
        assert_eq!(metrics_text(0, None), "0h 00m · --");
    }

    #[test]
    fn finished_books_have_nothing_left() {
        assert_eq!(remaining_seconds(Some(100), 0), Some(0));
        assert_eq!(remaining_seconds(Some(100), 7200), Some(0));
    }

    #[test]
    fn estimate_rounds_to_nearest_second() {
        // 100 / 3 * 100 = 3333.33 total
        assert_eq!(remaining_seconds(Some(3), 100), Some(3233));
        // 10 / 0.07 = 142.857 total
        assert_eq!(remaining_seconds(Some(7), 10), Some(133));
    }

    #[test]
    fn estimate_saturates_instead_of_overflowing() {
        assert_eq!(remaining_seconds(Some(1), u32::MAX), Some(0));
        assert_eq!(
            remaining_seconds(Some(1), u32::MAX / 10),
            Some(u32::MAX - u32::MAX / 10)
        );
        assert_eq!(remaining_seconds(Some(99), u32::MAX), Some(0));
        assert_eq!(remaining_seconds(Some(99), 4_000_000_000), Some(40_404_040));
    }
}
