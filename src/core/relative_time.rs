// src/core/relative_time.rs
//! Relative posting-time parsing ("30 minutes ago", "about 2 hours ago")

use once_cell::sync::Lazy;
use regex::Regex;

/// Default freshness threshold used by the one-hour check
pub const ONE_HOUR_MINUTES: i64 = 60;

// Qualified forms come first: the generic minute pattern would otherwise
// read "less than 3 minutes ago" as 3.
static LESS_THAN_MINUTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"less than (\d+)\s*(?:minute|min)s?\s*ago").expect("valid regex"));
static ABOUT_MINUTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"about (\d+)\s*(?:minute|min)s?\s*ago").expect("valid regex"));
static ABOUT_HOURS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"about (\d+)\s*(?:hour|hr)s?\s*ago").expect("valid regex"));
static MINUTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:minute|min)s?\s*ago").expect("valid regex"));
static HOURS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:hour|hr)s?\s*ago").expect("valid regex"));

fn capture_number(pattern: &Regex, text: &str) -> Option<Option<i64>> {
    pattern
        .captures(text)
        .map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<i64>().ok()))
}

/// Parse a relative time string into minutes ago.
///
/// Returns `None` when the text is not a recognised relative form
/// (empty input, absolute dates, "yesterday", ...).
pub fn parse_relative_minutes(text: &str) -> Option<i64> {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    if let Some(n) = capture_number(&LESS_THAN_MINUTES, &lower) {
        return n.map(|n| n - 1);
    }
    if let Some(n) = capture_number(&ABOUT_MINUTES, &lower) {
        return n;
    }
    if let Some(n) = capture_number(&ABOUT_HOURS, &lower) {
        return n.and_then(|n| n.checked_mul(60));
    }
    if let Some(n) = capture_number(&MINUTES, &lower) {
        return n;
    }
    if let Some(n) = capture_number(&HOURS, &lower) {
        return n.and_then(|n| n.checked_mul(60));
    }

    if lower.contains("just now") || lower.contains("moment") {
        return Some(0);
    }

    None
}

/// Whether the posting is at most `threshold_minutes` old (inclusive).
/// Unparseable input never satisfies a threshold.
pub fn is_posted_within_minutes(text: &str, threshold_minutes: i64) -> bool {
    match parse_relative_minutes(text) {
        Some(minutes_ago) => minutes_ago <= threshold_minutes,
        None => false,
    }
}

pub fn is_posted_within_one_hour(text: &str) -> bool {
    is_posted_within_minutes(text, ONE_HOUR_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_minutes_and_hours() {
        assert_eq!(parse_relative_minutes("5 minutes ago"), Some(5));
        assert_eq!(parse_relative_minutes("1 minute ago"), Some(1));
        assert_eq!(parse_relative_minutes("12 mins ago"), Some(12));
        assert_eq!(parse_relative_minutes("2 hours ago"), Some(120));
        assert_eq!(parse_relative_minutes("1 hr ago"), Some(60));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(parse_relative_minutes("  30 MINUTES AGO \n"), Some(30));
        assert_eq!(parse_relative_minutes("Posted 18 minutes ago"), Some(18));
    }

    #[test]
    fn test_parse_qualified_forms() {
        assert_eq!(parse_relative_minutes("less than 3 minutes ago"), Some(2));
        assert_eq!(parse_relative_minutes("Less than 1 minute ago"), Some(0));
        assert_eq!(parse_relative_minutes("about 2 hours ago"), Some(120));
        assert_eq!(parse_relative_minutes("about 45 minutes ago"), Some(45));
    }

    #[test]
    fn test_parse_just_now_and_moments() {
        assert_eq!(parse_relative_minutes("just now"), Some(0));
        assert_eq!(parse_relative_minutes("Moments ago"), Some(0));
        assert_eq!(parse_relative_minutes("a moment ago"), Some(0));
    }

    #[test]
    fn test_parse_unrecognised_input() {
        assert_eq!(parse_relative_minutes("yesterday"), None);
        assert_eq!(parse_relative_minutes(""), None);
        assert_eq!(parse_relative_minutes("   "), None);
        assert_eq!(parse_relative_minutes("March 3, 2024"), None);
        assert_eq!(parse_relative_minutes("2 days ago"), None);
        assert_eq!(
            parse_relative_minutes("99999999999999999999999 minutes ago"),
            None
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(is_posted_within_minutes("59 minutes ago", 60));
        assert!(is_posted_within_minutes("60 minutes ago", 60));
        assert!(!is_posted_within_minutes("61 minutes ago", 60));
        assert!(!is_posted_within_minutes("2 hours ago", 60));
        assert!(is_posted_within_minutes("2 hours ago", 120));
    }

    #[test]
    fn test_unparseable_never_within_threshold() {
        assert!(!is_posted_within_minutes("yesterday", i64::MAX));
        assert!(!is_posted_within_one_hour(""));
        assert!(is_posted_within_one_hour("just now"));
    }
}
