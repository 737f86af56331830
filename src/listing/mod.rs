// src/listing/mod.rs
//! Search-results pages: job cards, posting times and freshness tiers

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod scanner;

pub use scanner::ListingScanner;

static JOB_ID_IN_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"~(\d+)").expect("valid job id regex"));

/// Job id embedded in an Upwork job URL (`.../jobs/~0123...`)
pub fn job_id_from_url(url: &str) -> Option<String> {
    JOB_ID_IN_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreshnessTier {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "4h")]
    FourHours,
}

impl FreshnessTier {
    pub fn minutes(self) -> i64 {
        match self {
            FreshnessTier::OneHour => 60,
            FreshnessTier::TwoHours => 120,
            FreshnessTier::FourHours => 240,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FreshnessTier::OneHour => "1 hour",
            FreshnessTier::TwoHours => "2 hours",
            FreshnessTier::FourHours => "4 hours",
        }
    }
}

/// Which tiers are reported. Disabled tiers are skipped, so a 30-minute-old
/// job lands in the 2h tier when the 1h tier is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessWindows {
    pub one_hour: bool,
    pub two_hours: bool,
    pub four_hours: bool,
}

impl Default for FreshnessWindows {
    fn default() -> Self {
        Self {
            one_hour: true,
            two_hours: true,
            four_hours: true,
        }
    }
}

impl FreshnessWindows {
    /// Enabled tiers, shortest first
    pub fn enabled(&self) -> Vec<FreshnessTier> {
        [
            (self.one_hour, FreshnessTier::OneHour),
            (self.two_hours, FreshnessTier::TwoHours),
            (self.four_hours, FreshnessTier::FourHours),
        ]
        .into_iter()
        .filter_map(|(on, tier)| on.then_some(tier))
        .collect()
    }

    pub fn classify(&self, posting_time: &str) -> Option<FreshnessTier> {
        self.enabled().into_iter().find(|tier| {
            crate::core::relative_time::is_posted_within_minutes(posting_time, tier.minutes())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobCard {
    pub job_id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub posting_time: Option<String>,
    pub minutes_ago: Option<i64>,
    pub tier: Option<FreshnessTier>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_from_url() {
        assert_eq!(
            job_id_from_url("https://www.upwork.com/jobs/Rust-scraper_~01999055296412911573/").as_deref(),
            Some("01999055296412911573")
        );
        assert_eq!(job_id_from_url("https://www.upwork.com/nx/search/jobs/"), None);
    }

    #[test]
    fn test_classify_picks_shortest_enabled_window() {
        let windows = FreshnessWindows::default();
        assert_eq!(windows.classify("5 minutes ago"), Some(FreshnessTier::OneHour));
        assert_eq!(windows.classify("60 minutes ago"), Some(FreshnessTier::OneHour));
        assert_eq!(windows.classify("2 hours ago"), Some(FreshnessTier::TwoHours));
        assert_eq!(windows.classify("3 hours ago"), Some(FreshnessTier::FourHours));
        assert_eq!(windows.classify("5 hours ago"), None);
        assert_eq!(windows.classify("yesterday"), None);
    }

    #[test]
    fn test_disabled_windows_are_skipped() {
        let windows = FreshnessWindows {
            one_hour: false,
            ..Default::default()
        };
        assert_eq!(windows.classify("5 minutes ago"), Some(FreshnessTier::TwoHours));

        let none = FreshnessWindows {
            one_hour: false,
            two_hours: false,
            four_hours: false,
        };
        assert!(none.enabled().is_empty());
        assert_eq!(none.classify("just now"), None);
    }

    #[test]
    fn test_tier_serializes_as_short_label() {
        assert_eq!(serde_json::to_string(&FreshnessTier::TwoHours).unwrap(), "\"2h\"");
        assert_eq!(FreshnessTier::FourHours.label(), "4 hours");
    }
}
