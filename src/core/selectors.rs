// src/core/selectors.rs
//! Selector cascades for job pages, listing pages and proposal forms.
//!
//! Every cascade is ordered most-reliable first. The defaults describe the
//! Upwork markup; any cascade can be replaced from the settings file.

use serde::{Deserialize, Serialize};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ===== Job Detail Page =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSelectors {
    pub title: Vec<String>,
    pub description: Vec<String>,
    pub budget: Vec<String>,
    pub job_type: Vec<String>,
    pub experience_level: Vec<String>,
    pub duration: Vec<String>,
    pub skills: Vec<String>,
    pub posting_date: Vec<String>,
    /// Elements walked when no posting-date selector matched
    pub posting_date_fallback: String,
    pub proposals: Vec<String>,
    pub client_location: Vec<String>,
    pub client_rating: Vec<String>,
    pub client_jobs_posted: Vec<String>,
    /// Container whose text carries "NN% hire rate"
    pub client_stats: Vec<String>,
    pub client_total_spent: Vec<String>,
    /// Items scanned by the jobs-posted and total-spent fallbacks
    pub client_stat_items: String,
    pub payment_status: Vec<String>,
    pub client_name: Vec<String>,
}

impl Default for ExtractorSelectors {
    fn default() -> Self {
        Self {
            title: list(&[
                "span.text-base.flex-1",
                "h4 .text-base.flex-1",
                ".text-base.flex-1",
                "h3.mb-6x.h5",
                "h4.text-base",
                "h2.h4",
                "[data-test=\"job-title\"]",
                "h1[class*=\"job-title\"]",
                "h2[class*=\"job-title\"]",
                "h4 span.text-base",
            ]),
            description: list(&[
                "[data-test=\"Description\"] p.text-body-sm.multiline-text",
                "[data-test=\"Description\"] p.text-body-sm",
                "[data-test=\"Description\"] p",
                "[data-test=\"Description\"] .text-body-sm",
                "[data-test=\"Description\"]",
                ".break p.text-body-sm",
                ".description .text-body-sm",
                "[data-test=\"job-description\"]",
                ".job-description",
                ".description",
            ]),
            budget: list(&[
                "[data-cy=\"fixed-price\"] strong",
                "[data-cy=\"clock-timelog\"] strong",
                "[data-test=\"budget\"]",
                ".header strong",
                "[class*=\"budget\"]",
            ]),
            job_type: list(&["[data-test=\"job-type\"]", "strong[data-test=\"job-type\"]"]),
            experience_level: list(&[
                "[data-test=\"contractor-tier\"]",
                "[data-cy=\"expertise\"] ~ strong",
                "[class*=\"experience-level\"]",
            ]),
            duration: list(&[
                "[data-test=\"duration\"]",
                "[data-test=\"hourly-duration\"]",
                "[data-cy=\"duration2\"] ~ strong",
                "[class*=\"duration\"]",
            ]),
            skills: list(&[
                "[data-test=\"attr-item\"]",
                ".air3-badge-highlight",
                ".air3-token",
                ".skills-list .air3-badge",
                "[data-test=\"token\"]",
                ".up-skill-badge",
            ]),
            posting_date: list(&[
                "[data-test=\"posted-on\"]",
                "[itemprop=\"datePosted\"]",
                ".posted-on-line span",
                ".text-light-on-muted.text-body-sm span",
                ".posted-on",
            ]),
            posting_date_fallback: "div, span, small, p".to_string(),
            proposals: list(&[
                "[data-test=\"proposals\"]",
                "strong[data-test=\"proposals\"]",
                ".ca-item .value",
                "[class*=\"proposals\"]",
            ]),
            client_location: list(&[
                "[data-qa=\"client-location\"] strong",
                "[data-test=\"client-location\"]",
                ".features li:first-child strong",
                "[class*=\"client-location\"]",
            ]),
            client_rating: list(&[".air3-rating-value-text", "[data-test=\"client-rating\"]"]),
            client_jobs_posted: list(&[
                "[data-qa=\"client-job-posting-stats\"] strong",
                "[data-test=\"client-jobs-posted\"]",
            ]),
            client_stats: list(&["[data-qa=\"client-job-posting-stats\"]"]),
            client_total_spent: list(&[
                "[data-qa=\"client-spend\"] strong",
                "[data-test=\"client-spendings\"] strong",
                "[class*=\"total-spent\"]",
            ]),
            client_stat_items: "li".to_string(),
            payment_status: list(&["[data-test=\"payment-verification-status\"]", ".text-caption"]),
            client_name: list(&[
                "[data-test=\"client-name\"]",
                "[class*=\"client-name\"]",
                ".client h3",
            ]),
        }
    }
}

// ===== Job Listing Page =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    pub job_cards: Vec<String>,
    /// Attribute on the card element holding the job id
    pub job_id_attribute: String,
    pub job_link: String,
    pub posting_time: Vec<String>,
    pub posting_time_fallback: String,
    pub title_link: Vec<String>,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            job_cards: list(&[
                "section[data-ev-opening_uid]",
                "[data-test=\"job-tile-list\"] > section",
                "[data-test=\"job-tile-list\"] > .air3-card-section",
                "[data-test=\"job-tile\"]",
                "section.air3-card-section.air3-card-hover",
                "article[class*=\"job\"]",
                "section[class*=\"job-tile\"]",
            ]),
            job_id_attribute: "data-ev-opening_uid".to_string(),
            job_link: "a[href*=\"/jobs/\"]".to_string(),
            posting_time: list(&[
                "[data-test=\"posted-on\"]",
                "span[data-test=\"posted-on\"]",
                ".text-caption span",
            ]),
            posting_time_fallback: "span, small".to_string(),
            title_link: list(&[
                "h3.job-tile-title a",
                "a.air3-link[data-ev-label=\"link\"]",
                "h3 a.air3-link",
                "a[href*=\"/jobs/\"]",
            ]),
        }
    }
}

// ===== Proposal Form =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionSelectors {
    pub section: String,
    pub group: String,
    pub label: String,
    pub answer_field: String,
}

impl Default for QuestionSelectors {
    fn default() -> Self {
        Self {
            section: ".fe-proposal-job-questions".to_string(),
            group: ".form-group".to_string(),
            label: "label".to_string(),
            answer_field: "textarea.air3-textarea.inner-textarea".to_string(),
        }
    }
}

/// All selector tables, as found under `[selectors]` in the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub extractor: ExtractorSelectors,
    pub listing: ListingSelectors,
    pub questions: QuestionSelectors,
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn assert_parses(selectors: &[String]) {
        for s in selectors {
            assert!(Selector::parse(s).is_ok(), "selector failed to parse: {s}");
        }
    }

    #[test]
    fn test_default_selectors_all_parse() {
        let config = SelectorConfig::default();
        let ex = &config.extractor;
        for cascade in [
            &ex.title,
            &ex.description,
            &ex.budget,
            &ex.job_type,
            &ex.experience_level,
            &ex.duration,
            &ex.skills,
            &ex.posting_date,
            &ex.proposals,
            &ex.client_location,
            &ex.client_rating,
            &ex.client_jobs_posted,
            &ex.client_stats,
            &ex.client_total_spent,
            &ex.payment_status,
            &ex.client_name,
        ] {
            assert_parses(cascade);
        }
        assert_parses(&[ex.posting_date_fallback.clone(), ex.client_stat_items.clone()]);

        let listing = &config.listing;
        assert_parses(&listing.job_cards);
        assert_parses(&listing.posting_time);
        assert_parses(&listing.title_link);
        assert_parses(&[listing.job_link.clone(), listing.posting_time_fallback.clone()]);

        let q = &config.questions;
        assert_parses(&[q.section.clone(), q.group.clone(), q.label.clone(), q.answer_field.clone()]);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config: SelectorConfig =
            toml::from_str("[extractor]\ntitle = [\"h1.custom\"]\n").unwrap();
        assert_eq!(config.extractor.title, vec!["h1.custom"]);
        assert_eq!(config.extractor.budget, ExtractorSelectors::default().budget);
        assert_eq!(config.listing, ListingSelectors::default());
    }
}
