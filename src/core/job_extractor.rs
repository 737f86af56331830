// src/core/job_extractor.rs
//! Job detail extraction through per-field selector cascades

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::core::cascade::{compile_selector, element_text, Cascade};
use crate::core::selectors::ExtractorSelectors;
use crate::types::JobRecord;

const EXPERIENCE_LEVELS: [&str; 3] = ["Expert", "Intermediate", "Entry Level"];
const MAX_SKILL_LEN: usize = 50;
const MAX_LOCATION_LEN: usize = 30;

static SUMMARY_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^summary\s*").expect("valid summary regex"));
static JOBS_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s+jobs?").expect("valid jobs regex"));
static HIRE_RATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+%)\s+hire\s+rate").expect("valid hire rate regex"));
static SPENT_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$[0-9KM.]+").expect("valid spent regex"));

pub struct JobExtractor {
    title: Cascade,
    description: Cascade,
    budget: Cascade,
    job_type: Cascade,
    experience_level: Cascade,
    duration: Cascade,
    skills: Cascade,
    posting_date: Cascade,
    posting_date_fallback: Option<Selector>,
    proposals: Cascade,
    client_location: Cascade,
    client_rating: Cascade,
    client_jobs_posted: Cascade,
    client_stats: Cascade,
    client_total_spent: Cascade,
    client_stat_items: Option<Selector>,
    payment_status: Cascade,
    client_name: Cascade,
}

impl Default for JobExtractor {
    fn default() -> Self {
        Self::new(&ExtractorSelectors::default())
    }
}

impl JobExtractor {
    /// Compile the cascades once. Invalid selectors are logged and dropped,
    /// which only narrows the cascade they belong to.
    pub fn new(selectors: &ExtractorSelectors) -> Self {
        Self {
            title: Cascade::compile("jobTitle", &selectors.title),
            description: Cascade::compile("description", &selectors.description),
            budget: Cascade::compile("budget", &selectors.budget),
            job_type: Cascade::compile("jobType", &selectors.job_type),
            experience_level: Cascade::compile("experienceLevel", &selectors.experience_level),
            duration: Cascade::compile("duration", &selectors.duration),
            skills: Cascade::compile("skills", &selectors.skills),
            posting_date: Cascade::compile("postingDate", &selectors.posting_date),
            posting_date_fallback: compile_selector(
                "postingDate fallback",
                &selectors.posting_date_fallback,
            ),
            proposals: Cascade::compile("proposalsCount", &selectors.proposals),
            client_location: Cascade::compile("clientLocation", &selectors.client_location),
            client_rating: Cascade::compile("clientRating", &selectors.client_rating),
            client_jobs_posted: Cascade::compile("clientJobsPosted", &selectors.client_jobs_posted),
            client_stats: Cascade::compile("clientHireRate", &selectors.client_stats),
            client_total_spent: Cascade::compile("clientTotalSpent", &selectors.client_total_spent),
            client_stat_items: compile_selector("client stat items", &selectors.client_stat_items),
            payment_status: Cascade::compile("paymentVerified", &selectors.payment_status),
            client_name: Cascade::compile("clientName", &selectors.client_name),
        }
    }

    /// Extract a job record from a job detail page.
    ///
    /// Never fails: a field whose cascade finds nothing is left absent.
    pub fn extract(&self, document: &Html) -> JobRecord {
        let root = document.root_element();

        let budget = self.budget.first_text(root, |t| t.contains('$') || t.contains("hr"));
        let job_type = self
            .job_type
            .first_text(root, |_| true)
            .or_else(|| infer_job_type(budget.as_deref()));

        let record = JobRecord {
            job_title: self.title.first_text(root, |_| true),
            description: self.extract_description(root),
            job_type,
            budget,
            experience_level: self
                .experience_level
                .first_text(root, |t| EXPERIENCE_LEVELS.contains(&t)),
            duration: self.duration.first_text(root, |t| {
                t.contains("month") || t.contains("week") || t.contains("hr")
            }),
            skills: self.extract_skills(root),
            posting_date: self.extract_posting_date(root),
            proposals_count: self.proposals.first_text(root, |t| {
                t.contains("Less than") || t.contains("to") || t.chars().any(|c| c.is_ascii_digit())
            }),
            client_location: self.client_location.first_text(root, |t| {
                !t.contains('$') && !t.contains("jobs") && t.chars().count() < MAX_LOCATION_LEN
            }),
            client_rating: self.client_rating.first_text(root, |_| true),
            client_jobs_posted: self.extract_client_jobs_posted(root),
            client_hire_rate: self
                .client_stats
                .find_map(root, |t| capture_first(&HIRE_RATE, t)),
            client_total_spent: self.extract_client_total_spent(root),
            client_name: self.client_name.first_text(root, |_| true),
            payment_verified: self.payment_status.find_map(root, payment_verification),
        };

        info!(
            found_title = record.has_title(),
            found_description = record.has_description(),
            found_budget = record.budget.is_some(),
            found_skills = record.skills.is_some(),
            found_experience = record.experience_level.is_some(),
            found_duration = record.duration.is_some(),
            found_client_location = record.client_location.is_some(),
            field_count = record.field_count(),
            "Job data extraction summary"
        );

        record
    }

    /// Extract and report whether the result carries a title or description
    pub fn extract_validated(&self, document: &Html) -> (JobRecord, bool) {
        let record = self.extract(document);
        let valid = record.is_valid();
        if !valid {
            warn!("Job data validation failed: no title and no description");
        } else if !record.has_title() || !record.has_description() {
            warn!(
                "Job data incomplete - missing {}, but proceeding anyway",
                if record.has_title() { "description" } else { "title" }
            );
        }
        (record, valid)
    }

    fn extract_description(&self, root: ElementRef<'_>) -> Option<String> {
        self.description
            .first_text(root, |_| true)
            .map(|text| SUMMARY_LABEL.replace(&text, "").trim().to_string())
            .filter(|text| !text.is_empty())
    }

    fn extract_skills(&self, root: ElementRef<'_>) -> Option<String> {
        let mut skills: Vec<String> = Vec::new();
        for skill in self.skills.all_texts(root) {
            let len = skill.chars().count();
            if len > 0 && len < MAX_SKILL_LEN && !skills.contains(&skill) {
                skills.push(skill);
            }
        }
        (!skills.is_empty()).then(|| skills.join(", "))
    }

    fn extract_posting_date(&self, root: ElementRef<'_>) -> Option<String> {
        if let Some(date) = self.posting_date.first_text(root, |t| t.contains("ago")) {
            return Some(date);
        }

        let fallback = self.posting_date_fallback.as_ref()?;
        root.select(fallback).find_map(|element| {
            let text = element_text(element);
            let text = text.trim();
            let rest = text.strip_prefix("Posted")?;
            if !text.contains("ago") {
                return None;
            }
            debug!("Found posting date (fallback): {}", rest.trim());
            Some(rest.trim().to_string())
        })
    }

    fn extract_client_jobs_posted(&self, root: ElementRef<'_>) -> Option<String> {
        if let Some(count) = self
            .client_jobs_posted
            .find_map(root, |t| capture_first(&JOBS_COUNT, t))
        {
            return Some(count);
        }

        self.scan_stat_items(root, |text| {
            if text.contains("jobs posted") || text.contains("job posted") {
                capture_first(&JOBS_COUNT, text)
            } else {
                None
            }
        })
    }

    fn extract_client_total_spent(&self, root: ElementRef<'_>) -> Option<String> {
        if let Some(spent) = self.client_total_spent.first_text(root, |t| t.contains('$')) {
            return Some(spent);
        }

        self.scan_stat_items(root, |text| {
            if text.contains("spent") && text.contains('$') {
                SPENT_AMOUNT.find(text).map(|m| m.as_str().to_string())
            } else {
                None
            }
        })
    }

    fn scan_stat_items<F>(&self, root: ElementRef<'_>, map: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let items = self.client_stat_items.as_ref()?;
        root.select(items)
            .find_map(|item| map(element_text(item).trim()))
    }
}

/// Infer the contract type from the budget text when the page does not say
fn infer_job_type(budget: Option<&str>) -> Option<String> {
    let budget = budget?;
    if budget.contains("/hr") {
        Some("Hourly".to_string())
    } else if budget.contains('$') && !budget.contains('/') {
        Some("Fixed-price".to_string())
    } else {
        None
    }
}

fn payment_verification(text: &str) -> Option<String> {
    if !text.contains("Payment") && !text.contains("verified") {
        return None;
    }
    let status = if text.contains("not") { "No" } else { "Yes" };
    Some(status.to_string())
}

fn capture_first(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
