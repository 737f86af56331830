// src/types/job_record.rs
//! Structured job data produced by one extraction pass over a listing page

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// "Fixed-price", "Hourly" or whatever the page states
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    /// One of "Expert", "Intermediate", "Entry Level"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Comma-joined, deduplicated, first-seen order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    /// Raw relative string such as "18 minutes ago"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posting_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposals_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_jobs_posted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_hire_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_total_spent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    /// "Yes" or "No"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_verified: Option<String>,
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

impl JobRecord {
    /// A record is usable when it carries a title or a description.
    pub fn is_valid(&self) -> bool {
        self.has_title() || self.has_description()
    }

    pub fn has_title(&self) -> bool {
        non_empty(&self.job_title)
    }

    pub fn has_description(&self) -> bool {
        non_empty(&self.description)
    }

    /// Number of populated fields
    pub fn field_count(&self) -> usize {
        self.fields().iter().filter(|(_, v)| non_empty(v)).count()
    }

    /// Template variable mapping keyed by the camelCase field names.
    /// Absent fields map to `None` so template validation reports them.
    pub fn to_variables(&self) -> HashMap<String, Option<String>> {
        self.fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    fn fields(&self) -> [(&'static str, &Option<String>); 16] {
        [
            ("jobTitle", &self.job_title),
            ("description", &self.description),
            ("budget", &self.budget),
            ("jobType", &self.job_type),
            ("experienceLevel", &self.experience_level),
            ("duration", &self.duration),
            ("skills", &self.skills),
            ("postingDate", &self.posting_date),
            ("proposalsCount", &self.proposals_count),
            ("clientLocation", &self.client_location),
            ("clientRating", &self.client_rating),
            ("clientJobsPosted", &self.client_jobs_posted),
            ("clientHireRate", &self.client_hire_rate),
            ("clientTotalSpent", &self.client_total_spent),
            ("clientName", &self.client_name),
            ("paymentVerified", &self.payment_verified),
        ]
    }
}

/// Free-function form of [`JobRecord::is_valid`].
pub fn validate(record: &JobRecord) -> bool {
    record.is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_requires_title_or_description() {
        assert!(!JobRecord::default().is_valid());

        let titled = JobRecord {
            job_title: Some("Rust developer".to_string()),
            ..Default::default()
        };
        assert!(titled.is_valid());

        let described = JobRecord {
            description: Some("Build a parser".to_string()),
            ..Default::default()
        };
        assert!(validate(&described));

        let blank = JobRecord {
            job_title: Some(String::new()),
            description: Some(String::new()),
            budget: Some("$300".to_string()),
            ..Default::default()
        };
        assert!(!blank.is_valid());
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent_fields() {
        let record = JobRecord {
            job_title: Some("Scraper".to_string()),
            client_hire_rate: Some("68%".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["jobTitle"], "Scraper");
        assert_eq!(json["clientHireRate"], "68%");
        assert!(json.get("description").is_none());
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_to_variables_keeps_absent_keys_as_none() {
        let record = JobRecord {
            budget: Some("$50".to_string()),
            ..Default::default()
        };
        let vars = record.to_variables();
        assert_eq!(vars.len(), 16);
        assert_eq!(vars["budget"].as_deref(), Some("$50"));
        assert_eq!(vars["clientName"], None);
        assert_eq!(record.field_count(), 1);
    }
}
