// src/core/template_engine.rs
//! `{{variable}}` template processing for cover-letter bodies

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid placeholder regex"));

/// Variable mapping handed to the engine. `None` behaves like a missing key.
pub type TemplateData = HashMap<String, Option<String>>;

// ===== Template Models =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateValidation {
    pub valid: bool,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateVariable {
    pub name: &'static str,
    pub description: &'static str,
}

/// Stock cover-letter template used when settings carry none
pub const DEFAULT_TEMPLATE: &str = "Dear {{clientName}},

I am writing to express my strong interest in the {{jobTitle}} position. With my expertise in {{skills}}, I am confident I can deliver exceptional results for your project.

After reviewing your job description, I understand that you need someone who can handle {{description}}. I have extensive experience in this area and have successfully completed similar projects in the past.

I am available to work within your {{budget}} budget and can commit to the {{duration}} timeline. I pride myself on delivering high-quality work, excellent communication, and timely completion of projects.

I would love to discuss how I can help bring your project to success. Please feel free to review my profile and portfolio, and I look forward to hearing from you.

Best regards";

const AVAILABLE_VARIABLES: [TemplateVariable; 15] = [
    TemplateVariable { name: "jobTitle", description: "Job title" },
    TemplateVariable { name: "description", description: "Full job description" },
    TemplateVariable { name: "budget", description: "Budget or hourly rate" },
    TemplateVariable { name: "skills", description: "Required skills (comma-separated)" },
    TemplateVariable { name: "clientName", description: "Client name" },
    TemplateVariable { name: "clientLocation", description: "Client location" },
    TemplateVariable { name: "clientRating", description: "Client rating" },
    TemplateVariable { name: "experienceLevel", description: "Required experience level" },
    TemplateVariable { name: "duration", description: "Project duration" },
    TemplateVariable { name: "jobType", description: "Job type (fixed-price or hourly)" },
    TemplateVariable { name: "proposalsCount", description: "Number of proposals submitted" },
    TemplateVariable { name: "postingDate", description: "When the job was posted" },
    TemplateVariable { name: "clientHireRate", description: "Client hire rate percentage" },
    TemplateVariable { name: "clientJobsPosted", description: "Number of jobs posted by client" },
    TemplateVariable { name: "clientTotalSpent", description: "Total amount spent by client" },
];

// ===== Variable Processing =====

fn lookup<'a>(data: &'a TemplateData, name: &str) -> Option<&'a str> {
    data.get(name).and_then(|value| value.as_deref())
}

/// Substitute every `{{name}}` in a single pass.
///
/// Unknown or `None` variables become the empty string. Substituted values
/// are not scanned again, so a value containing `{{x}}` stays literal.
pub fn render(template: &str, data: &TemplateData) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            lookup(data, &caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}

/// Placeholder names in first-occurrence order, without duplicates
pub fn extract_variables(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Report the placeholders that would render empty
pub fn validate(template: &str, data: &TemplateData) -> TemplateValidation {
    let missing: Vec<String> = extract_variables(template)
        .into_iter()
        .filter(|name| lookup(data, name).is_none())
        .collect();

    TemplateValidation {
        valid: missing.is_empty(),
        missing,
    }
}

/// Variables a job record can provide, with descriptions
pub fn available_variables() -> &'static [TemplateVariable] {
    &AVAILABLE_VARIABLES
}
