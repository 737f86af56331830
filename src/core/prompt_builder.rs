// src/core/prompt_builder.rs
//! System/user prompt pairs for cover letters and proposal questions

use serde::Serialize;

use crate::types::{EntryLayout, FreelancerProfile, JobRecord};

pub const COVER_LETTER_SYSTEM_PROMPT: &str = "You are a professional cover letter writer helping create personalized cover letters for Upwork job applications.
Generate a compelling, professional cover letter based on the template, job information, and freelancer profile provided.
Keep it concise, relevant, and tailored to the specific job.
The cover letter should be professional, demonstrate understanding of the job requirements, highlight relevant experience from the freelancer's profile, and show how their skills match the job needs.";

pub const QUESTION_SYSTEM_PROMPT: &str = "You are a professional freelance consultant helping answer Upwork proposal questions.
Generate clear, relevant, and professional answers based on the job requirements and the question asked.
Keep answers concise (2-4 sentences), specific, and demonstrate expertise without being overly lengthy.";

const PROFILE_HEADER: &str = "Freelancer Profile:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Profile lines, or nothing when every field is empty
fn profile_section(profile: Option<&FreelancerProfile>) -> Vec<String> {
    let Some(profile) = profile.filter(|p| !p.is_empty()) else {
        return Vec::new();
    };

    let mut lines = vec![PROFILE_HEADER.to_string()];
    for (label, layout, value) in profile.entries() {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match layout {
            EntryLayout::Inline => lines.push(format!("{}: {}", label, value)),
            EntryLayout::Block => {
                lines.push(format!("{}:", label));
                lines.push(value.to_string());
            }
        }
    }
    lines
}

/// Title and description block shared by both prompts
fn job_summary(job: &JobRecord) -> Vec<String> {
    vec![
        format!("Job Title: {}", job.job_title.as_deref().unwrap_or_default()),
        String::new(),
        "Job Description:".to_string(),
        job.description.as_deref().unwrap_or_default().to_string(),
    ]
}

fn optional_line(label: &str, value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| format!("{}: {}", label, v))
}

pub fn build_cover_letter_prompt(
    profile: Option<&FreelancerProfile>,
    job: &JobRecord,
    rendered_template: &str,
) -> PromptPair {
    let profile_lines = profile_section(profile);
    let has_profile = !profile_lines.is_empty();

    let mut lines = profile_lines;
    if has_profile {
        lines.push(String::new());
    }
    lines.extend(job_summary(job));

    let details: Vec<String> = [
        optional_line("Required Skills", &job.skills),
        optional_line("Budget", &job.budget),
        optional_line("Client", &job.client_name),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !details.is_empty() {
        lines.push(String::new());
        lines.extend(details);
    }

    lines.push(String::new());
    lines.push("Template to follow:".to_string());
    lines.push(rendered_template.to_string());
    lines.push(String::new());
    lines.push(format!(
        "Please generate a professional cover letter for this job application. Fill in the template with appropriate content based on the job details{}. Make sure to highlight relevant experience and skills from the profile that match the job requirements.",
        if has_profile { " and the freelancer's profile" } else { "" }
    ));

    PromptPair {
        system: COVER_LETTER_SYSTEM_PROMPT.to_string(),
        user: lines.join("\n"),
    }
}

pub fn build_question_prompt(job: &JobRecord, question: &str) -> PromptPair {
    let mut lines = job_summary(job);
    if let Some(skills) = optional_line("Required Skills", &job.skills) {
        lines.push(String::new());
        lines.push(skills);
    }
    lines.push(String::new());
    lines.push("Question to answer:".to_string());
    lines.push(format!("\"{}\"", question.trim()));
    lines.push(String::new());
    lines.push("Please provide a professional, relevant answer to this question that demonstrates expertise and understanding of the job requirements. Keep it concise and specific.".to_string());

    PromptPair {
        system: QUESTION_SYSTEM_PROMPT.to_string(),
        user: lines.join("\n"),
    }
}
