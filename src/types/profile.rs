// src/types/profile.rs
use serde::{Deserialize, Serialize};

/// Freelancer profile supplied from settings. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FreelancerProfile {
    pub name: String,
    pub title: String,
    pub years: String,
    pub bio: String,
    pub work_experience: String,
    pub education: String,
    pub languages: String,
    pub frameworks: String,
    pub skills: String,
    pub portfolio: String,
    pub hourly_rate: String,
}

/// How a profile field is laid out in a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryLayout {
    /// `Label: value`
    Inline,
    /// `Label:` followed by the value on its own lines
    Block,
}

impl FreelancerProfile {
    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, _, value)| value.trim().is_empty())
    }

    /// Labelled entries in prompt order, including empty ones
    pub fn entries(&self) -> [(&'static str, EntryLayout, &str); 11] {
        [
            ("Name", EntryLayout::Inline, self.name.as_str()),
            ("Professional Title", EntryLayout::Inline, self.title.as_str()),
            ("Years of Experience", EntryLayout::Inline, self.years.as_str()),
            ("Bio", EntryLayout::Inline, self.bio.as_str()),
            (
                "Work Experience & Key Projects",
                EntryLayout::Block,
                self.work_experience.as_str(),
            ),
            (
                "Education & Certifications",
                EntryLayout::Block,
                self.education.as_str(),
            ),
            ("Programming Languages", EntryLayout::Inline, self.languages.as_str()),
            (
                "Frameworks & Technologies",
                EntryLayout::Inline,
                self.frameworks.as_str(),
            ),
            ("Core Skills", EntryLayout::Inline, self.skills.as_str()),
            ("Portfolio", EntryLayout::Inline, self.portfolio.as_str()),
            ("Hourly Rate", EntryLayout::Inline, self.hourly_rate.as_str()),
        ]
    }
}
