// src/core/question_extractor.rs
//! Unanswered proposal questions on an apply page

use scraper::{Html, Selector};
use serde::Serialize;
use tracing::info;

use crate::core::cascade::{compile_selector, element_text};
use crate::core::selectors::QuestionSelectors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalQuestion {
    /// Zero-based position among the form groups of the question section
    pub index: usize,
    pub question: String,
}

pub struct QuestionExtractor {
    section: Option<Selector>,
    group: Option<Selector>,
    label: Option<Selector>,
    answer_field: Option<Selector>,
}

impl Default for QuestionExtractor {
    fn default() -> Self {
        Self::new(&QuestionSelectors::default())
    }
}

impl QuestionExtractor {
    pub fn new(selectors: &QuestionSelectors) -> Self {
        Self {
            section: compile_selector("question section", &selectors.section),
            group: compile_selector("question group", &selectors.group),
            label: compile_selector("question label", &selectors.label),
            answer_field: compile_selector("question answer field", &selectors.answer_field),
        }
    }

    /// Questions whose answer field is still empty, in document order
    pub fn extract(&self, document: &Html) -> Vec<ProposalQuestion> {
        let (Some(section_sel), Some(group_sel), Some(label_sel), Some(field_sel)) =
            (&self.section, &self.group, &self.label, &self.answer_field)
        else {
            return Vec::new();
        };

        let Some(section) = document.select(section_sel).next() else {
            return Vec::new();
        };

        let questions: Vec<ProposalQuestion> = section
            .select(group_sel)
            .enumerate()
            .filter_map(|(index, group)| {
                let label = group.select(label_sel).next()?;
                let field = group.select(field_sel).next()?;
                if !element_text(field).trim().is_empty() {
                    return None;
                }
                let question = element_text(label).trim().to_string();
                (!question.is_empty()).then_some(ProposalQuestion { index, question })
            })
            .collect();

        if !questions.is_empty() {
            info!("Found {} additional question(s)", questions.len());
        }
        questions
    }
}
