// src/core/mod.rs
//! Extraction, templating and prompt assembly. Everything here is synchronous
//! and free of shared state.

pub mod cascade;
pub mod job_extractor;
pub mod prompt_builder;
pub mod question_extractor;
pub mod relative_time;
pub mod selectors;
pub mod template_engine;

pub use job_extractor::JobExtractor;
pub use prompt_builder::{build_cover_letter_prompt, build_question_prompt, PromptPair};
pub use question_extractor::{ProposalQuestion, QuestionExtractor};
pub use relative_time::{is_posted_within_minutes, parse_relative_minutes};
pub use selectors::{ExtractorSelectors, ListingSelectors, QuestionSelectors, SelectorConfig};
pub use template_engine::{render, TemplateData, TemplateValidation};
