// src/proposal_service.rs
//! Extraction → template → prompt → LLM pipeline for cover letters and
//! proposal question answers

use anyhow::{Context, Result};
use scraper::Html;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Settings;
use crate::core::prompt_builder::{build_cover_letter_prompt, build_question_prompt, PromptPair};
use crate::core::template_engine;
use crate::core::{JobExtractor, ProposalQuestion, QuestionExtractor};
use crate::listing::ListingScanner;
use crate::llm_client::{ApiKeyStatus, LlmClient, COVER_LETTER_MAX_TOKENS, QUESTION_MAX_TOKENS};
use crate::types::JobRecord;

const MISSING_API_KEY: &str =
    "OpenAI API key not configured. Set api_key in the settings file or OPENAI_API_KEY";
const EMPTY_TEMPLATE: &str = "Cover letter template is empty";
const INVALID_JOB: &str = "Could not extract job title or description from the page";

pub struct ProposalService {
    settings: Settings,
    extractor: JobExtractor,
    questions: QuestionExtractor,
    scanner: ListingScanner,
}

impl ProposalService {
    pub fn new(settings: Settings) -> Self {
        let extractor = JobExtractor::new(&settings.selectors.extractor);
        let questions = QuestionExtractor::new(&settings.selectors.questions);
        let scanner = ListingScanner::new(&settings.selectors.listing, settings.freshness_windows());
        Self {
            settings,
            extractor,
            questions,
            scanner,
        }
    }

    pub fn extractor(&self) -> &JobExtractor {
        &self.extractor
    }

    pub fn scanner(&self) -> &ListingScanner {
        &self.scanner
    }

    pub fn extract_job(&self, document: &Html) -> JobRecord {
        self.extractor.extract(document)
    }

    pub fn extract_questions(&self, document: &Html) -> Vec<ProposalQuestion> {
        self.questions.extract(document)
    }

    /// Fill the configured template with the job's fields
    pub fn render_template(&self, job: &JobRecord) -> String {
        let data = job.to_variables();
        let validation = template_engine::validate(&self.settings.template, &data);
        if !validation.valid {
            warn!(
                "Template variables without a value: {}",
                validation.missing.join(", ")
            );
        }
        template_engine::render(&self.settings.template, &data)
    }

    /// Cover letter prompt without calling the API
    pub fn prepare_cover_letter_prompt(&self, job: &JobRecord) -> Result<PromptPair> {
        if self.settings.template.trim().is_empty() {
            anyhow::bail!(EMPTY_TEMPLATE);
        }
        if !job.is_valid() {
            anyhow::bail!(INVALID_JOB);
        }

        let rendered = self.render_template(job);
        Ok(build_cover_letter_prompt(
            Some(&self.settings.profile),
            job,
            &rendered,
        ))
    }

    /// Question prompt without calling the API
    pub fn prepare_question_prompt(&self, question: &str, job: &JobRecord) -> Result<PromptPair> {
        if question.trim().is_empty() {
            anyhow::bail!("Question is empty");
        }
        Ok(build_question_prompt(job, question.trim()))
    }

    pub async fn generate_cover_letter(&self, job: &JobRecord) -> Result<String> {
        let client = self.client()?;
        let prompt = self.prepare_cover_letter_prompt(job)?;

        info!(
            "Generating cover letter for: {}",
            job.job_title.as_deref().unwrap_or("untitled job")
        );
        client
            .complete(&prompt, COVER_LETTER_MAX_TOKENS)
            .await
            .context("Failed to generate cover letter")
    }

    pub async fn generate_question_answer(&self, question: &str, job: &JobRecord) -> Result<String> {
        let client = self.client()?;
        let prompt = self.prepare_question_prompt(question, job)?;

        info!("Generating answer for question: {}", question.trim());
        client
            .complete(&prompt, QUESTION_MAX_TOKENS)
            .await
            .context("Failed to generate answer")
    }

    pub async fn test_api_key(&self) -> Result<ApiKeyStatus> {
        Ok(self.client()?.test_api_key().await)
    }

    fn client(&self) -> Result<LlmClient> {
        if !self.settings.has_api_key() {
            anyhow::bail!(MISSING_API_KEY);
        }
        LlmClient::new(
            self.settings.api_key.trim(),
            &self.settings.api_base_url,
            &self.settings.model,
            Duration::from_secs(self.settings.request_timeout_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> JobRecord {
        JobRecord {
            job_title: Some("Rust developer".to_string()),
            description: Some("Build a scraper".to_string()),
            skills: Some("Rust, Tokio".to_string()),
            client_name: Some("Acme".to_string()),
            ..Default::default()
        }
    }

    fn settings_with_key() -> Settings {
        Settings {
            api_key: "sk-test".to_string(),
            template: "Dear {{clientName}}, re {{jobTitle}} ({{budget}})".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_cover_letter_requires_api_key() {
        let service = ProposalService::new(Settings::default());
        let err = service.generate_cover_letter(&job()).await.unwrap_err();
        assert!(err.to_string().starts_with("OpenAI API key not configured"));
    }

    #[tokio::test]
    async fn test_cover_letter_rejects_empty_template() {
        let settings = Settings {
            template: "  ".to_string(),
            ..settings_with_key()
        };
        let err = ProposalService::new(settings)
            .generate_cover_letter(&job())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), EMPTY_TEMPLATE);
    }

    #[test]
    fn test_loaded_blank_template_uses_default_letter() {
        let settings = Settings::from_toml("api_key = \"sk\"\ntemplate = \"\"").unwrap();
        let prompt = ProposalService::new(settings)
            .prepare_cover_letter_prompt(&job())
            .unwrap();
        assert!(prompt.user.contains("Dear Acme,"));
        assert!(prompt
            .user
            .contains("strong interest in the Rust developer position"));
    }

    #[tokio::test]
    async fn test_cover_letter_rejects_invalid_job() {
        let service = ProposalService::new(settings_with_key());
        let err = service
            .generate_cover_letter(&JobRecord::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), INVALID_JOB);
    }

    #[tokio::test]
    async fn test_answer_requires_api_key() {
        let service = ProposalService::new(Settings::default());
        let err = service
            .generate_question_answer("Why you?", &job())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("OpenAI API key not configured"));
    }

    #[test]
    fn test_prepare_cover_letter_prompt_renders_template() {
        let service = ProposalService::new(settings_with_key());
        let prompt = service.prepare_cover_letter_prompt(&job()).unwrap();
        assert!(prompt.user.contains("Dear Acme, re Rust developer ()"));
        assert!(prompt.user.contains("Required Skills: Rust, Tokio"));
    }

    #[test]
    fn test_prepare_question_prompt() {
        let service = ProposalService::new(Settings::default());
        let prompt = service
            .prepare_question_prompt("  What is your rate? ", &job())
            .unwrap();
        assert!(prompt.user.contains("What is your rate?"));
        assert!(service.prepare_question_prompt(" ", &job()).is_err());
    }
}
