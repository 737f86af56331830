// src/llm_client.rs
//! OpenAI-compatible chat completions client. One request per call, no retry.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use crate::core::prompt_builder::PromptPair;

const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";
const MODELS_ENDPOINT: &str = "/models";
const TEMPERATURE: f32 = 0.7;

pub const COVER_LETTER_MAX_TOKENS: u32 = 1000;
pub const QUESTION_MAX_TOKENS: u32 = 300;

// ===== Wire Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyStatus {
    pub valid: bool,
    pub message: String,
}

/// `error.message` from an API error body, if there is one
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
}

fn first_choice_content(body: &str) -> Result<String> {
    let response: ChatResponse =
        serde_json::from_str(body).context("Failed to parse chat completion response")?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .map(|message| message.content.trim().to_string())
        .ok_or_else(|| anyhow::anyhow!("Invalid response from OpenAI API"))
}

fn messages(prompt: &PromptPair) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: prompt.system.clone(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: prompt.user.clone(),
        },
    ]
}

pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send the prompt pair and return the trimmed content of the first choice
    pub async fn complete(&self, prompt: &PromptPair, max_tokens: u32) -> Result<String> {
        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_ENDPOINT);
        let request = ChatRequest {
            model: &self.model,
            messages: messages(prompt),
            temperature: TEMPERATURE,
            max_tokens,
        };

        info!("Sending chat completion request: model={}", self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            let message = api_error_message(&body)
                .unwrap_or_else(|| format!("OpenAI API error: {}", status.as_u16()));
            error!("OpenAI API error {}: {}", status, message);
            anyhow::bail!(message);
        }

        let content = first_choice_content(&body)?;
        info!("Successfully received completion ({} chars)", content.len());
        Ok(content)
    }

    /// Check the key against the models endpoint. Never fails; transport
    /// errors are reported as an invalid key with the error text.
    pub async fn test_api_key(&self) -> ApiKeyStatus {
        let url = format!("{}{}", self.base_url, MODELS_ENDPOINT);

        let response = match self.client.get(&url).bearer_auth(&self.api_key).send().await {
            Ok(response) => response,
            Err(e) => {
                return ApiKeyStatus {
                    valid: false,
                    message: e.to_string(),
                }
            }
        };

        if response.status().is_success() {
            return ApiKeyStatus {
                valid: true,
                message: "API key is valid".to_string(),
            };
        }

        let body = response.text().await.unwrap_or_default();
        ApiKeyStatus {
            valid: false,
            message: api_error_message(&body).unwrap_or_else(|| "Invalid API key".to_string()),
        }
    }
}
