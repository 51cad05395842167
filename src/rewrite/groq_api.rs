use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::RewriteProvider;

const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Instruction template for the rewrite call. `{text}` is replaced with the
/// raw transcription; the model is asked for the cleaned text and nothing
/// else.
const REWRITE_PROMPT: &str = "\
Clean this speech transcription by removing disfluencies.

Remove: filler words (um, uh, like, you know), false starts, repetitions, incomplete sentences before corrections.
Preserve: core meaning, natural tone, intentional emphasis.

Input: {text}

Output only the cleaned text, nothing else:";

#[derive(Debug, Serialize)]
struct ChatPayload {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    r#type: Option<String>,
    code: Option<String>,
}

/// Rewrite provider backed by Groq's OpenAI-compatible chat completions API.
pub struct GroqRewriteProvider {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GroqRewriteProvider {
    pub fn new(api_key: String, endpoint: Option<String>, model: Option<String>) -> Result<Self> {
        let client = reqwest::Client::new();
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        info!("Initialized Groq rewrite provider with model {}", model);

        Ok(Self {
            client,
            api_key,
            endpoint,
            model,
        })
    }
}

/// Response budget proportional to input size; the instruction template asks
/// for the input back minus disfluencies.
fn token_budget(text: &str) -> u32 {
    (text.len() as u32).saturating_mul(2)
}

#[async_trait]
impl RewriteProvider for GroqRewriteProvider {
    fn name(&self) -> &'static str {
        "Groq API"
    }

    async fn rewrite(&self, text: &str) -> Result<String> {
        let body = ChatPayload {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: REWRITE_PROMPT.replace("{text}", text),
            }],
            max_tokens: token_budget(text),
            temperature: 0.1,
        };

        debug!("Sending rewrite request for {} chars", text.len());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Groq API")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            error!(
                "Groq API request failed with status {}: {}",
                status, response_text
            );

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
                return Err(anyhow::anyhow!(
                    "Groq API error: {} (type: {:?}, code: {:?})",
                    error_response.error.message,
                    error_response.error.r#type,
                    error_response.error.code
                ));
            }

            return Err(anyhow::anyhow!(
                "Groq API request failed with status {}: {}",
                status,
                response_text
            ));
        }

        let completion: ChatResponse = serde_json::from_str(&response_text)
            .context("Failed to parse rewrite response")?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .context("Rewrite response contained no choices")?;

        let rewritten = content.trim().to_string();
        debug!("Rewrite returned {} chars", rewritten.len());

        Ok(rewritten)
    }
}
