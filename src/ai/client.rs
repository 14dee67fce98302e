//! LLM (`OpenAI`) API client module
//!
//! Encapsulates the two hosted capabilities the bot needs: single-turn chat
//! completion (summaries and translations) and image generation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use super::prompt::{build_prompt, chat_messages_json};
use crate::core::models::GeneratedImage;
use crate::errors::SlackError;
use crate::features::Assistant;

const IMAGE_SIZE: &str = "1024x1024";

/// LLM API client for completions and image generation
pub struct LlmClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    image_model_name: String,
    base_url: String,
}

impl LlmClient {
    #[must_use]
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        image_model_name: String,
        base_url: String,
    ) -> Self {
        Self {
            http: Client::new(),
            api_key,
            org_id,
            model_name,
            image_model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn chat_completion_body(&self, instruction: &str, body: &str) -> Value {
        json!({
            "model": self.model_name,
            "messages": chat_messages_json(&build_prompt(instruction, body)),
        })
    }

    #[must_use]
    pub fn image_generation_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.image_model_name,
            "prompt": prompt,
            "n": 1,
            "size": IMAGE_SIZE,
            "response_format": "b64_json",
        })
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, SlackError> {
        let mut request = self
            .http
            .post(format!("{}/{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body);

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SlackError::HttpError(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SlackError::OpenAIError(format!(
                "OpenAI API error (status {status}): {error_text}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SlackError::OpenAIError(format!("Failed to parse OpenAI response: {e}")))
    }
}

/// Reads `choices[0].message.content` from a chat completion response.
///
/// # Errors
///
/// Returns an error when the response carries no text content.
pub fn parse_completion_text(response: &Value) -> Result<String, SlackError> {
    response
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| SlackError::OpenAIError("Completion returned no content".to_string()))
}

/// Reads `data[0]` from an image generation response.
///
/// The revised prompt falls back to `prompt` when the model does not
/// rewrite prompts.
///
/// # Errors
///
/// Returns an error when the response carries no base64 image.
pub fn parse_generated_image(response: &Value, prompt: &str) -> Result<GeneratedImage, SlackError> {
    let first = response.get("data").and_then(|d| d.get(0));

    let b64_json = first
        .and_then(|d| d.get("b64_json"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            SlackError::OpenAIError("Image generation returned no b64_json payload".to_string())
        })?
        .to_string();

    let revised_prompt = first
        .and_then(|d| d.get("revised_prompt"))
        .and_then(Value::as_str)
        .unwrap_or(prompt)
        .to_string();

    Ok(GeneratedImage {
        b64_json,
        revised_prompt,
    })
}

#[async_trait]
impl Assistant for LlmClient {
    async fn complete(&self, instruction: &str, body: &str) -> Result<String, SlackError> {
        #[cfg(feature = "debug-logs")]
        info!("Using ChatGPT prompt:\n{}\n{}", instruction, body);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            input_chars = body.chars().count(),
            "Requesting chat completion"
        );

        let request_body = self.chat_completion_body(instruction, body);
        let response = self.post_json("chat/completions", &request_body).await?;
        parse_completion_text(&response)
    }

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, SlackError> {
        info!(model = %self.image_model_name, "Requesting image generation");

        let request_body = self.image_generation_body(prompt);
        let response = self.post_json("images/generations", &request_body).await?;
        parse_generated_image(&response, prompt)
    }
}
