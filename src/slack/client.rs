//! Slack API client module
//!
//! Encapsulates the Slack Web API calls the bot makes: posting replies and
//! uploading generated images. Every call is attempted once.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{Value, json};
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::SlackApiChatPostMessageRequest;
use slack_morphism::{
    SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent, SlackTs,
};
use tracing::{info, warn};

use crate::core::models::{FileUpload, OutboundReply};
use crate::errors::SlackError;
use crate::features::ChatSink;

const SLACK_API_BASE: &str = "https://slack.com/api";

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface a SlackError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(Client::new);

#[derive(Debug, Deserialize)]
struct UploadUrlResponse {
    ok: bool,
    upload_url: Option<String>,
    file_id: Option<String>,
    error: Option<String>,
}

/// Build the `chat.postMessage` request for a reply with unfurling disabled.
#[must_use]
pub fn build_post_message_request(reply: &OutboundReply) -> SlackApiChatPostMessageRequest {
    SlackApiChatPostMessageRequest::new(
        SlackChannelId(reply.channel_id.clone()),
        SlackMessageContent::new().with_text(reply.text.clone()),
    )
    .opt_thread_ts(reply.thread_ts.clone().map(SlackTs))
    .with_unfurl_links(false)
    .with_unfurl_media(false)
}

/// Build the JSON payload for `files.completeUploadExternal`.
#[must_use]
pub fn build_complete_upload_payload(file_id: &str, upload: &FileUpload) -> Value {
    let mut payload = json!({
        "files": [{ "id": file_id, "title": upload.filename }],
        "channel_id": upload.channel_id,
        "initial_comment": upload.initial_comment,
    });

    if let Some(thread_ts) = &upload.thread_ts {
        payload["thread_ts"] = Value::String(thread_ts.clone());
    }

    payload
}

/// Turn a Slack Web API body into an error unless it reports `ok: true`.
fn ensure_ok(method: &str, body: &Value) -> Result<(), SlackError> {
    if body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
        return Ok(());
    }

    Err(SlackError::ApiError(format!(
        "{method} error: {}",
        body.get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    )))
}

/// Slack API client bound to one bot token
pub struct SlackClient {
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the connector is unavailable or Slack rejects the post.
    pub async fn post_message(&self, reply: &OutboundReply) -> Result<(), SlackError> {
        let session = SLACK_CLIENT
            .as_ref()
            .ok_or_else(|| {
                SlackError::GeneralError("Slack HTTP connector not initialized".to_string())
            })?
            .open_session(&self.token);

        session
            .chat_post_message(&build_post_message_request(reply))
            .await?;

        Ok(())
    }

    /// Upload a file through Slack's external upload flow and share it to
    /// the target channel or thread.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three upload steps fails.
    pub async fn upload_file(&self, upload: &FileUpload) -> Result<(), SlackError> {
        let (upload_url, file_id) = self
            .get_upload_url(&upload.filename, upload.bytes.len())
            .await?;

        let resp = HTTP_CLIENT
            .post(&upload_url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(upload.bytes.clone())
            .send()
            .await
            .map_err(|e| SlackError::HttpError(format!("Failed to upload file bytes: {e}")))?;

        if !resp.status().is_success() {
            return Err(SlackError::ApiError(format!(
                "file upload HTTP {}",
                resp.status()
            )));
        }

        let payload = build_complete_upload_payload(&file_id, upload);
        let resp = HTTP_CLIENT
            .post(format!("{SLACK_API_BASE}/files.completeUploadExternal"))
            .bearer_auth(&self.token.token_value.0)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                SlackError::HttpError(format!("Failed to complete file upload: {e}"))
            })?;

        if !resp.status().is_success() {
            return Err(SlackError::ApiError(format!(
                "files.completeUploadExternal HTTP {}",
                resp.status()
            )));
        }

        let body: Value = resp.json().await.map_err(|e| {
            SlackError::GeneralError(format!(
                "files.completeUploadExternal JSON parse error: {e}"
            ))
        })?;
        ensure_ok("files.completeUploadExternal", &body)?;

        info!(
            file_id = %file_id,
            channel_id = %upload.channel_id,
            bytes = upload.bytes.len(),
            "File uploaded"
        );
        Ok(())
    }

    async fn get_upload_url(
        &self,
        filename: &str,
        length: usize,
    ) -> Result<(String, String), SlackError> {
        let length = length.to_string();
        let resp = HTTP_CLIENT
            .post(format!("{SLACK_API_BASE}/files.getUploadURLExternal"))
            .bearer_auth(&self.token.token_value.0)
            .form(&[("filename", filename), ("length", length.as_str())])
            .send()
            .await
            .map_err(|e| SlackError::HttpError(format!("Failed to request upload URL: {e}")))?;

        if !resp.status().is_success() {
            return Err(SlackError::ApiError(format!(
                "files.getUploadURLExternal HTTP {}",
                resp.status()
            )));
        }

        let body: UploadUrlResponse = resp.json().await.map_err(|e| {
            SlackError::GeneralError(format!("files.getUploadURLExternal JSON parse error: {e}"))
        })?;

        match body {
            UploadUrlResponse {
                ok: true,
                upload_url: Some(url),
                file_id: Some(id),
                ..
            } => Ok((url, id)),
            UploadUrlResponse { error, .. } => Err(SlackError::ApiError(format!(
                "files.getUploadURLExternal error: {}",
                error.as_deref().unwrap_or("unknown")
            ))),
        }
    }
}

#[async_trait]
impl ChatSink for SlackClient {
    async fn post_reply(&self, reply: &OutboundReply) -> Result<(), SlackError> {
        self.post_message(reply).await
    }

    async fn upload_file(&self, upload: &FileUpload) -> Result<(), SlackError> {
        SlackClient::upload_file(self, upload).await
    }
}
