//! Request handlers and the seams they talk through.
//!
//! Handlers only see the three traits below, so tests can swap in fakes for
//! Slack, `OpenAI` and the web.

pub mod draw;
pub mod router;
pub mod summarize;

use async_trait::async_trait;

use crate::core::config::FailurePolicy;
use crate::core::models::{Article, FileUpload, GeneratedImage, OutboundReply};
use crate::errors::SlackError;

pub use router::{Route, classify, dispatch};

/// Outbound side of the chat platform.
#[async_trait]
pub trait ChatSink: Send + Sync {
    async fn post_reply(&self, reply: &OutboundReply) -> Result<(), SlackError>;

    async fn upload_file(&self, upload: &FileUpload) -> Result<(), SlackError>;
}

/// Hosted generative model.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Single-turn completion of `instruction` applied to `body`.
    async fn complete(&self, instruction: &str, body: &str) -> Result<String, SlackError>;

    /// One 1024x1024 image, base64 encoded.
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, SlackError>;
}

/// Fetches a page and extracts its article text.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_article(&self, url: &str) -> Result<Article, SlackError>;
}

/// Everything a handler needs for one event.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub chat: &'a dyn ChatSink,
    pub assistant: &'a dyn Assistant,
    pub articles: &'a dyn ArticleSource,
    pub failure_policy: FailurePolicy,
}

/// Text of every error reply; the error is included verbatim.
#[must_use]
pub fn error_reply_text(error: &SlackError) -> String {
    format!("Sorry, an error occurred: {error}")
}
