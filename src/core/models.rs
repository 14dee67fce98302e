use serde::{Deserialize, Serialize};

/// How an inbound message reached the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    DirectMessage,
    Mention,
    WatchedChannel,
}

/// A single user message the router acts on. Lives for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub text: String,
    pub user_id: String,
    pub channel_id: String,
    pub thread_ts: Option<String>,
    pub trigger: Trigger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub body: String,
}

/// Image returned by the generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub b64_json: String,
    pub revised_prompt: String,
}

/// A `chat.postMessage` call. Link and media unfurling are always off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub channel_id: String,
    pub thread_ts: Option<String>,
    pub text: String,
}

impl OutboundReply {
    #[must_use]
    pub fn new(channel_id: &str, thread_ts: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            thread_ts: thread_ts.map(ToString::to_string),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub channel_id: String,
    pub thread_ts: Option<String>,
    pub filename: String,
    pub initial_comment: String,
    pub bytes: Vec<u8>,
}
