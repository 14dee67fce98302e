#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use drawbrief::SlackError;
use drawbrief::ai::TRANSLATE_INSTRUCTION;
use drawbrief::core::config::FailurePolicy;
use drawbrief::core::models::{
    Article, FileUpload, GeneratedImage, InboundMessage, OutboundReply, Trigger,
};
use drawbrief::features::{ArticleSource, Assistant, ChatSink, Services};

/// Records every outbound call.
#[derive(Default)]
pub struct FakeChat {
    pub replies: Mutex<Vec<OutboundReply>>,
    pub uploads: Mutex<Vec<FileUpload>>,
    pub fail_uploads: bool,
}

impl FakeChat {
    pub fn reply_texts(&self) -> Vec<String> {
        self.replies
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.text.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.replies.lock().unwrap().len() + self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatSink for FakeChat {
    async fn post_reply(&self, reply: &OutboundReply) -> Result<(), SlackError> {
        self.replies.lock().unwrap().push(reply.clone());
        Ok(())
    }

    async fn upload_file(&self, upload: &FileUpload) -> Result<(), SlackError> {
        if self.fail_uploads {
            return Err(SlackError::ApiError(
                "files.completeUploadExternal error: invalid_channel".into(),
            ));
        }
        self.uploads.lock().unwrap().push(upload.clone());
        Ok(())
    }
}

/// Answers summaries with `summary`, translations with `translation`.
pub struct FakeAssistant {
    pub summary: String,
    pub translation: String,
    pub image: Result<GeneratedImage, String>,
    pub calls: Mutex<Vec<(String, String)>>,
    pub image_prompts: Mutex<Vec<String>>,
}

impl FakeAssistant {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            translation: "・翻訳済み".to_string(),
            image: Ok(GeneratedImage {
                b64_json: String::new(),
                revised_prompt: String::new(),
            }),
            calls: Mutex::new(Vec::new()),
            image_prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_image(mut self, image: Result<GeneratedImage, String>) -> Self {
        self.image = image;
        self
    }

    pub fn instructions(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(instruction, _)| instruction.clone())
            .collect()
    }
}

#[async_trait]
impl Assistant for FakeAssistant {
    async fn complete(&self, instruction: &str, body: &str) -> Result<String, SlackError> {
        self.calls
            .lock()
            .unwrap()
            .push((instruction.to_string(), body.to_string()));
        if instruction == TRANSLATE_INSTRUCTION {
            Ok(self.translation.clone())
        } else {
            Ok(self.summary.clone())
        }
    }

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, SlackError> {
        self.image_prompts.lock().unwrap().push(prompt.to_string());
        self.image.clone().map_err(SlackError::OpenAIError)
    }
}

/// Serves canned articles; unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct FakeArticles {
    pub pages: HashMap<String, Article>,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeArticles {
    pub fn with_page(mut self, url: &str, title: &str, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            Article {
                title: title.to_string(),
                body: body.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl ArticleSource for FakeArticles {
    async fn fetch_article(&self, url: &str) -> Result<Article, SlackError> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| SlackError::HttpError(format!("error sending request for url ({url})")))
    }
}

pub fn services<'a>(
    chat: &'a FakeChat,
    assistant: &'a FakeAssistant,
    articles: &'a FakeArticles,
    failure_policy: FailurePolicy,
) -> Services<'a> {
    Services {
        chat,
        assistant,
        articles,
        failure_policy,
    }
}

pub fn mention(text: &str) -> InboundMessage {
    InboundMessage {
        text: text.to_string(),
        user_id: "U123".to_string(),
        channel_id: "C123".to_string(),
        thread_ts: Some("1700000000.000100".to_string()),
        trigger: Trigger::Mention,
    }
}

pub fn direct_message(text: &str) -> InboundMessage {
    InboundMessage {
        text: text.to_string(),
        user_id: "U123".to_string(),
        channel_id: "D123".to_string(),
        thread_ts: None,
        trigger: Trigger::DirectMessage,
    }
}
