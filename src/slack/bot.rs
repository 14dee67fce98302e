use std::sync::Arc;

use super::client::SlackClient;
use crate::ai::LlmClient;
use crate::core::config::AppConfig;
use crate::errors::SlackError;
use crate::features::{ArticleSource, Assistant, ChatSink, Services};
use crate::fetch::ArticleFetcher;

/// The bot's outbound clients, built once per process.
pub struct SlackBot {
    chat: Arc<dyn ChatSink>,
    assistant: Arc<dyn Assistant>,
    articles: Arc<dyn ArticleSource>,
}

impl SlackBot {
    /// Construct a `SlackBot` composed of a `SlackClient`, an `LlmClient`
    /// and an `ArticleFetcher`.
    ///
    /// # Errors
    ///
    /// Returns an error if the article fetcher's HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, SlackError> {
        let slack_client = SlackClient::new(config.slack_bot_token.clone());
        let llm_client = LlmClient::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.openai_model.clone(),
            config.openai_image_model.clone(),
            config.openai_base_url.clone(),
        );
        let article_fetcher = ArticleFetcher::new()?;

        Ok(Self::with_services(
            Arc::new(slack_client),
            Arc::new(llm_client),
            Arc::new(article_fetcher),
        ))
    }

    /// Build a bot over any chat, assistant and article implementations.
    #[must_use]
    pub fn with_services(
        chat: Arc<dyn ChatSink>,
        assistant: Arc<dyn Assistant>,
        articles: Arc<dyn ArticleSource>,
    ) -> Self {
        Self {
            chat,
            assistant,
            articles,
        }
    }

    /// Borrow the clients as handler services.
    #[must_use]
    pub fn services(&self, config: &AppConfig) -> Services<'_> {
        Services {
            chat: self.chat.as_ref(),
            assistant: self.assistant.as_ref(),
            articles: self.articles.as_ref(),
            failure_policy: config.failure_policy,
        }
    }
}
