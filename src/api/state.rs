use std::sync::{Arc, Mutex};

use super::dedupe::RecentEvents;
use crate::core::config::AppConfig;
use crate::errors::SlackError;
use crate::features::{ArticleSource, Assistant, ChatSink};
use crate::slack::SlackBot;

/// Process-wide state, built once at cold start and never mutated apart
/// from the redelivery guard.
pub struct AppState {
    pub config: AppConfig,
    pub bot: SlackBot,
    pub recent_events: Mutex<RecentEvents>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the bot's clients cannot be constructed.
    pub fn new(config: AppConfig) -> Result<Self, SlackError> {
        let bot = SlackBot::new(&config)?;
        Ok(Self::from_bot(config, bot))
    }

    /// State over caller-supplied clients instead of the Slack and `OpenAI` ones.
    #[must_use]
    pub fn with_services(
        config: AppConfig,
        chat: Arc<dyn ChatSink>,
        assistant: Arc<dyn Assistant>,
        articles: Arc<dyn ArticleSource>,
    ) -> Self {
        Self::from_bot(config, SlackBot::with_services(chat, assistant, articles))
    }

    fn from_bot(config: AppConfig, bot: SlackBot) -> Self {
        Self {
            config,
            bot,
            recent_events: Mutex::new(RecentEvents::default()),
        }
    }

    /// Records `event_id`; `false` means this process already handled it.
    pub fn is_first_delivery(&self, event_id: &str) -> bool {
        match self.recent_events.lock() {
            Ok(mut recent) => recent.check_and_insert(event_id),
            Err(poisoned) => poisoned.into_inner().check_and_insert(event_id),
        }
    }
}
