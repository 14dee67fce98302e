use std::env;

const DEFAULT_CHAT_MODEL: &str = "gpt-4-1106-preview";
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// What the summarize handler does when one URL in a batch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Report the failing URL and carry on with the rest.
    #[default]
    Isolate,
    /// Stop at the first failure and let the router report it.
    Abort,
}

impl FailurePolicy {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "isolate" => Ok(Self::Isolate),
            "abort" => Ok(Self::Abort),
            other => Err(format!(
                "SUMMARIZE_FAILURE_POLICY: expected `isolate` or `abort`, got `{other}`"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_signing_secret: String,
    pub slack_bot_token: String,
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_image_model: String,
    pub openai_base_url: String,
    pub auto_summarize_channels: Vec<String>,
    pub failure_policy: FailurePolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            slack_signing_secret: env::var("SLACK_SIGNING_SECRET")
                .map_err(|e| format!("SLACK_SIGNING_SECRET: {}", e))?,
            slack_bot_token: env::var("SLACK_BOT_TOKEN")
                .map_err(|e| format!("SLACK_BOT_TOKEN: {}", e))?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|e| format!("OPENAI_API_KEY: {}", e))?,
            openai_org_id: env::var("OPENAI_ORG_ID").ok(),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            openai_image_model: env::var("OPENAI_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            auto_summarize_channels: parse_channel_list(
                &env::var("AUTO_SUMMARIZE_CHANNELS").unwrap_or_default(),
            ),
            failure_policy: FailurePolicy::parse(
                &env::var("SUMMARIZE_FAILURE_POLICY").unwrap_or_default(),
            )?,
        })
    }

    #[must_use]
    pub fn is_watched_channel(&self, channel_id: &str) -> bool {
        self.auto_summarize_channels.iter().any(|c| c == channel_id)
    }
}

/// Splits a comma-separated channel list, dropping blanks.
#[must_use]
pub fn parse_channel_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(ToString::to_string)
        .collect()
}
