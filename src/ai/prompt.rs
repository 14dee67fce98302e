use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use serde_json::{Value, json};

/// "Summarize as a bulleted list."
pub const SUMMARIZE_INSTRUCTION: &str = "箇条書きで要約してください。";

/// "Translate into Japanese."
pub const TRANSLATE_INSTRUCTION: &str = "日本語に翻訳してください。";

/// Builds the single-turn prompt: one system message holding the
/// instruction line followed by the text to work on.
#[must_use]
pub fn build_prompt(instruction: &str, body: &str) -> Vec<ChatCompletionMessage> {
    vec![ChatCompletionMessage {
        role: MessageRole::system,
        content: Content::Text(format!("{instruction}\n{body}")),
        name: None,
        tool_calls: None,
        tool_call_id: None,
    }]
}

/// Renders prompt messages as Chat Completions `messages` entries.
/// Image parts are not used by this bot and are skipped.
#[must_use]
pub fn chat_messages_json(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .filter_map(|m| {
            let role = match m.role {
                MessageRole::system => "system",
                MessageRole::assistant => "assistant",
                MessageRole::user | MessageRole::function | MessageRole::tool => "user",
            };
            match &m.content {
                Content::Text(text) => Some(json!({ "role": role, "content": text })),
                Content::ImageUrl(_) => None,
            }
        })
        .collect()
}
