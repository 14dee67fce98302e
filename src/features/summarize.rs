use tracing::{error, info};

use super::{Services, error_reply_text};
use crate::ai::{SUMMARIZE_INSTRUCTION, TRANSLATE_INSTRUCTION};
use crate::core::config::FailurePolicy;
use crate::core::models::{InboundMessage, OutboundReply};
use crate::errors::SlackError;
use crate::utils::links::extract_slack_links;
use crate::utils::text::contains_japanese;

pub const ACKNOWLEDGMENT_TEXT: &str = "Ok, I'll summarize ...";

/// Summaries already written in Japanese are not sent for translation.
#[must_use]
pub fn needs_translation(summary: &str) -> bool {
    !contains_japanese(summary)
}

/// Formats one summary reply.
///
/// Threaded requests start with a mention of the requester.
#[must_use]
pub fn format_summary_reply(
    message: &InboundMessage,
    title: &str,
    url: &str,
    summary: &str,
    translation: Option<&str>,
) -> String {
    let mention = if message.thread_ts.is_some() {
        format!("<@{}>\n", message.user_id)
    } else {
        String::new()
    };
    let translated = translation
        .map(|t| format!("\n *翻訳：* \n{t}"))
        .unwrap_or_default();

    format!("{mention}*{title}*\n{url}\n{summary}{translated}")
}

#[must_use]
pub fn url_error_text(url: &str, error: &SlackError) -> String {
    format!("{url}\n{}", error_reply_text(error))
}

async fn summarize_url(
    services: Services<'_>,
    message: &InboundMessage,
    url: &str,
) -> Result<(), SlackError> {
    let article = services.articles.fetch_article(url).await?;
    let summary = services
        .assistant
        .complete(SUMMARIZE_INSTRUCTION, &article.body)
        .await?;

    let translation = if needs_translation(&summary) {
        Some(
            services
                .assistant
                .complete(TRANSLATE_INSTRUCTION, &summary)
                .await?,
        )
    } else {
        None
    };

    let text = format_summary_reply(
        message,
        &article.title,
        url,
        &summary,
        translation.as_deref(),
    );

    services
        .chat
        .post_reply(&OutboundReply::new(
            &message.channel_id,
            message.thread_ts.as_deref(),
            text,
        ))
        .await
}

/// Summarizes every bracketed link in `message.text`, one after another,
/// posting one reply per link.
///
/// # Errors
///
/// Returns an error if the acknowledgment cannot be posted, or under
/// [`FailurePolicy::Abort`] on the first link that fails.
pub async fn handle_summarize(
    services: Services<'_>,
    message: &InboundMessage,
) -> Result<(), SlackError> {
    let thread_ts = message.thread_ts.as_deref();

    services
        .chat
        .post_reply(&OutboundReply::new(
            &message.channel_id,
            thread_ts,
            ACKNOWLEDGMENT_TEXT,
        ))
        .await?;

    let urls = extract_slack_links(&message.text);
    info!(url_count = urls.len(), "Summarizing links");

    for url in &urls {
        let Err(e) = summarize_url(services, message, url).await else {
            continue;
        };

        match services.failure_policy {
            FailurePolicy::Abort => return Err(e),
            FailurePolicy::Isolate => {
                error!(url = %url, "Error summarizing link: {}", e);
                services
                    .chat
                    .post_reply(&OutboundReply::new(
                        &message.channel_id,
                        thread_ts,
                        url_error_text(url, &e),
                    ))
                    .await?;
            }
        }
    }

    Ok(())
}
