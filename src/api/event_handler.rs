//! Handler for Slack Events API callbacks.
//!
//! This module turns `event_callback` payloads into inbound messages:
//! - `app_mention` - the bot was mentioned in a channel
//! - `message` in a direct message with the bot
//! - `message` in a watched channel that contains links

use serde_json::Value;
use tracing::{debug, info};

use super::parsing::v_str;
use crate::core::config::AppConfig;
use crate::core::models::{InboundMessage, Trigger};
use crate::utils::links::contains_slack_link;
use crate::utils::text::strip_leading_mention;

/// Bot user id Slack lists first under `authorizations` in the envelope.
fn bot_user_id(envelope: &Value) -> Option<&str> {
    envelope
        .get("authorizations")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .and_then(|a| a.get("user_id"))
        .and_then(Value::as_str)
}

fn is_ignored(event: &Value) -> bool {
    // Bot posts (including our own replies) and edits/joins/etc. would loop.
    event.get("bot_id").is_some() || event.get("subtype").is_some()
}

fn parse_mention(event: &Value) -> Option<InboundMessage> {
    let text = strip_leading_mention(v_str(event, &["text"])?);
    let ts = v_str(event, &["thread_ts"]).or_else(|| v_str(event, &["ts"]))?;

    Some(InboundMessage {
        text,
        user_id: v_str(event, &["user"])?.to_string(),
        channel_id: v_str(event, &["channel"])?.to_string(),
        thread_ts: Some(ts.to_string()),
        trigger: Trigger::Mention,
    })
}

fn parse_direct_message(event: &Value) -> Option<InboundMessage> {
    Some(InboundMessage {
        text: v_str(event, &["text"])?.trim().to_string(),
        user_id: v_str(event, &["user"])?.to_string(),
        channel_id: v_str(event, &["channel"])?.to_string(),
        thread_ts: None,
        trigger: Trigger::DirectMessage,
    })
}

fn parse_watched_channel_message(
    event: &Value,
    bot_user_id: Option<&str>,
) -> Option<InboundMessage> {
    let text = v_str(event, &["text"])?.trim();

    if !contains_slack_link(text) {
        return None;
    }

    // Mentions of the bot are delivered again as `app_mention`.
    if let Some(bot) = bot_user_id
        && text.contains(&format!("<@{bot}>"))
    {
        return None;
    }

    let ts = v_str(event, &["thread_ts"]).or_else(|| v_str(event, &["ts"]))?;

    Some(InboundMessage {
        text: text.to_string(),
        user_id: v_str(event, &["user"])?.to_string(),
        channel_id: v_str(event, &["channel"])?.to_string(),
        thread_ts: Some(ts.to_string()),
        trigger: Trigger::WatchedChannel,
    })
}

/// Maps an `event_callback` envelope to the message the router should act on.
///
/// Returns `None` for anything the bot ignores.
#[must_use]
pub fn parse_inbound(config: &AppConfig, envelope: &Value) -> Option<InboundMessage> {
    let event = envelope.get("event")?;
    if is_ignored(event) {
        return None;
    }

    let event_type = v_str(event, &["type"]).unwrap_or("");
    info!(event_type = %event_type, "Processing event callback");

    let message = match event_type {
        "app_mention" => parse_mention(event),
        "message" => match v_str(event, &["channel_type"]) {
            Some("im") => parse_direct_message(event),
            _ => {
                let channel = v_str(event, &["channel"]).unwrap_or("");
                if config.is_watched_channel(channel) {
                    parse_watched_channel_message(event, bot_user_id(envelope))
                } else {
                    None
                }
            }
        },
        _ => None,
    }?;

    if message.text.is_empty() {
        debug!("Ignoring empty message");
        return None;
    }

    Some(message)
}
