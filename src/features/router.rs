use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use super::{Services, draw, error_reply_text, summarize};
use crate::core::models::{InboundMessage, OutboundReply, Trigger};
use crate::utils::links::contains_slack_link;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Summarize,
    Draw,
}

/// Messages with at least one bracketed link are summarized; everything
/// else is a drawing prompt.
#[must_use]
pub fn classify(text: &str) -> Route {
    if contains_slack_link(text) {
        Route::Summarize
    } else {
        Route::Draw
    }
}

/// Runs the handler for one inbound message.
///
/// Handler failures never escape: they are logged and reported back to the
/// user in the same thread context.
pub async fn dispatch(services: Services<'_>, message: &InboundMessage) {
    let correlation_id = Uuid::new_v4().to_string();
    let route = classify(&message.text);
    let span = info_span!(
        "dispatch",
        correlation_id = %correlation_id,
        channel_id = %message.channel_id,
        trigger = ?message.trigger,
        route = ?route,
    );

    async move {
        let result = match route {
            Route::Summarize => summarize::handle_summarize(services, message).await,
            Route::Draw if message.trigger == Trigger::WatchedChannel => {
                info!("Ignoring non-link message from watched channel");
                Ok(())
            }
            Route::Draw => draw::handle_draw(services, message).await,
        };

        match result {
            Ok(()) => info!("Message handled successfully"),
            Err(e) => {
                error!("Error: {}", e);
                let reply = OutboundReply::new(
                    &message.channel_id,
                    message.thread_ts.as_deref(),
                    error_reply_text(&e),
                );
                if let Err(post_err) = services.chat.post_reply(&reply).await {
                    error!("Failed to post error reply: {}", post_err);
                }
            }
        }
    }
    .instrument(span)
    .await;
}
