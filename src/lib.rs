/// Drawbrief - a Slack bot that draws pictures and summarizes links with `OpenAI`.
///
/// The bot listens for direct messages and mentions. A message containing
/// links is summarized link by link (fetch the page, summarize, translate to
/// Japanese when needed); anything else is treated as an image prompt and
/// answered with a generated picture.
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda behind an HTTP endpoint for the Events API
/// - slack-morphism and the Slack Web API for replies and file uploads
/// - the `OpenAI` chat completion and image generation endpoints
/// - scraper for article extraction
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use drawbrief::api::AppState;
/// use drawbrief::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     drawbrief::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let state = AppState::new(config)?;
///
///     let payload = serde_json::json!({ "headers": {}, "body": "" });
///     let response = drawbrief::api::handle_request(&state, &payload).await;
///     println!("{response}");
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod features;
pub mod fetch;
pub mod slack;
pub mod utils;

pub use errors::SlackError;
pub use slack::SlackBot;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. The level comes from `RUST_LOG` and defaults
/// to `info`. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// drawbrief::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
