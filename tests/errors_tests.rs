use std::error::Error;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use drawbrief::errors::SlackError;
use drawbrief::features::error_reply_text;

#[test]
fn test_slack_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = SlackError::ParseError("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_slack_error_display() {
    let error = SlackError::ApiError("channel_not_found".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access Slack API: channel_not_found"
    );

    let error = SlackError::OpenAIError("Model unavailable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access OpenAI API: Model unavailable"
    );

    let error = SlackError::HttpError("Connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection error"
    );

    let error = SlackError::GeneralError("plain".to_string());
    assert_eq!(format!("{error}"), "plain");
}

#[test]
fn test_slack_error_from_conversions() {
    let err = anyhow::anyhow!("test error");
    let slack_err: SlackError = err.into();

    match slack_err {
        SlackError::ApiError(msg) => assert!(msg.contains("test error")),
        _ => panic!("Unexpected error type"),
    }

    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> SlackError {
        SlackError::from(err)
    }
}

#[test]
fn test_base64_failure_becomes_general_error() {
    let decode_err = STANDARD.decode("***").unwrap_err();
    let slack_err = SlackError::from(decode_err);

    match &slack_err {
        SlackError::GeneralError(msg) => assert!(msg.starts_with("Invalid base64 image payload")),
        _ => panic!("Unexpected error type"),
    }
}

#[test]
fn test_error_reply_wraps_display_text() {
    let error = SlackError::OpenAIError("rate limited".to_string());
    assert_eq!(
        error_reply_text(&error),
        "Sorry, an error occurred: Failed to access OpenAI API: rate limited"
    );
}
