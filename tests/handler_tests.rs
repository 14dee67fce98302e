mod common;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::{FakeArticles, FakeAssistant, FakeChat};
use drawbrief::api::signature::compute_signature;
use drawbrief::api::{AppState, handle_request};
use drawbrief::core::config::{AppConfig, FailurePolicy};
use serde_json::{Value, json};

const SECRET: &str = "test_signing_secret";

fn config() -> AppConfig {
    AppConfig {
        slack_signing_secret: SECRET.to_string(),
        slack_bot_token: "xoxb-test".to_string(),
        openai_api_key: "sk-test".to_string(),
        openai_org_id: None,
        openai_model: "gpt-4-1106-preview".to_string(),
        openai_image_model: "dall-e-3".to_string(),
        openai_base_url: "https://api.openai.com/v1".to_string(),
        auto_summarize_channels: Vec::new(),
        failure_policy: FailurePolicy::Isolate,
    }
}

fn state() -> AppState {
    AppState::new(config()).unwrap()
}

struct FakeGate {
    state: AppState,
    chat: Arc<FakeChat>,
    assistant: Arc<FakeAssistant>,
}

fn fake_gate() -> FakeGate {
    let chat = Arc::new(FakeChat::default());
    let assistant = Arc::new(FakeAssistant::new("・要点"));
    let articles = Arc::new(FakeArticles::default());
    let state = AppState::with_services(config(), chat.clone(), assistant.clone(), articles);
    FakeGate {
        state,
        chat,
        assistant,
    }
}

fn now() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        .to_string()
}

fn signed_request(body: &str, extra_headers: &[(&str, &str)]) -> Value {
    let ts = now();
    let mut headers = json!({
        "x-slack-request-timestamp": ts,
        "x-slack-signature": compute_signature(&ts, body, SECRET),
    });
    for (k, v) in extra_headers {
        headers[*k] = Value::String((*v).to_string());
    }
    json!({ "headers": headers, "body": body, "isBase64Encoded": false })
}

fn bot_message_callback(event_id: &str) -> String {
    json!({
        "type": "event_callback",
        "event_id": event_id,
        "event": {
            "type": "message",
            "channel_type": "im",
            "text": "echo",
            "user": "U1",
            "channel": "D1",
            "bot_id": "B1"
        }
    })
    .to_string()
}

fn mention_callback(event_id: &str) -> String {
    json!({
        "type": "event_callback",
        "event_id": event_id,
        "authorizations": [{ "user_id": "UBOT" }],
        "event": {
            "type": "app_mention",
            "text": "<@UBOT> draw a cat",
            "user": "U1",
            "channel": "C1",
            "ts": "1700000000.000200"
        }
    })
    .to_string()
}

#[tokio::test]
async fn missing_headers_is_bad_request() {
    let response = handle_request(&state(), &json!({ "body": "{}" })).await;
    assert_eq!(response["statusCode"], 400);
}

#[tokio::test]
async fn missing_body_is_bad_request() {
    let response = handle_request(&state(), &json!({ "headers": {} })).await;
    assert_eq!(response["statusCode"], 400);
}

#[tokio::test]
async fn unsigned_request_is_rejected() {
    let payload = json!({
        "headers": { "x-slack-request-timestamp": now(), "x-slack-signature": "v0=deadbeef" },
        "body": r#"{"type":"url_verification","challenge":"abc"}"#
    });
    let response = handle_request(&state(), &payload).await;
    assert_eq!(response["statusCode"], 401);
}

#[tokio::test]
async fn missing_signature_header_is_rejected() {
    let payload = json!({
        "headers": { "x-slack-request-timestamp": now() },
        "body": "{}"
    });
    let response = handle_request(&state(), &payload).await;
    assert_eq!(response["statusCode"], 401);
}

#[tokio::test]
async fn url_verification_echoes_challenge() {
    let body = r#"{"type":"url_verification","challenge":"3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"}"#;
    let response = handle_request(&state(), &signed_request(body, &[])).await;
    assert_eq!(response["statusCode"], 200);
    assert_eq!(
        response["body"],
        "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"
    );
}

#[tokio::test]
async fn base64_encoded_body_is_decoded_before_verification() {
    let body = r#"{"type":"url_verification","challenge":"xyz"}"#;
    let mut payload = signed_request(body, &[]);
    payload["body"] = Value::String(STANDARD.encode(body));
    payload["isBase64Encoded"] = Value::Bool(true);

    let response = handle_request(&state(), &payload).await;
    assert_eq!(response["statusCode"], 200);
    assert_eq!(response["body"], "xyz");
}

#[tokio::test]
async fn slack_retries_are_acknowledged_without_processing() {
    let gate = fake_gate();
    let body = mention_callback("EvRetry");
    let payload = signed_request(
        &body,
        &[("x-slack-retry-num", "1"), ("x-slack-retry-reason", "http_timeout")],
    );

    let response = handle_request(&gate.state, &payload).await;
    assert_eq!(response["statusCode"], 200);
    assert_eq!(gate.chat.call_count(), 0);
    assert!(gate.assistant.image_prompts.lock().unwrap().is_empty());
    // The retry never reached the redelivery guard.
    assert!(gate.state.is_first_delivery("EvRetry"));
}

#[tokio::test]
async fn bot_messages_are_acknowledged_without_processing() {
    let gate = fake_gate();
    let body = bot_message_callback("EvBot");

    let response = handle_request(&gate.state, &signed_request(&body, &[])).await;
    assert_eq!(response["statusCode"], 200);
    assert_eq!(gate.chat.call_count(), 0);
}

#[tokio::test]
async fn signed_mention_is_dispatched_to_the_router() {
    let gate = fake_gate();
    let body = mention_callback("EvMention");

    let response = handle_request(&gate.state, &signed_request(&body, &[])).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(*gate.assistant.image_prompts.lock().unwrap(), vec!["draw a cat"]);
    assert_eq!(gate.chat.reply_texts(), vec!["Ok, I'll draw ... draw a cat"]);

    let replies = gate.chat.replies.lock().unwrap();
    assert_eq!(replies[0].channel_id, "C1");
    assert_eq!(replies[0].thread_ts.as_deref(), Some("1700000000.000200"));
    assert_eq!(gate.chat.uploads.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn redelivered_event_id_is_not_processed_twice() {
    let gate = fake_gate();
    let body = mention_callback("EvOnce");

    let first = handle_request(&gate.state, &signed_request(&body, &[])).await;
    let calls_after_first = gate.chat.call_count();
    let second = handle_request(&gate.state, &signed_request(&body, &[])).await;

    assert_eq!(first["statusCode"], 200);
    assert_eq!(second["statusCode"], 200);
    assert!(calls_after_first > 0);
    assert_eq!(gate.chat.call_count(), calls_after_first);
    assert_eq!(gate.assistant.image_prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn non_json_body_is_bad_request() {
    let response = handle_request(&state(), &signed_request("token=abc&text=hi", &[])).await;
    assert_eq!(response["statusCode"], 400);
}
