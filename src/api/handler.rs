//! API Lambda handler - thin gate in front of the router.
//!
//! This module handles:
//! - Request validation (headers, body, signature)
//! - The Events API `url_verification` handshake
//! - Suppressing Slack redeliveries
//! - Handing accepted events to the router

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use super::event_handler::parse_inbound;
use super::state::AppState;
use super::{helpers, parsing, signature};
use crate::features::dispatch;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails in practice; malformed or unsigned requests get an error
/// response payload instead.
#[tracing::instrument(level = "info", skip(state, event))]
pub async fn function_handler(state: &AppState, event: LambdaEvent<Value>) -> Result<Value, Error> {
    Ok(handle_request(state, &event.payload).await)
}

/// Processes one API Gateway payload and returns the HTTP response value.
pub async fn handle_request(state: &AppState, payload: &Value) -> Value {
    // ========================================================================
    // Extract and validate headers and body
    // ========================================================================

    let Some(headers) = payload.get("headers") else {
        error!("Request missing headers");
        return helpers::err_response(400, "Missing headers");
    };

    let body = match extract_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    // ========================================================================
    // Verify Slack signature
    // ========================================================================

    if let Err(response) = verify_signature(&body, headers, &state.config.slack_signing_secret) {
        return response;
    }

    info!("Slack signature verified successfully");

    let Ok(json_body) = serde_json::from_str::<Value>(&body) else {
        error!("Request body is not JSON");
        return helpers::err_response(400, "Invalid body format");
    };

    match parsing::v_str(&json_body, &["type"]).unwrap_or("") {
        "url_verification" => {
            let challenge = parsing::v_str(&json_body, &["challenge"]).unwrap_or("");
            helpers::ok_text(challenge)
        }
        "event_callback" => handle_event_callback(state, headers, &json_body).await,
        other => {
            info!(body_type = %other, "Ignoring unsupported payload type");
            helpers::ok_empty()
        }
    }
}

async fn handle_event_callback(state: &AppState, headers: &Value, json_body: &Value) -> Value {
    if let Some(retry_num) = parsing::get_header_value(headers, "X-Slack-Retry-Num") {
        let reason = parsing::get_header_value(headers, "X-Slack-Retry-Reason").unwrap_or("");
        info!(retry_num = %retry_num, reason = %reason, "Skipping Slack retry");
        return helpers::ok_empty();
    }

    if let Some(event_id) = parsing::v_str(json_body, &["event_id"])
        && !state.is_first_delivery(event_id)
    {
        warn!(event_id = %event_id, "Skipping already handled event");
        return helpers::ok_empty();
    }

    if let Some(message) = parse_inbound(&state.config, json_body) {
        dispatch(state.bot.services(&state.config), &message).await;
    }

    helpers::ok_empty()
}

// ============================================================================
// Request Validation Helpers
// ============================================================================

fn extract_body(payload: &Value) -> Result<String, Value> {
    let Some(body) = payload.get("body") else {
        error!("Request missing body");
        return Err(helpers::err_response(400, "Missing body"));
    };

    let Some(body_str) = body.as_str() else {
        error!("Request body is not a string");
        return Err(helpers::err_response(400, "Invalid body format"));
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !is_base64 {
        return Ok(body_str.to_string());
    }

    STANDARD
        .decode(body_str)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| {
            error!("Request body is not valid base64 UTF-8");
            helpers::err_response(400, "Invalid body encoding")
        })
}

fn verify_signature(body: &str, headers: &Value, signing_secret: &str) -> Result<(), Value> {
    let Some(sig) = parsing::get_header_value(headers, "X-Slack-Signature") else {
        error!("Missing X-Slack-Signature header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Signature header",
        ));
    };

    let Some(timestamp) = parsing::get_header_value(headers, "X-Slack-Request-Timestamp") else {
        error!("Missing X-Slack-Request-Timestamp header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Request-Timestamp header",
        ));
    };

    if !signature::verify_slack_signature(body, timestamp, sig, signing_secret) {
        error!("Slack signature verification failed");
        return Err(helpers::err_response(401, "Invalid Slack signature"));
    }

    Ok(())
}
