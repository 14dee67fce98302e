use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::error;

/// Oldest request timestamp accepted, in seconds.
const MAX_REQUEST_AGE_SECS: u64 = 300;
/// Clock skew tolerated for timestamps from the future, in seconds.
const MAX_CLOCK_SKEW_SECS: u64 = 60;

/// Verifies Slack's `X-Slack-Signature` for a request body.
#[must_use]
pub fn verify_slack_signature(
    request_body: &str,
    timestamp: &str,
    signature: &str,
    signing_secret: &str,
) -> bool {
    let Ok(now) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        error!("System clock is before the Unix epoch");
        return false;
    };
    verify_slack_signature_at(
        request_body,
        timestamp,
        signature,
        signing_secret,
        now.as_secs(),
    )
}

/// Same as [`verify_slack_signature`] with an explicit current time.
#[must_use]
pub fn verify_slack_signature_at(
    request_body: &str,
    timestamp: &str,
    signature: &str,
    signing_secret: &str,
    now_secs: u64,
) -> bool {
    let Ok(ts) = timestamp.parse::<u64>() else {
        error!("Invalid X-Slack-Request-Timestamp: {}", timestamp);
        return false;
    };

    if now_secs.saturating_sub(ts) > MAX_REQUEST_AGE_SECS
        || ts > now_secs + MAX_CLOCK_SKEW_SECS
    {
        error!("Timestamp out of range, potential replay attack");
        return false;
    }

    let Some(expected) = signature
        .strip_prefix("v0=")
        .and_then(|hex_sig| hex::decode(hex_sig).ok())
    else {
        error!("Malformed X-Slack-Signature header");
        return false;
    };

    let Some(mac) = signed_mac(timestamp, request_body, signing_secret) else {
        return false;
    };

    // Constant-time comparison.
    if mac.verify_slice(&expected).is_ok() {
        true
    } else {
        error!("Signature verification failed");
        false
    }
}

fn signed_mac(timestamp: &str, request_body: &str, signing_secret: &str) -> Option<Hmac<Sha256>> {
    let mut mac = match Hmac::<Sha256>::new_from_slice(signing_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return None;
        }
    };
    mac.update(format!("v0:{timestamp}:{request_body}").as_bytes());
    Some(mac)
}

#[must_use]
pub fn compute_signature(timestamp: &str, request_body: &str, signing_secret: &str) -> String {
    signed_mac(timestamp, request_body, signing_secret)
        .map(|mac| format!("v0={}", hex::encode(mac.finalize().into_bytes())))
        .unwrap_or_default()
}
