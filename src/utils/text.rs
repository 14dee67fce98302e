//! Small text transforms applied to prompts, filenames and model output.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_script::{Script, UnicodeScript};

static LEADING_MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*<@[^>]*>").expect("static regex compile"));

static DATA_URI_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:image/\w+;base64,").expect("static regex compile"));

/// Removes the leading `<@U…>` token of an app mention and trims the rest.
#[must_use]
pub fn strip_leading_mention(text: &str) -> String {
    LEADING_MENTION_RE.replace(text, "").trim().to_string()
}

/// Replaces each of `/ \ ? % * : | " < >` with `_`, one for one.
#[must_use]
pub fn sanitize_filename(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '/' | '\\' | '?' | '%' | '*' | ':' | '|' | '"' | '<' | '>' => '_',
            other => other,
        })
        .collect()
}

#[must_use]
pub fn strip_data_uri_prefix(b64: &str) -> &str {
    match DATA_URI_PREFIX_RE.find(b64) {
        Some(m) => &b64[m.end()..],
        None => b64,
    }
}

/// True when `text` already contains Japanese script (kana or kanji).
#[must_use]
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(
            c.script(),
            Script::Hiragana | Script::Katakana | Script::Han
        )
    })
}
