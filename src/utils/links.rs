use once_cell::sync::Lazy;
use regex::Regex;

// Slack wraps links in angle brackets, optionally with a label:
// - <https://example.com/>
// - <https://example.com|example.com>
static SLACK_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(https?://[^\s<>|]+)(?:\|[^>]*)?>").expect("static regex compile")
});

/// Returns every bracketed HTTP(S) link in `text`, in order of appearance.
///
/// Duplicates are kept; a link pasted twice is summarized twice.
#[must_use]
pub fn extract_slack_links(text: &str) -> Vec<String> {
    SLACK_LINK_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

#[must_use]
pub fn contains_slack_link(text: &str) -> bool {
    SLACK_LINK_RE.is_match(text)
}
