use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::info;

use super::article::extract_article;
use crate::core::models::Article;
use crate::errors::SlackError;
use crate::features::ArticleSource;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/94.0.4606.81 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en, ja";

/// Downloads pages with browser-like headers and extracts their article text.
pub struct ArticleFetcher {
    http: Client,
}

impl ArticleFetcher {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, SlackError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SlackError::HttpError(format!("Failed to build fetch HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl ArticleSource for ArticleFetcher {
    async fn fetch_article(&self, url: &str) -> Result<Article, SlackError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| SlackError::ParseError(format!("Invalid URL {url}: {e}")))?;

        let html = self
            .http
            .get(parsed)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let article = extract_article(&html);
        info!(
            url = %url,
            title = %article.title,
            body_chars = article.body.chars().count(),
            "Extracted article"
        );
        Ok(article)
    }
}
