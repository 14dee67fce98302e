//! Web article retrieval for link summaries

pub mod article;
pub mod fetcher;

pub use article::extract_article;
pub use fetcher::ArticleFetcher;
