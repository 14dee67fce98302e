use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::core::models::Article;

// Selector::parse only fails for invalid CSS; these are constants.
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("static CSS selector 'title' is valid"));
static ARTICLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article").expect("static CSS selector 'article' is valid"));
static DIV: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div").expect("static CSS selector 'div' is valid"));

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Pulls a title and main body out of an HTML document.
///
/// The body is the text of the `<article>` elements when they hold any text.
/// Otherwise every `<div>` contributes its trimmed text, one per line, in
/// document order. Nested divs repeat their children's text.
#[must_use]
pub fn extract_article(html: &str) -> Article {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .map(element_text)
        .unwrap_or_default()
        .trim()
        .to_string();

    let article_text = document
        .select(&ARTICLE)
        .map(element_text)
        .collect::<String>()
        .trim()
        .to_string();

    if !article_text.is_empty() {
        return Article {
            title,
            body: article_text,
        };
    }

    let body = document
        .select(&DIV)
        .map(|div| element_text(div).trim().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    Article { title, body }
}
