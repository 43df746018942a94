//! Scraping of the HTML pages the API sometimes answers with.
//!
//! Two shapes matter. Server errors (500) may be rendered as an HTML error
//! page instead of JSON, and unauthenticated requests may be answered with
//! 200 and the web login page. The extraction rules here are tied to the
//! upstream templates and are kept exactly as they are, brittle or not.

use scraper::{Html, Selector};

/// `<title>` of the login page served instead of a 403.
pub const LOGIN_PAGE_TITLE: &str = "Log In - AzuraCast";

/// Exception details scraped from an HTML error page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    pub kind: String,
    pub message: String,
}

/// Text of the document's `<title>`, trimmed.
pub fn page_title(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("title").ok()?;
    let title = document.select(&selector).next()?;
    Some(title.text().collect::<String>().trim().to_string())
}

/// Whether `body` is the login page.
pub fn is_login_page(body: &str) -> bool {
    page_title(body).as_deref() == Some(LOGIN_PAGE_TITLE)
}

/// Extract the exception class and message from an HTML error page.
///
/// The class name comes from `<p class="text-muted card-text">`, which holds
/// a slash-delimited source file reference: the second segment, without its
/// file extension. The message is the text of the first `<h4>`.
pub fn error_page(body: &str) -> Option<ErrorPage> {
    let document = Html::parse_document(body);

    let source_selector = Selector::parse("p.text-muted.card-text").ok()?;
    let source = document
        .select(&source_selector)
        .next()?
        .text()
        .collect::<String>();
    let kind = exception_kind(&source)?;

    let heading_selector = Selector::parse("h4").ok()?;
    let message = document
        .select(&heading_selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if message.is_empty() {
        return None;
    }

    Some(ErrorPage { kind, message })
}

fn exception_kind(source: &str) -> Option<String> {
    let segment = source.trim().split('/').nth(1)?;
    let stem = segment.split('.').next()?.trim();
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}
