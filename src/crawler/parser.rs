//! HTML parsing context
//!
//! This module turns a fetched HTML document into a [`Page`]:
//! - Page title
//! - Internal and external links, resolved and cleaned up
//! - Embedded media sources, grouped by kind

use crate::state::{MediaKind, Page};
use crate::url::{clean_up_url, contains_unsafe_chars, is_external};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Selectors for embedded media, in the order they are collected
const MEDIA_SELECTORS: &[(MediaKind, &str, &str)] = &[
    (MediaKind::Image, "body img[src]", "src"),
    (MediaKind::Audio, "body audio source[src]", "src"),
    (MediaKind::Video, "body video source[src]", "src"),
    (MediaKind::Plugin, "body object[data]", "data"),
    (MediaKind::Plugin, "body embed[src]", "src"),
    (MediaKind::Iframe, "body iframe[src]", "src"),
];

/// Strategy that turns a fetched HTML document into a [`Page`]
///
/// Parsing never fails. A document that yields nothing still produces a
/// page with its URL set.
pub trait ParsingContext: Send + Sync + 'static {
    fn parse(&self, url: &str, html: &str) -> Page;
}

/// The default parsing context for ordinary HTML sites
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericParsingContext;

impl ParsingContext for GenericParsingContext {
    /// Builds a page from an HTML document
    ///
    /// # Link Extraction Rules
    ///
    /// **Include:**
    /// - `<a href="...">` tags inside `<body>`, resolved against the page URL
    ///
    /// **Exclude:**
    /// - hrefs containing unsafe characters (`#`, `<`, `>`, ...)
    /// - non-HTTP(S) schemes (`javascript:`, `mailto:`, `tel:`, ...)
    ///
    /// Relative links resolve against the document's `<base href>` when it
    /// has one. Kept links are cleaned up and split into internal and
    /// external by comparing their bare domain with the page's.
    ///
    /// # Example
    ///
    /// ```
    /// use webcrawler::crawler::{GenericParsingContext, ParsingContext};
    ///
    /// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
    /// let page = GenericParsingContext.parse("https://example.com", html);
    /// assert_eq!(page.title.as_deref(), Some("Test"));
    /// assert!(page.internal_links.contains("https://example.com/page"));
    /// ```
    fn parse(&self, url: &str, html: &str) -> Page {
        let mut page = Page::new(url);
        if html.is_empty() {
            return page;
        }

        let document = Html::parse_document(html);
        page.raw_markup = Some(html.to_string());
        page.title = extract_title(&document);

        for (kind, selector, attr) in MEDIA_SELECTORS {
            page.add_media(*kind, select_attr(&document, selector, attr));
        }

        match Url::parse(url) {
            Ok(page_url) => {
                let base_url = document_base(&document, &page_url);
                extract_links(&document, &base_url, url, &mut page);
            }
            Err(e) => tracing::debug!("Cannot resolve links of {}: {}", url, e),
        }

        page
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects one attribute from every element matching a selector
fn select_attr(document: &Html, selector: &str, attr: &str) -> HashSet<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return HashSet::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Returns the URL relative links resolve against
///
/// The first `<base href>` in the head wins, itself resolved against the
/// page URL. Without one, links resolve against the page URL.
fn document_base(document: &Html, page_url: &Url) -> Url {
    let Ok(selector) = Selector::parse("head base[href]") else {
        return page_url.clone();
    };

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .filter(|base| base.scheme() == "http" || base.scheme() == "https")
        .unwrap_or_else(|| page_url.clone())
}

/// Sorts the anchors of the document into internal and external links
///
/// Classification compares against the page URL, not the `<base href>`.
fn extract_links(document: &Html, base_url: &Url, page_url: &str, page: &mut Page) {
    for href in select_attr(document, "body a[href]", "href") {
        let Some(link) = resolve_link(&href, base_url) else {
            continue;
        };

        if is_external(&link, page_url) {
            page.external_links.insert(link);
        } else {
            page.internal_links.insert(link);
        }
    }
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - Unsafe characters in the href as written
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// Only the written href is checked. Resolution percent-encodes spaces,
/// quotes and non-ASCII characters, and that `%` must not reject the link.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    if href.is_empty() || contains_unsafe_chars(href) {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    let cleaned = clean_up_url(absolute_url.as_str());
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}
