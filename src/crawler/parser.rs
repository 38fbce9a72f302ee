//! HTML link extraction
//!
//! Pulls the raw `href` values out of a page body. Resolution against the
//! page URL, normalization, and domain filtering all happen downstream in
//! the engine; this module only knows HTML.

use scraper::{Html, Selector};

/// Extracts the raw href targets of all `<a>` tags in a document
///
/// **Excluded here:**
/// - empty hrefs
/// - fragment-only hrefs (same-page anchors)
/// - `<a href="..." download>` links
///
/// Scheme filtering (javascript:, mailto:, tel:, data:) is left to URL
/// normalization, which rejects those schemes anyway.
///
/// Non-HTML input is not an error: `Html::parse_document` is lenient, so
/// content without anchors simply yields an empty list.
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                let href = href.trim();
                if href.is_empty() || href.starts_with('#') {
                    continue;
                }
                links.push(href.to_string());
            }
        }
    }

    links
}
