//! Page metadata extraction.
//!
//! Each field is resolved independently, first non-empty source wins:
//!
//! | field       | sources                                                    |
//! |-------------|------------------------------------------------------------|
//! | title       | `<title>`, then the meta lookup for `title`                |
//! | description | `meta[name]`, `meta[property=og:*]`, `meta[property=twitter:*]` |
//! | image       | same as description                                        |

use scraper::{Html, Selector};

use super::types::LinkPreview;

/// Extract a [`LinkPreview`] from an HTML document.
///
/// Never fails: malformed markup is recovered by the HTML5 parser and any
/// field without a source is left empty.
pub fn extract(html: &str) -> LinkPreview {
    let document = Html::parse_document(html);

    let title = first_text(&document, "title")
        .or_else(|| meta_content(&document, "title"))
        .unwrap_or_default();

    LinkPreview {
        title,
        description: meta_content(&document, "description").unwrap_or_default(),
        image: meta_content(&document, "image").unwrap_or_default(),
    }
}

/// Look up a meta value by name, then Open Graph, then Twitter card property.
fn meta_content(document: &Html, key: &str) -> Option<String> {
    [
        format!("meta[name='{key}']"),
        format!("meta[property='og:{key}']"),
        format!("meta[property='twitter:{key}']"),
    ]
    .iter()
    .find_map(|css| first_attr(document, css, "content"))
}

/// Trimmed text of the first element matching `css`, if non-empty.
fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    let element = document.select(&selector).next()?;
    non_empty(element.text().collect::<String>())
}

/// Trimmed attribute of the first element matching `css`, if non-empty.
fn first_attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    let element = document.select(&selector).next()?;
    non_empty(element.value().attr(attr)?.to_string())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
