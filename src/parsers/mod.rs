pub mod listing;
pub mod price;

pub use listing::*;
pub use price::*;

use html_escape::decode_html_entities;
use scraper::{Html, Selector};

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Try an ordered list of CSS selectors against the document; the first
/// element that yields non-empty text wins.
pub fn first_selector_text(document: &Html, selectors: &[&str]) -> Option<String> {
    for raw in selectors {
        if let Ok(selector) = Selector::parse(raw) {
            if let Some(element) = document.select(&selector).next() {
                let text = clean_text(&element.text().collect::<String>());
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_text_collapses_whitespace_and_decodes_entities() {
        assert_eq!(clean_text("  Brugt &amp;\n  billig  "), "Brugt & billig");
    }

    #[test]
    fn later_selectors_are_tried_in_order() {
        let document = Html::parse_document("<p class=\"b\">second</p>");
        let text = first_selector_text(&document, &["p.a", "p.b"]);
        assert_eq!(text, Some("second".to_string()));
    }

    #[test]
    fn empty_elements_do_not_shadow_later_strategies() {
        let document = Html::parse_document("<p class=\"a\"></p><p class=\"b\">filled</p>");
        let text = first_selector_text(&document, &["p.a", "p.b"]);
        assert_eq!(text, Some("filled".to_string()));
    }
}
