use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::models::{
    Listing, PostId, CONDITION_NOT_SPECIFIED, DESCRIPTION_FALLBACK, POST_ID_UNKNOWN,
};
use crate::parsers::{clean_text, find_price_text, first_selector_text, parse_price_dkk};

static ITEM_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/item/(\d+)").expect("Invalid item id regex"));

// Ordered extraction strategies per field; first selector that yields text wins.
const TITLE_SELECTORS: &[&str] = &[
    r#"h1[data-testid="object-title"]"#,
    r#"h1[class="break-words mb-24"]"#,
];

const PRICE_SELECTORS: &[&str] = &["p.h2"];

const CONDITION_SELECTORS: &[&str] = &[
    r#"span[class="flex gap-8 border rounded-full py-8 px-16"] b"#,
    r#"section[aria-label="Mere information"] b"#,
    r#"section[aria-label="Mere information"] p"#,
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    "div.whitespace-pre-wrap",
    r#"section[data-testid="description"]"#,
];

const LOCATION_SELECTORS: &[&str] = &[r#"span[data-testid="object-address"]"#];

/// Extract one listing record from a fetched page. Missing fields degrade to
/// placeholders, never to an error.
pub fn parse_listing(html: &str, url: &str) -> Listing {
    let document = Html::parse_document(html);

    // A price element that exists but holds no parseable amount still
    // suppresses the raw-markup fallback, so failures stay inspectable.
    let price_text = first_selector_text(&document, PRICE_SELECTORS)
        .or_else(|| find_price_text(html));
    let price_dkk = price_text.as_deref().and_then(parse_price_dkk);

    let (post_id, date) = extract_object_info(&document, url);

    Listing {
        post_id,
        url: url.to_string(),
        title: first_selector_text(&document, TITLE_SELECTORS).unwrap_or_default(),
        price_dkk,
        desc: extract_description(&document)
            .unwrap_or_else(|| DESCRIPTION_FALLBACK.to_string()),
        location: first_selector_text(&document, LOCATION_SELECTORS).unwrap_or_default(),
        date,
        condition_text: first_selector_text(&document, CONDITION_SELECTORS)
            .unwrap_or_else(|| CONDITION_NOT_SPECIFIED.to_string()),
    }
}

/// Paragraphs of the first matching description container joined with
/// newlines; the container's own text when it has no paragraphs.
fn extract_description(document: &Html) -> Option<String> {
    for raw in DESCRIPTION_SELECTORS {
        let selector = match Selector::parse(raw) {
            Ok(selector) => selector,
            Err(_) => continue,
        };
        if let Some(container) = document.select(&selector).next() {
            if let Ok(p_selector) = Selector::parse("p") {
                let paragraphs: Vec<String> = container
                    .select(&p_selector)
                    .map(|p| clean_text(&p.text().collect::<String>()))
                    .filter(|text| !text.is_empty())
                    .collect();
                if !paragraphs.is_empty() {
                    return Some(paragraphs.join("\n"));
                }
            }

            let text = clean_text(&container.text().collect::<String>());
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Post id and edit date from the "object info" section: the id is the first
/// purely-numeric paragraph, the date the text after the "Sidst redigeret"
/// marker. The id falls back to the numeric URL suffix, then to "unknown".
fn extract_object_info(document: &Html, url: &str) -> (PostId, String) {
    let mut post_id = None;
    let mut date = String::new();

    if let Ok(section_selector) = Selector::parse(r#"section[data-testid="object-info"]"#) {
        if let Some(section) = document.select(&section_selector).next() {
            if let Ok(p_selector) = Selector::parse("p") {
                let texts: Vec<String> = section
                    .select(&p_selector)
                    .map(|p| clean_text(&p.text().collect::<String>()))
                    .collect();

                post_id = texts
                    .iter()
                    .find(|text| !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()))
                    .cloned();

                if let Some(edited) = texts.iter().find(|text| text.contains("redigeret")) {
                    date = edited.replace("Sidst redigeret", "").trim().to_string();
                }
            }
        }
    }

    let post_id = post_id
        .or_else(|| {
            ITEM_ID_REGEX
                .captures(url)
                .map(|captures| captures[1].to_string())
        })
        .unwrap_or_else(|| POST_ID_UNKNOWN.to_string());

    (PostId(post_id), date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"<html><body>
        <h1 data-testid="object-title">Brompton foldecykel</h1>
        <p class="h2">1.250 kr</p>
        <span class="flex gap-8 border rounded-full py-8 px-16"><b>Brugt - men i god stand</b></span>
        <div class="whitespace-pre-wrap"><p>Fin cykel.</p><p>Nyt baghjul.</p></div>
        <span data-testid="object-address">2200 K&#248;benhavn N</span>
        <section data-testid="object-info">
            <p>Sidst redigeret 12. maj 2025</p>
            <p>9416406</p>
        </section>
    </body></html>"#;

    #[test]
    fn extracts_every_field_from_fixture_page() {
        let listing = parse_listing(FIXTURE, "https://www.dba.dk/recommerce/forsale/item/9416406");

        assert_eq!(listing.post_id, PostId("9416406".to_string()));
        assert_eq!(listing.url, "https://www.dba.dk/recommerce/forsale/item/9416406");
        assert_eq!(listing.title, "Brompton foldecykel");
        assert_eq!(listing.price_dkk, Some(1250));
        assert_eq!(listing.desc, "Fin cykel.\nNyt baghjul.");
        assert_eq!(listing.location, "2200 København N");
        assert_eq!(listing.date, "12. maj 2025");
        assert_eq!(listing.condition_text, "Brugt - men i god stand");
    }

    #[test]
    fn title_falls_back_to_class_selector() {
        let html = r#"<h1 class="break-words mb-24">Sofabord</h1>"#;
        let listing = parse_listing(html, "https://www.dba.dk/recommerce/forsale/item/1");
        assert_eq!(listing.title, "Sofabord");
    }

    #[test]
    fn missing_condition_badge_yields_placeholder() {
        let html = "<html><body><h1 data-testid=\"object-title\">Stol</h1></body></html>";
        let listing = parse_listing(html, "https://www.dba.dk/recommerce/forsale/item/2");
        assert_eq!(listing.condition_text, CONDITION_NOT_SPECIFIED);
    }

    #[test]
    fn condition_falls_back_to_info_section() {
        let html = r#"<section aria-label="Mere information"><b>Helt ny</b></section>"#;
        let listing = parse_listing(html, "https://www.dba.dk/recommerce/forsale/item/3");
        assert_eq!(listing.condition_text, "Helt ny");
    }

    #[test]
    fn missing_description_yields_fallback_literal() {
        let html = "<html><body><p class=\"h2\">200 kr</p></body></html>";
        let listing = parse_listing(html, "https://www.dba.dk/recommerce/forsale/item/4");
        assert_eq!(listing.desc, DESCRIPTION_FALLBACK);
    }

    #[test]
    fn description_without_paragraphs_uses_container_text() {
        let html = r#"<section data-testid="description">Bare tekst uden afsnit</section>"#;
        let listing = parse_listing(html, "https://www.dba.dk/recommerce/forsale/item/5");
        assert_eq!(listing.desc, "Bare tekst uden afsnit");
    }

    #[test]
    fn price_regex_fallback_scans_raw_markup() {
        let html = "<html><body><div>Fin lampe, kun 1.250 kr</div></body></html>";
        let listing = parse_listing(html, "https://www.dba.dk/recommerce/forsale/item/6");
        assert_eq!(listing.price_dkk, Some(1250));
    }

    #[test]
    fn unparseable_price_element_leaves_price_empty() {
        let html = "<html><body><p class=\"h2\">Kontakt mig</p></body></html>";
        let listing = parse_listing(html, "https://www.dba.dk/recommerce/forsale/item/7");
        assert_eq!(listing.price_dkk, None);
    }

    #[test]
    fn post_id_falls_back_to_url_suffix() {
        let html = "<html><body></body></html>";
        let listing = parse_listing(html, "https://www.dba.dk/recommerce/forsale/item/14769358");
        assert_eq!(listing.post_id, PostId("14769358".to_string()));
    }

    #[test]
    fn post_id_without_any_source_is_unknown() {
        let html = "<html><body></body></html>";
        let listing = parse_listing(html, "https://www.dba.dk/andet/side");
        assert_eq!(listing.post_id, PostId(POST_ID_UNKNOWN.to_string()));
        assert_eq!(listing.date, "");
    }

    #[test]
    fn object_info_id_wins_over_url_suffix() {
        let html = r#"<section data-testid="object-info"><p>Til salg</p><p>555</p></section>"#;
        let listing = parse_listing(html, "https://www.dba.dk/recommerce/forsale/item/999");
        assert_eq!(listing.post_id, PostId("555".to_string()));
    }
}
