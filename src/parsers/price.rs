use once_cell::sync::Lazy;
use regex::Regex;

/// Amount followed by a Danish currency marker ("1.250 kr", "99kr.", "450,-").
static PRICE_WITH_CURRENCY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:[.\s]\d{3})*|\d{3,6})\s*(?:kr\.?|,-)")
        .expect("Invalid price regex")
});

/// Bare amount with optional dot/space thousands groups.
static AMOUNT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,3}(?:[.\s]\d{3})*|\d{3,6})").expect("Invalid amount regex"));

/// Parse an integer DKK amount out of a price string, dropping dot/space
/// thousands separators: `"1.250 kr"` -> 1250, `"99kr."` -> 99.
pub fn parse_price_dkk(text: &str) -> Option<u32> {
    let normalized = text.replace('\u{a0}', " ");
    let amount = AMOUNT_REGEX.find(&normalized)?;
    let digits: String = amount
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Raw-markup fallback for pages without a recognizable price element: the
/// first amount-plus-currency-marker anywhere in the page, as matched text.
pub fn find_price_text(html: &str) -> Option<String> {
    let normalized = html.replace('\u{a0}', " ");
    PRICE_WITH_CURRENCY_REGEX
        .find(&normalized)
        .map(|m| m.as_str().to_string())
}
