use anyhow::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use std::fs;

// Fetches one listing page, saves the raw markup, and reports which of the
// field selectors match, for checking extraction against a live page.
#[tokio::main]
async fn main() -> Result<()> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.dba.dk/recommerce/forsale/item/9416406".to_string());

    let client = Client::builder().user_agent("Mozilla/5.0").build()?;

    println!("Fetching {}...", url);
    let response = client.get(&url).send().await?;
    println!("Status: {}", response.status());
    let html = response.text().await?;
    fs::write("listing_sample.html", &html)?;

    let document = Html::parse_document(&html);

    let selectors = vec![
        r#"h1[data-testid="object-title"]"#,
        r#"h1[class="break-words mb-24"]"#,
        "p.h2",
        r#"span[class="flex gap-8 border rounded-full py-8 px-16"] b"#,
        r#"section[aria-label="Mere information"]"#,
        "div.whitespace-pre-wrap",
        r#"section[data-testid="description"]"#,
        r#"span[data-testid="object-address"]"#,
        r#"section[data-testid="object-info"]"#,
    ];

    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            let count = document.select(&selector).count();
            if count > 0 {
                let first: String = document
                    .select(&selector)
                    .next()
                    .map(|element| element.text().collect())
                    .unwrap_or_default();
                println!(
                    "Selector '{}' matched {} elements, first text: {:.60}",
                    selector_str, count, first
                );
            } else {
                println!("Selector '{}' matched nothing", selector_str);
            }
        }
    }

    Ok(())
}
