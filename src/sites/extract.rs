use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::models::Product;
use crate::price::PriceParser;
use crate::utils::error::AppError;

// Title, price and link fallbacks shared by every store; per-store markup
// only differs in how a product card is delimited.
const TITLE_SELECTORS: &[&str] = &[
    r#"[itemprop="name"]"#,
    "h1",
    "h2",
    "h3",
    ".title",
    ".product-name",
    ".poly-component__title",
    ".pod-subTitle",
    ".product-item__title",
];

const PRICE_SELECTORS: &[&str] = &[
    r#"[itemprop="price"]"#,
    r#"[data-testid="price-part"]"#,
    ".andes-money-amount__fraction",
    ".price",
    ".product-price",
    ".sales",
    ".money",
    ".price__current",
    ".pod-prices",
];

const LINK_SELECTORS: &[&str] = &[
    "a[href][title]",
    "a[href][aria-label]",
    r#"a[href*="/p/"]"#,
    r#"a[href*="/producto"]"#,
    "a[href]",
];

/// Extract normalized products from a listing page body.
///
/// Card selectors are tried in order, most specific first; cards missing a
/// title, price or link are skipped, and unparseable prices drop the card.
/// Results are deduplicated by product key and truncated to `max_items`.
/// Zero matching cards means the expected markup is gone, which is a parse
/// error rather than an empty listing.
pub fn extract_products(
    site: &str,
    base_url: &str,
    html: &str,
    card_selectors: &[&str],
    max_items: usize,
) -> Result<Vec<Product>, AppError> {
    let document = Html::parse_document(html);
    let parser = PriceParser::new();

    let mut products: Vec<Product> = Vec::new();
    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut cards_seen = 0usize;

    'selectors: for raw_selector in card_selectors {
        let selector = Selector::parse(raw_selector).map_err(|e| AppError::Parse {
            site: site.to_string(),
            message: format!("invalid card selector '{raw_selector}': {e:?}"),
        })?;

        for card in document.select(&selector) {
            cards_seen += 1;

            let Some(product) = extract_card(site, base_url, &parser, &card) else {
                continue;
            };
            if !seen_keys.insert(product.key.clone()) {
                continue;
            }

            products.push(product);
            if products.len() >= max_items {
                break 'selectors;
            }
        }
    }

    if cards_seen == 0 {
        return Err(AppError::Parse {
            site: site.to_string(),
            message: "no product cards matched the expected markup".to_string(),
        });
    }

    Ok(products)
}

fn extract_card(
    site: &str,
    base_url: &str,
    parser: &PriceParser,
    card: &ElementRef,
) -> Option<Product> {
    let title = first_text(card, TITLE_SELECTORS)?;
    let raw_price = first_text(card, PRICE_SELECTORS)?;
    let href = first_href(card, LINK_SELECTORS)?;

    let price = match parser.parse(&raw_price) {
        Some(price) if price > rust_decimal::Decimal::ZERO => price,
        _ => {
            debug!(site, title = %title, raw = %raw_price, "dropping card with unparseable price");
            return None;
        }
    };

    let url = resolve_url(base_url, &href);
    Some(Product::new(site, &title, price, &url))
}

/// First non-empty, whitespace-collapsed text among the selector fallbacks.
fn first_text(card: &ElementRef, selectors: &[&str]) -> Option<String> {
    for raw_selector in selectors {
        let Ok(selector) = Selector::parse(raw_selector) else {
            continue;
        };
        if let Some(node) = card.select(&selector).next() {
            let text = node
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn first_href(card: &ElementRef, selectors: &[&str]) -> Option<String> {
    for raw_selector in selectors {
        let Ok(selector) = Selector::parse(raw_selector) else {
            continue;
        };
        if let Some(href) = card
            .select(&selector)
            .next()
            .and_then(|node| node.value().attr("href"))
        {
            let href = href.trim();
            if !href.is_empty() {
                return Some(href.to_string());
            }
        }
    }
    None
}

fn resolve_url(base_url: &str, href: &str) -> String {
    Url::parse(base_url)
        .ok()
        .and_then(|base| base.join(href).ok())
        .map(|url| url.to_string())
        .unwrap_or_else(|| href.to_string())
}
