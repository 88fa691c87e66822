use super::SiteAdapter;

const LISTING_URL: &str = "https://www.shopstar.pe/collections/ofertas";
const CARD_SELECTORS: &[&str] = &["div.grid-product", "li.grid__item", "article", "li"];

/// Shopstar offers collection.
pub struct Shopstar {
    listing_url: String,
}

impl Shopstar {
    pub fn new(listing_url: impl Into<String>) -> Self {
        Shopstar {
            listing_url: listing_url.into(),
        }
    }
}

impl Default for Shopstar {
    fn default() -> Self {
        Self::new(LISTING_URL)
    }
}

impl SiteAdapter for Shopstar {
    fn name(&self) -> &str {
        "shopstar"
    }

    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn card_selectors(&self) -> &[&str] {
        CARD_SELECTORS
    }
}
