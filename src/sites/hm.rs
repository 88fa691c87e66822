use super::SiteAdapter;

const LISTING_URL: &str = "https://pe.hm.com/sale/view-all.html";
const CARD_SELECTORS: &[&str] = &["article.product-item", "li.product-item", "article", "li"];

/// H&M Perú sale listing.
pub struct Hm {
    listing_url: String,
}

impl Hm {
    pub fn new(listing_url: impl Into<String>) -> Self {
        Hm {
            listing_url: listing_url.into(),
        }
    }
}

impl Default for Hm {
    fn default() -> Self {
        Self::new(LISTING_URL)
    }
}

impl SiteAdapter for Hm {
    fn name(&self) -> &str {
        "hm"
    }

    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn card_selectors(&self) -> &[&str] {
        CARD_SELECTORS
    }
}
