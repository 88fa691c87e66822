use super::SiteAdapter;

const LISTING_URL: &str = "https://www.falabella.com.pe/falabella-pe/category/cat40712/Ofertas";
const CARD_SELECTORS: &[&str] = &["div.pod", "article", "li"];

/// Falabella Perú offers category.
pub struct Falabella {
    listing_url: String,
}

impl Falabella {
    pub fn new(listing_url: impl Into<String>) -> Self {
        Falabella {
            listing_url: listing_url.into(),
        }
    }
}

impl Default for Falabella {
    fn default() -> Self {
        Self::new(LISTING_URL)
    }
}

impl SiteAdapter for Falabella {
    fn name(&self) -> &str {
        "falabella"
    }

    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn card_selectors(&self) -> &[&str] {
        CARD_SELECTORS
    }
}
