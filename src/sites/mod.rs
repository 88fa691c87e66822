use async_trait::async_trait;

use crate::fetch::PageFetcher;
use crate::models::Product;
use crate::utils::error::AppError;

pub mod extract;
pub mod falabella;
pub mod hm;
pub mod mercadolibre;
pub mod shopstar;

pub use falabella::Falabella;
pub use hm::Hm;
pub use mercadolibre::MercadoLibre;
pub use shopstar::Shopstar;

/// Per-store fetch + parse unit.
///
/// Implementations differ only in store identity, listing URL and the
/// selectors delimiting one product card in that store's markup; fetching
/// and extraction are shared. Adding a store means adding one file with
/// those three facts.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Short store identifier; also the site half of every product key.
    fn name(&self) -> &str;

    /// Listing page this adapter watches.
    fn listing_url(&self) -> &str;

    /// Selector fallbacks for one product card, most specific first.
    fn card_selectors(&self) -> &[&str];

    async fn fetch(&self, fetcher: &PageFetcher) -> Result<String, AppError> {
        fetcher.fetch(self.name(), self.listing_url()).await
    }

    fn parse(&self, html: &str, max_items: usize) -> Result<Vec<Product>, AppError> {
        extract::extract_products(
            self.name(),
            self.listing_url(),
            html,
            self.card_selectors(),
            max_items,
        )
    }
}

/// The stores watched by default.
pub fn default_sites() -> Vec<Box<dyn SiteAdapter>> {
    vec![
        Box::new(MercadoLibre::default()),
        Box::new(Falabella::default()),
        Box::new(Hm::default()),
        Box::new(Shopstar::default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sites_have_distinct_names() {
        let sites = default_sites();
        let names: Vec<_> = sites.iter().map(|s| s.name()).collect();

        assert_eq!(names, ["mercadolibre", "falabella", "hm", "shopstar"]);
    }

    #[test]
    fn test_default_sites_watch_production_listings() {
        for site in default_sites() {
            assert!(site.listing_url().starts_with("https://"), "{}", site.name());
            assert!(!site.card_selectors().is_empty(), "{}", site.name());
        }
    }
}
