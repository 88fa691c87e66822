use super::SiteAdapter;

const LISTING_URL: &str = "https://www.mercadolibre.com.pe/ofertas";
const CARD_SELECTORS: &[&str] = &["li.ui-search-layout__item", "div.poly-card", "article"];

/// MercadoLibre Perú deals listing.
pub struct MercadoLibre {
    listing_url: String,
}

impl MercadoLibre {
    pub fn new(listing_url: impl Into<String>) -> Self {
        MercadoLibre {
            listing_url: listing_url.into(),
        }
    }
}

impl Default for MercadoLibre {
    fn default() -> Self {
        Self::new(LISTING_URL)
    }
}

impl SiteAdapter for MercadoLibre {
    fn name(&self) -> &str {
        "mercadolibre"
    }

    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn card_selectors(&self) -> &[&str] {
        CARD_SELECTORS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_parses_search_layout_cards() {
        let html = r#"
            <html><body><ol>
              <li class="ui-search-layout__item">
                <div class="poly-card">
                  <h2 class="poly-component__title">Audífonos Bluetooth</h2>
                  <span class="andes-money-amount__fraction">149</span>
                  <a href="/p/MPE123?searchVariation=1" title="Audífonos Bluetooth">ver</a>
                </div>
              </li>
            </ol></body></html>
        "#;

        let site = MercadoLibre::default();
        let products = site.parse(html, 60).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].site, "mercadolibre");
        assert_eq!(products[0].name, "Audífonos Bluetooth");
        assert_eq!(products[0].price, Decimal::from(149));
        assert_eq!(
            products[0].url,
            "https://www.mercadolibre.com.pe/p/MPE123?searchVariation=1"
        );
    }
}
