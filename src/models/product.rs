use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One product extracted from a store's listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub key: String,
    pub site: String,
    pub name: String,
    pub price: Decimal,
    pub url: String,
}

impl Product {
    pub fn new(site: &str, name: &str, price: Decimal, url: &str) -> Self {
        Self {
            key: product_key(site, name, url),
            site: site.to_string(),
            name: name.to_string(),
            price,
            url: url.to_string(),
        }
    }
}

/// Stable identifier for a product across runs.
///
/// Derived from site, lowercased title and the URL with its query string
/// stripped, so the same physical item maps to the same key no matter how
/// the listing page is reordered or what tracking parameters it carries.
pub fn product_key(site: &str, name: &str, url: &str) -> String {
    let canonical_url = url.split('?').next().unwrap_or(url);
    let canonical = format!("{}|{}|{}", site, name.trim().to_lowercase(), canonical_url);
    let digest = Sha256::digest(canonical.as_bytes());
    hex::encode(digest)[..24].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_key_is_deterministic() {
        let a = product_key("falabella", "Zapatillas Runner", "https://x.pe/p/1");
        let b = product_key("falabella", "Zapatillas Runner", "https://x.pe/p/1");
        assert_eq!(a, b);
        assert_eq!(a.len(), 24);
    }

    #[test]
    fn test_key_ignores_query_string() {
        let clean = product_key("hm", "Polo básico", "https://pe.hm.com/p/9");
        let tracked = product_key("hm", "Polo básico", "https://pe.hm.com/p/9?utm_source=mail");
        assert_eq!(clean, tracked);
    }

    #[test]
    fn test_key_normalizes_title_case_and_whitespace() {
        let a = product_key("shopstar", "  Licuadora Pro  ", "https://s.pe/p/2");
        let b = product_key("shopstar", "licuadora pro", "https://s.pe/p/2");
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_title_different_site_differs() {
        let a = product_key("falabella", "Televisor 50", "https://x.pe/p/1");
        let b = product_key("mercadolibre", "Televisor 50", "https://x.pe/p/1");
        assert_ne!(a, b);
    }

    #[test]
    fn test_product_new_fills_key() {
        let product = Product::new(
            "mercadolibre",
            "Audífonos BT",
            Decimal::new(9990, 2),
            "https://ml.pe/p/3",
        );
        assert_eq!(product.key, product_key("mercadolibre", "Audífonos BT", "https://ml.pe/p/3"));
        assert_eq!(product.site, "mercadolibre");
    }
}
