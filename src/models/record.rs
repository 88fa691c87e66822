use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::Product;

/// Last-seen snapshot for one tracked product. The product key lives in the
/// surrounding map, so this serializes to exactly the persisted shape:
/// `{name, price, url, lastSeenAt}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub name: String,
    pub price: Decimal,
    pub url: String,
    pub last_seen_at: DateTime<Utc>,
}

/// Full snapshot of the tracked universe, keyed by product key. Ordered so
/// the state file stays diff-stable between runs.
pub type HistoryState = BTreeMap<String, PriceRecord>;

impl PriceRecord {
    pub fn from_product(product: &Product, seen_at: DateTime<Utc>) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            url: product.url.clone(),
            last_seen_at: seen_at,
        }
    }
}
