use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{AlertEvent, HistoryState, PriceRecord, Product};

/// How a freshly extracted product relates to its recorded baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceChange {
    /// First sighting. Recorded as baseline, never alerted.
    New,
    Unchanged,
    Dropped,
    Risen,
}

pub fn classify(previous: Option<&PriceRecord>, current: &Product) -> PriceChange {
    match previous {
        None => PriceChange::New,
        Some(prev) if current.price < prev.price => PriceChange::Dropped,
        Some(prev) if current.price > prev.price => PriceChange::Risen,
        Some(_) => PriceChange::Unchanged,
    }
}

/// Fractional decrease from the recorded baseline, `1 - current/previous`.
/// A zero or negative baseline has no meaningful ratio.
pub fn drop_ratio(previous: Decimal, current: Decimal) -> Option<Decimal> {
    if previous <= Decimal::ZERO {
        return None;
    }
    Some(Decimal::ONE - current / previous)
}

/// Compare this run's extraction against history and select the alerts
/// worth sending.
///
/// Only keys present in both sides can alert; first sightings become
/// baseline silently. At most `max_alerts` events come back, largest drop
/// first with ties broken by product key, so the cutoff is deterministic
/// and never starves the steepest drops.
pub fn detect_drops(
    products: &[Product],
    history: &HistoryState,
    threshold: Decimal,
    max_alerts: usize,
) -> Vec<AlertEvent> {
    let mut qualifying: Vec<AlertEvent> = products
        .iter()
        .filter_map(|product| {
            let previous = history.get(&product.key)?;
            let ratio = drop_ratio(previous.price, product.price)?;
            if ratio < threshold {
                return None;
            }
            Some(AlertEvent {
                key: product.key.clone(),
                name: product.name.clone(),
                url: product.url.clone(),
                previous_price: previous.price,
                current_price: product.price,
                drop_ratio: ratio,
            })
        })
        .collect();

    qualifying.sort_by(|a, b| {
        b.drop_ratio
            .cmp(&a.drop_ratio)
            .then_with(|| a.key.cmp(&b.key))
    });

    if qualifying.len() > max_alerts {
        debug!(
            qualifying = qualifying.len(),
            max_alerts, "alert cap reached, keeping largest drops"
        );
        qualifying.truncate(max_alerts);
    }

    qualifying
}

/// Fold this run's extraction into the previous snapshot. Extracted keys
/// overwrite their records; products that vanished from the listings keep
/// their last known price.
pub fn merge_history(history: &mut HistoryState, products: &[Product], seen_at: DateTime<Utc>) {
    for product in products {
        history.insert(
            product.key.clone(),
            PriceRecord::from_product(product, seen_at),
        );
    }
}
