use rust_decimal::Decimal;
use serde::Serialize;

/// A qualifying price drop, ready for dispatch.
///
/// Invariant: `drop_ratio = 1 - current_price / previous_price`, and it is
/// at least the configured threshold for every event the detector emits.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlertEvent {
    pub key: String,
    pub name: String,
    pub url: String,
    pub previous_price: Decimal,
    pub current_price: Decimal,
    pub drop_ratio: Decimal,
}

impl AlertEvent {
    /// Ratio expressed as a percentage, for message formatting.
    pub fn drop_percent(&self) -> Decimal {
        self.drop_ratio * Decimal::from(100)
    }
}
