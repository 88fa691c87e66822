use async_trait::async_trait;

use crate::models::AlertEvent;
use crate::utils::error::AppError;

pub mod telegram;

pub use telegram::TelegramNotifier;

/// Alert dispatch endpoint.
///
/// Each send is independent: the caller isolates failures so one rejected
/// alert never blocks the rest of the run's events.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, event: &AlertEvent) -> Result<(), AppError>;
}
