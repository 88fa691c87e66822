use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::Notifier;
use crate::config::TelegramConfig;
use crate::models::AlertEvent;
use crate::utils::error::AppError;

/// Sends one Bot API `sendMessage` call per alert.
pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig, timeout: Duration) -> Self {
        TelegramNotifier {
            client: Client::new(),
            config,
            timeout,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        )
    }

    fn format_message(event: &AlertEvent) -> String {
        format!(
            "🔥 DESCUENTO FUERTE ({:.1}%)\n\
             Producto: {}\n\
             Antes: S/ {:.2}\n\
             Ahora: S/ {:.2}\n\
             Link: {}",
            event.drop_percent(),
            event.name,
            event.previous_price,
            event.current_price,
            event.url
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, event: &AlertEvent) -> Result<(), AppError> {
        let payload = json!({
            "chat_id": self.config.chat_id,
            "text": Self::format_message(event),
            "disable_web_page_preview": true,
        });

        // The endpoint embeds the bot token; error text must never carry it,
        // so errors are reduced to status / transport kind here.
        let response = self
            .client
            .post(self.endpoint())
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Notify(format!("telegram request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Notify(format!("telegram returned {status}")));
        }

        debug!(key = %event.key, "alert dispatched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_event() -> AlertEvent {
        AlertEvent {
            key: "abc123".to_string(),
            name: "Televisor 50\"".to_string(),
            url: "https://tienda.pe/p/tv".to_string(),
            previous_price: Decimal::new(10000, 2),
            current_price: Decimal::new(4500, 2),
            drop_ratio: Decimal::new(55, 2),
        }
    }

    #[test]
    fn test_message_includes_all_required_fields() {
        let text = TelegramNotifier::format_message(&sample_event());

        assert!(text.contains("55.0%"));
        assert!(text.contains("Televisor 50\""));
        assert!(text.contains("Antes: S/ 100.00"));
        assert!(text.contains("Ahora: S/ 45.00"));
        assert!(text.contains("https://tienda.pe/p/tv"));
    }

    #[test]
    fn test_endpoint_joins_api_base() {
        let notifier = TelegramNotifier::new(
            TelegramConfig {
                bot_token: "123:abc".to_string(),
                chat_id: "42".to_string(),
                api_base: "https://api.telegram.org/".to_string(),
            },
            Duration::from_secs(5),
        );

        assert_eq!(
            notifier.endpoint(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }
}
