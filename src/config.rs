use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;

/// Runtime configuration, environment-provided. All knobs have defaults
/// except the Telegram credentials, which are only required for live runs.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Minimum price drop to alert on, in percent.
    pub drop_threshold: f64,
    /// Cap on products parsed per site.
    pub max_items_per_site: usize,
    /// Cap on alerts dispatched per run.
    pub max_alerts_per_run: usize,
    /// HTTP timeout per request, in seconds.
    pub request_timeout: u64,
    /// Location of the persisted price history.
    pub state_path: PathBuf,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_api_base: String,
}

/// Credentials and endpoint for the Telegram notifier.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("drop_threshold", 50.0)?
            .set_default("max_items_per_site", 60)?
            .set_default("max_alerts_per_run", 20)?
            .set_default("request_timeout", 20)?
            .set_default("state_path", "state/prices.json")?
            .set_default("telegram_api_base", "https://api.telegram.org")?
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.drop_threshold) {
            return Err(ConfigError::Message(
                "DROP_THRESHOLD must be between 0 and 100 percent".into(),
            ));
        }

        if self.max_items_per_site == 0 {
            return Err(ConfigError::Message(
                "MAX_ITEMS_PER_SITE must be greater than 0".into(),
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::Message(
                "REQUEST_TIMEOUT must be greater than 0".into(),
            ));
        }

        if self.state_path.as_os_str().is_empty() {
            return Err(ConfigError::Message("STATE_PATH must not be empty".into()));
        }

        Ok(())
    }

    /// The percent threshold as a ratio, e.g. 50 -> 0.50.
    pub fn drop_ratio_threshold(&self) -> Decimal {
        Decimal::from_f64(self.drop_threshold).unwrap_or_default() / Decimal::from(100)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Telegram credentials for a live run. Missing or blank values abort
    /// before any site is contacted.
    pub fn telegram(&self) -> Result<TelegramConfig, ConfigError> {
        match (&self.telegram_bot_token, &self.telegram_chat_id) {
            (Some(token), Some(chat_id)) if !token.is_empty() && !chat_id.is_empty() => {
                Ok(TelegramConfig {
                    bot_token: token.clone(),
                    chat_id: chat_id.clone(),
                    api_base: self.telegram_api_base.clone(),
                })
            }
            _ => Err(ConfigError::Message(
                "TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set".into(),
            )),
        }
    }
}
