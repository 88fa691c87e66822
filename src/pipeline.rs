use std::fmt;

use chrono::Utc;
use futures::future::join_all;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::detector::{self, PriceChange};
use crate::fetch::PageFetcher;
use crate::history::HistoryStore;
use crate::models::Product;
use crate::notify::Notifier;
use crate::sites::SiteAdapter;
use crate::utils::error::AppError;

/// One site that failed this run, with the reason it was skipped.
#[derive(Debug)]
pub struct SiteFailure {
    pub site: String,
    pub reason: String,
}

/// What one run did, for the end-of-run report.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub sites_ok: usize,
    pub site_failures: Vec<SiteFailure>,
    pub products_seen: usize,
    pub new_products: usize,
    pub drops: usize,
    pub rises: usize,
    pub alerts_detected: usize,
    pub alerts_sent: usize,
    pub alerts_failed: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sites ok {}/{}, products {} ({} new, {} dropped, {} risen), alerts {} detected / {} sent / {} failed",
            self.sites_ok,
            self.sites_ok + self.site_failures.len(),
            self.products_seen,
            self.new_products,
            self.drops,
            self.rises,
            self.alerts_detected,
            self.alerts_sent,
            self.alerts_failed,
        )
    }
}

/// Drives one run: adapters -> detector -> notifier -> history update.
///
/// Site and notification failures are contained here and reported in the
/// summary; only configuration and state I/O surface as errors. With no
/// notifier (dry run) detection still happens, nothing is dispatched.
pub struct Pipeline {
    sites: Vec<Box<dyn SiteAdapter>>,
    fetcher: PageFetcher,
    store: HistoryStore,
    notifier: Option<Box<dyn Notifier>>,
    threshold: Decimal,
    max_items_per_site: usize,
    max_alerts_per_run: usize,
}

impl Pipeline {
    pub fn new(
        sites: Vec<Box<dyn SiteAdapter>>,
        fetcher: PageFetcher,
        store: HistoryStore,
        notifier: Option<Box<dyn Notifier>>,
        config: &AppConfig,
    ) -> Self {
        Pipeline {
            sites,
            fetcher,
            store,
            notifier,
            threshold: config.drop_ratio_threshold(),
            max_items_per_site: config.max_items_per_site,
            max_alerts_per_run: config.max_alerts_per_run,
        }
    }

    /// Run one complete pass. History is persisted whatever happened to the
    /// individual sites, so the next run compares against everything that
    /// was actually observed.
    pub async fn run(&self) -> Result<RunSummary, AppError> {
        let mut summary = RunSummary::default();
        let history = self.store.load()?;

        let checks = self.sites.iter().map(|site| self.check_site(site.as_ref()));
        let results = join_all(checks).await;

        let mut extracted: Vec<Product> = Vec::new();
        for (site, result) in self.sites.iter().zip(results) {
            match result {
                Ok(products) => {
                    info!(site = site.name(), count = products.len(), "site checked");
                    summary.sites_ok += 1;
                    extracted.extend(products);
                }
                Err(err) => {
                    warn!(site = site.name(), error = %err, "site check failed");
                    summary.site_failures.push(SiteFailure {
                        site: site.name().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        summary.products_seen = extracted.len();

        for product in &extracted {
            match detector::classify(history.get(&product.key), product) {
                PriceChange::New => summary.new_products += 1,
                PriceChange::Dropped => summary.drops += 1,
                PriceChange::Risen => summary.rises += 1,
                PriceChange::Unchanged => {}
            }
        }

        let alerts = detector::detect_drops(
            &extracted,
            &history,
            self.threshold,
            self.max_alerts_per_run,
        );
        summary.alerts_detected = alerts.len();

        if let Some(notifier) = &self.notifier {
            for alert in &alerts {
                match notifier.send(alert).await {
                    Ok(()) => summary.alerts_sent += 1,
                    Err(err) => {
                        warn!(key = %alert.key, error = %err, "alert dispatch failed");
                        summary.alerts_failed += 1;
                    }
                }
            }
        }

        let mut merged = history;
        detector::merge_history(&mut merged, &extracted, Utc::now());
        self.store.save(&merged)?;

        Ok(summary)
    }

    async fn check_site(&self, site: &dyn SiteAdapter) -> Result<Vec<Product>, AppError> {
        let body = site.fetch(&self.fetcher).await?;
        site.parse(&body, self.max_items_per_site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            sites_ok: 3,
            site_failures: vec![SiteFailure {
                site: "hm".to_string(),
                reason: "timeout".to_string(),
            }],
            products_seen: 120,
            new_products: 5,
            drops: 7,
            rises: 2,
            alerts_detected: 2,
            alerts_sent: 2,
            alerts_failed: 0,
        };

        assert_eq!(
            summary.to_string(),
            "sites ok 3/4, products 120 (5 new, 7 dropped, 2 risen), alerts 2 detected / 2 sent / 0 failed"
        );
    }
}
