use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use oferta_watcher::config::AppConfig;
use oferta_watcher::fetch::PageFetcher;
use oferta_watcher::history::HistoryStore;
use oferta_watcher::notify::{Notifier, TelegramNotifier};
use oferta_watcher::pipeline::Pipeline;
use oferta_watcher::sites;

/// Price-drop watcher for Peruvian e-commerce deal listings.
///
/// One invocation is one run; an external scheduler provides the interval.
#[derive(Parser, Debug)]
#[command(name = "oferta-watcher", version, about)]
struct Args {
    /// Override the state file location.
    #[arg(long)]
    state_path: Option<PathBuf>,

    /// Detect drops without sending any notifications.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oferta_watcher=info".into()),
        )
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(path) = args.state_path {
        config.state_path = path;
    }

    // Credentials are checked before any site is contacted.
    let notifier: Option<Box<dyn Notifier>> = if args.dry_run {
        info!("dry run, alerts will not be dispatched");
        None
    } else {
        let telegram = config.telegram()?;
        Some(Box::new(TelegramNotifier::new(telegram, config.timeout())))
    };

    let fetcher = PageFetcher::new(config.timeout())?;
    let store = HistoryStore::new(&config.state_path);
    let pipeline = Pipeline::new(sites::default_sites(), fetcher, store, notifier, &config);

    let summary = pipeline.run().await?;
    for failure in &summary.site_failures {
        info!(site = %failure.site, reason = %failure.reason, "site skipped this run");
    }
    info!(%summary, "run finished");

    Ok(())
}
