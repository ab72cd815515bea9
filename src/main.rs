mod classifier;
mod config;
mod engine;
mod models;
mod storage;
mod types;

use std::io::{stderr, stdin, stdout};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::task::spawn_blocking;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::classifier::FraudPipeline;
use crate::config::{Settings, USAGE};
use crate::engine::{AsyncEngine, ReputationService};
use crate::storage::IndexedStore;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = match Settings::from_args(std::env::args().skip(1)) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("{error}");
            eprintln!("{USAGE}");
            eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
            exit(1);
        }
    };

    setup_logging(settings.log_level);

    let timer = Instant::now();

    let service = match load_service(&settings).await {
        Ok(service) => service,
        Err(error) => {
            error!("Startup failed, refusing to serve: {error:#}");
            exit(1);
        }
    };

    info!("Assets loaded in: {:?}", timer.elapsed());

    let engine = AsyncEngine::new(Arc::new(service));
    engine.run(stdin(), stdout().lock()).await?;

    Ok(())
}

/// Loads the transaction store and the model concurrently; both must succeed.
async fn load_service(settings: &Settings) -> Result<ReputationService<IndexedStore, FraudPipeline>> {
    let transactions_path = settings.transactions_path.clone();
    let preprocessor_path = settings.preprocessor_path.clone();
    let model_path = settings.model_path.clone();

    let store_handle = spawn_blocking(move || IndexedStore::from_path(transactions_path));
    let model_handle = spawn_blocking(move || FraudPipeline::load(preprocessor_path, model_path));

    let (store, model) = tokio::try_join!(store_handle, model_handle)?;

    let store = store.context("Could not load transaction data")?;
    let model = model.context("Could not load ML components")?;

    info!("Serving reputations for {} users ({} transactions)", store.user_count(), store.transaction_count());

    Ok(ReputationService::new(store, model))
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the result rows, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
