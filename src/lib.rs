pub mod cli;
pub mod core;
pub mod fetch;
pub mod history;
pub mod providers;
pub mod store;

use crate::core::config::{AppConfig, DEFAULT_BASE_URL};
use crate::history::HistoryStore;
use crate::providers::frankfurter::FrankfurterProvider;
use crate::store::disk::FjallStorage;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Convert { amount: f64, from: String, to: String },
    Currencies,
    History,
    ClearHistory { assume_yes: bool },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("cambio starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let base_url = config
        .provider
        .as_ref()
        .map_or(DEFAULT_BASE_URL, |p| &p.base_url);
    let timeout = config
        .timeout_ms
        .map_or(fetch::DEFAULT_TIMEOUT, Duration::from_millis);
    let provider = FrankfurterProvider::new(base_url, timeout);

    let storage = FjallStorage::open(&config.default_data_path()?)?;
    let history = HistoryStore::new(Arc::new(storage));

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&provider, &history, amount, &from, &to).await
        }
        AppCommand::Currencies => cli::currencies::run(&provider).await,
        AppCommand::History => cli::history::show(&history),
        AppCommand::ClearHistory { assume_yes } => cli::history::clear(&history, assume_yes),
    }
}
