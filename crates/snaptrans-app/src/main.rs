use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use snaptrans_config::{Config, SettingsStore};
use snaptrans_core::AppState;
use snaptrans_io::HistoryLog;
use snaptrans_translator::TranslationService;
use tokio::signal;

mod cli;
mod commands;
mod controller;
mod events;
mod io;
mod logging;
mod profile;
mod status;
mod ui;


use self::cli::{Cli, Command};
use self::controller::{AppController, Services};
use self::profile::DataPaths;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine, real environment variables still apply
    let _ = dotenvy::dotenv();
    logging::init();

    let cli = Cli::parse();

    let config = Config::new();
    let paths = DataPaths::resolve(&config)?;
    let store = SettingsStore::new(paths.settings_file());
    let settings = store.load().context("Failed to load settings")?;

    let history = config
        .history
        .enabled
        .then(|| HistoryLog::new(paths.history_file()));

    tracing::debug!(
        "Data directory: {}, history: {}",
        paths.root().display(),
        history.is_some()
    );

    match cli.command {
        Command::Translate(args) => {
            let service = TranslationService::from_config(&config.translator)?;
            let state = Arc::new(AppState::new(config, settings));
            commands::translate(&state, &service, &store, history.as_ref(), args).await
        }
        Command::Listen(args) => {
            let service = TranslationService::from_config(&config.translator)?;
            let state = Arc::new(AppState::new(config, settings));
            listen(state, Services { service, history, store }, args).await
        }
        Command::History(args) => {
            let log = HistoryLog::new(paths.history_file());
            commands::history(&log, args)
        }
        Command::Settings(args) => commands::settings(&store, settings, args),
        Command::Languages => {
            commands::languages(&AppState::new(config, settings));
            Ok(())
        }
    }
}

async fn listen(
    state: Arc<AppState>,
    services: Services,
    args: cli::ListenArgs,
) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(services, args.mode()).await;

    tracing::info!("SnapTrans listening, press Ctrl+C to quit");

    tokio::select! {
        result = signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl+C")?;
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("A task exited early"),
                Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown().await;
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::debug!("Task ended with error during shutdown: {e:#}");
        }
    }

    Ok(())
}
