use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use kanal::AsyncSender;
use snaptrans_hotkey::HotkeyManager;
use snaptrans_io::{CaptureError, SelectionSource};
use snaptrans_types::{AppEvent, TextSource};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

const SETTINGS_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Where `listen` takes its text from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenMode {
    Hotkey,
    Clipboard,
}

pub async fn watcher_io(
    mode: ListenMode,
    selection: Arc<dyn SelectionSource>,
    hotkey_rx: watch::Receiver<String>,
    delta_time: Duration,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match mode {
        ListenMode::Hotkey => {
            let cancel_clone = cancel.clone();
            let mut listener = tokio::task::spawn_blocking(move || {
                hotkey_listener(selection, hotkey_rx, delta_time, cancel_clone, event_tx)
            });

            tokio::select! {
                result = &mut listener => result??,
                _ = cancel.cancelled() => listener.await??,
            }
            tracing::info!("Hotkey listener stopped");
        }
        ListenMode::Clipboard => {
            tracing::info!("Starting clipboard watcher");

            let tx = event_tx.clone();
            tokio::select! {
                result = snaptrans_io::clipboard::watch_clipboard(move |text| {
                    send_from_sync(&tx, AppEvent::TextCaptured {
                        text,
                        source: TextSource::Clipboard,
                    });
                }) => {
                    if let Err(e) = result {
                        tracing::error!("Clipboard watcher error: {}", e);
                    }
                }
                _ = cancel.cancelled() => {
                    tracing::info!("Clipboard watcher stopping");
                }
            }
        }
    }

    Ok(())
}

/// Runs on a blocking thread: polls the hotkey and copies the selection on each press
fn hotkey_listener(
    selection: Arc<dyn SelectionSource>,
    mut hotkey_rx: watch::Receiver<String>,
    delta_time: Duration,
    cancel: CancellationToken,
    tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let spec = hotkey_rx.borrow_and_update().clone();
    let mut hotkey_manager = HotkeyManager::new(&spec)?;

    loop {
        if cancel.is_cancelled() {
            break;
        }

        if hotkey_rx.has_changed().unwrap_or(false) {
            let spec = hotkey_rx.borrow_and_update().clone();
            if spec != hotkey_manager.spec()
                && let Err(e) = hotkey_manager.rebind(&spec)
            {
                tracing::error!("Keeping {}: {e:#}", hotkey_manager.spec());
            }
        }

        if hotkey_manager.poll() {
            tracing::info!("Hotkey pressed");

            let event = match selection.capture() {
                Ok(text) => AppEvent::TextCaptured {
                    text,
                    source: TextSource::Hotkey,
                },
                Err(CaptureError::NothingSelected) => {
                    AppEvent::StatusUpdate("No text selected".to_string())
                }
                Err(e) => {
                    tracing::error!("Selection capture failed: {}", e);
                    AppEvent::StatusUpdate(e.to_string())
                }
            };
            send_from_sync(&tx, event);
        }

        std::thread::sleep(delta_time);
    }

    Ok(())
}

/// Hand an event to the app from a callback that cannot await
fn send_from_sync(tx: &AsyncSender<AppEvent>, event: AppEvent) {
    let tx = tx.clone();
    tokio::spawn(async move {
        if let Err(e) = tx.send(event).await {
            tracing::error!("Failed to send event to app: {}", e);
        }
    });
}

/// Emit `SettingsChanged` whenever the settings file is rewritten, e.g. by
/// `snaptrans settings` from another terminal
pub async fn watch_settings(
    path: PathBuf,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut last_modified = modified_time(&path).await;
    let mut interval = tokio::time::interval(SETTINGS_POLL_INTERVAL);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = cancel.cancelled() => return Ok(()),
        }

        let modified = modified_time(&path).await;
        if modified != last_modified {
            last_modified = modified;
            tracing::debug!("Settings file changed on disk");
            event_tx.send(AppEvent::SettingsChanged).await?;
        }
    }
}

async fn modified_time(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path)
        .await
        .and_then(|meta| meta.modified())
        .ok()
}
