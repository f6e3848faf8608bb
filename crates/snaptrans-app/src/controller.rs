use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use snaptrans_config::SettingsStore;
use snaptrans_io::{HistoryLog, SelectionSource, SystemSelection};
use snaptrans_translator::TranslationService;
use snaptrans_types::AppEvent;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use snaptrans_core::AppState;

use crate::events::{EventContext, event_loop};
use crate::io::{ListenMode, watch_settings, watcher_io};
use crate::status::AppStatus;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

/// What the event loop needs besides the shared state
pub struct Services {
    pub service: TranslationService,
    pub history: Option<HistoryLog>,
    pub store: SettingsStore,
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    status: AppStatus,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            status: AppStatus::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(
        &self,
        services: Services,
        mode: ListenMode,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let (delta_time, settle) = {
            let config = self.state.config.read().await;
            (
                Duration::from_millis(config.delta_time),
                Duration::from_millis(config.capture_settle_ms),
            )
        };
        let hotkey = self.state.settings.read().await.hotkey.clone();
        let (hotkey_tx, hotkey_rx) = watch::channel(hotkey);

        let settings_path = services.store.path().to_path_buf();

        // Event loop
        let ctx = EventContext {
            state: self.state.clone(),
            service: services.service,
            history: services.history,
            store: services.store,
            to_app: self.channels.ui_to_app.0.clone(),
            to_ui: self.channels.app_to_ui.0.clone(),
            hotkey: hotkey_tx,
            status: self.status.clone(),
        };
        tasks.spawn(event_loop(ctx, self.channels.ui_to_app.1.clone()));

        // UI loop
        tasks.spawn(ui_loop(self.channels.app_to_ui.1.clone()));

        // Watcher IO
        let selection: Arc<dyn SelectionSource> = Arc::new(SystemSelection::new(settle));
        tasks.spawn(watcher_io(
            mode,
            selection,
            hotkey_rx,
            delta_time,
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        // Settings file
        tasks.spawn(watch_settings(
            settings_path,
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        tasks
    }

    /// Stop the watchers and let both loops drain out
    pub async fn shutdown(&self) {
        self.cancel_token.cancel();
        self.state.generations.cancel_all();

        let _ = self.channels.ui_to_app.0.try_send(AppEvent::Shutdown);
        let _ = self.channels.app_to_ui.0.try_send(AppEvent::Shutdown);

        let stats = self.status.snapshot().await;
        tracing::info!(
            requested = stats.requested,
            completed = stats.completed,
            failed = stats.failed,
            superseded = stats.superseded,
            aborted = stats.aborted,
            "Session finished"
        );
    }
}
