use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use snaptrans_config::SettingsStore;
use snaptrans_core::AppState;
use snaptrans_io::HistoryLog;
use snaptrans_translator::TranslationService;
use snaptrans_types::AppEvent;
use tokio::sync::watch;

use crate::status::AppStatus;

pub mod settings_changed;
pub mod text_captured;
pub mod translation_finished;

use settings_changed::handle_settings_changed;
use text_captured::handle_text_captured;
use translation_finished::handle_translation_finished;

/// Everything the handlers touch
pub struct EventContext {
    pub state: Arc<AppState>,
    pub service: TranslationService,
    pub history: Option<HistoryLog>,
    pub store: SettingsStore,
    /// Loop-back into this event loop, used by translation tasks
    pub to_app: AsyncSender<AppEvent>,
    pub to_ui: AsyncSender<AppEvent>,
    /// Current hotkey string, read by the hotkey listener
    pub hotkey: watch::Sender<String>,
    pub status: AppStatus,
}

/// App's main loop
pub async fn event_loop(
    ctx: EventContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    tracing::debug!("Event loop started");
    loop {
        let event = ui_to_app_rx.recv().await?;

        if matches!(event, AppEvent::Shutdown) {
            tracing::debug!("Event loop stopping");
            return Ok(());
        }

        handle_events(&ctx, event).await?;
    }
}

async fn handle_events(ctx: &EventContext, event: AppEvent) -> anyhow::Result<()> {
    match event {
        AppEvent::TextCaptured { text, source } => {
            tracing::debug!(?source, "Text captured: {} chars", text.chars().count());
            handle_text_captured(ctx, text).await?;
        }
        AppEvent::TranslationFinished {
            request,
            generation,
            outcome,
        } => {
            handle_translation_finished(ctx, request, generation, outcome).await?;
        }
        AppEvent::StatusUpdate(status) => {
            ctx.to_ui.send(AppEvent::StatusUpdate(status)).await?;
        }
        AppEvent::SettingsChanged => {
            handle_settings_changed(ctx).await?;
        }
        AppEvent::ShowTranslation { .. } | AppEvent::Shutdown => {
            // UI-only event, ignore in backend
        }
    }

    Ok(())
}
