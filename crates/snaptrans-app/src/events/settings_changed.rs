use snaptrans_types::AppEvent;

use crate::events::EventContext;

/// Pick up settings written by another process
pub async fn handle_settings_changed(ctx: &EventContext) -> anyhow::Result<()> {
    let settings = match ctx.store.load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Ignoring settings change: {}", e);
            return Ok(());
        }
    };

    let previous = {
        let mut current = ctx.state.settings.write().await;
        std::mem::replace(&mut *current, settings.clone())
    };

    if previous.hotkey != settings.hotkey {
        ctx.hotkey.send_replace(settings.hotkey.clone());
    }

    if previous.last_language != settings.last_language {
        tracing::info!("Target language is now {}", settings.last_language);
        ctx.to_ui
            .send(AppEvent::StatusUpdate(format!(
                "Translating to {} from now on",
                settings.last_language
            )))
            .await?;
    }

    Ok(())
}
