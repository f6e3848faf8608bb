use snaptrans_core::{GenerationGuard, prepare_source_text};
use snaptrans_types::{AppEvent, TranslationRequest};

use crate::events::EventContext;
use crate::status::AppStatus;

pub async fn handle_text_captured(ctx: &EventContext, text: String) -> anyhow::Result<()> {
    let target_name = ctx.state.settings.read().await.last_language.clone();
    let target = ctx.state.languages.resolve(&target_name);

    let Some(request) = prepare_source_text(&text).and_then(|text| TranslationRequest::new(text, target))
    else {
        tracing::debug!("Captured text is blank, nothing to translate");
        ctx.to_ui
            .send(AppEvent::StatusUpdate("No text selected".to_string()))
            .await?;
        return Ok(());
    };

    let guard = ctx.state.generations.begin();
    let generation = guard.my_generation();
    ctx.status.translations.write().await.requested += 1;

    tracing::info!(
        request_id = %request.id(),
        generation,
        "Translating {} chars to {}",
        request.source_text().chars().count(),
        request.target().name
    );
    ctx.to_ui
        .send(AppEvent::StatusUpdate(format!("Translating to {}...", request.target().name)))
        .await?;

    let service = ctx.service.clone();
    let to_app = ctx.to_app.clone();
    let status = ctx.status.clone();
    tokio::spawn(async move {
        let pending = request.clone();
        tokio::select! {
            outcome = service.translate_outcome(&pending) => {
                if !guard.should_deliver() {
                    count_undelivered(&status, &guard).await;
                    return;
                }
                let event = AppEvent::TranslationFinished { request, generation, outcome };
                if let Err(e) = to_app.send(event).await {
                    tracing::error!("Failed to report finished translation: {}", e);
                }
            }
            _ = guard.token().cancelled() => count_undelivered(&status, &guard).await,
        }
    });

    Ok(())
}

/// Shutdown cancels without advancing the generation, a newer request advances it
async fn count_undelivered(status: &AppStatus, guard: &GenerationGuard) {
    let generation = guard.my_generation();
    let mut stats = status.translations.write().await;
    if guard.is_current() {
        tracing::debug!(generation, "Translation aborted");
        stats.aborted += 1;
    } else {
        tracing::debug!(generation, "Translation cancelled by a newer request");
        stats.superseded += 1;
    }
}
