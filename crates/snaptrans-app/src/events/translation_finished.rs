use std::time::SystemTime;

use snaptrans_types::{AppEvent, HistoryEntry, TranslationOutcome, TranslationRequest};

use crate::events::EventContext;

pub async fn handle_translation_finished(
    ctx: &EventContext,
    request: TranslationRequest,
    generation: u64,
    outcome: TranslationOutcome,
) -> anyhow::Result<()> {
    if !ctx.state.generations.is_current(generation) {
        tracing::debug!(
            request_id = %request.id(),
            generation,
            current = ctx.state.generations.current(),
            "Dropping stale translation"
        );
        ctx.status.translations.write().await.superseded += 1;
        return Ok(());
    }

    {
        let mut stats = ctx.status.translations.write().await;
        if outcome.is_success() {
            stats.completed += 1;
        } else {
            stats.failed += 1;
        }
        stats.last_translation_time = Some(SystemTime::now());
    }

    if let (Some(history), TranslationOutcome::Translated(translation)) = (&ctx.history, &outcome) {
        let entry = HistoryEntry {
            source_text: request.source_text().to_string(),
            target_language: request.target().name.clone(),
            translated_text: translation.text.clone(),
        };
        if let Err(e) = history.append(&entry) {
            tracing::error!("Failed to write history to {}: {}", history.path().display(), e);
        }
    }

    ctx.to_ui
        .send(AppEvent::ShowTranslation {
            source_text: request.source_text().to_string(),
            target_language: request.target().name.clone(),
            outcome,
        })
        .await?;

    Ok(())
}
