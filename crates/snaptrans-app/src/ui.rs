use std::io::Write;

use kanal::AsyncReceiver;
use snaptrans_types::{AppEvent, TranslationOutcome};

/// Prints what the app sends for display, one block per translation
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    loop {
        let Ok(event) = app_to_ui_rx.recv().await else {
            tracing::debug!("UI channel closed");
            return Ok(());
        };

        let mut stdout = std::io::stdout().lock();
        match event {
            AppEvent::ShowTranslation {
                source_text,
                target_language,
                outcome,
            } => {
                tracing::debug!("Showing translation of {} chars", source_text.chars().count());
                write!(stdout, "{}", render_translation(&target_language, &outcome))?;
            }
            AppEvent::StatusUpdate(status) => {
                writeln!(stdout, "· {status}")?;
            }
            AppEvent::Shutdown => return Ok(()),
            _ => {}
        }
        stdout.flush()?;
    }
}

pub fn render_translation(target_language: &str, outcome: &TranslationOutcome) -> String {
    match outcome {
        TranslationOutcome::Translated(translation) => {
            let from = translation.source_language.as_deref().unwrap_or("auto");
            format!("[{from} → {target_language}]\n{}\n\n", translation.text)
        }
        TranslationOutcome::Failed { message } => format!("{message}\n\n"),
    }
}

#[cfg(test)]
mod tests {
    use snaptrans_types::Translation;

    use super::*;

    #[test]
    fn renders_success_and_failure() {
        let ok = TranslationOutcome::Translated(Translation {
            text: "Привет".to_string(),
            source_language: Some("English".to_string()),
            provider: "chat".to_string(),
        });
        assert_eq!(render_translation("Russian", &ok), "[English → Russian]\nПривет\n\n");

        let failed = TranslationOutcome::Failed {
            message: "[Error: 401]\nbad key".to_string(),
        };
        assert_eq!(render_translation("Russian", &failed), "[Error: 401]\nbad key\n\n");
    }
}
