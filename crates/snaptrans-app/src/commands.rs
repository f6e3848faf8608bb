//! One-shot subcommands

use anyhow::{Context, bail};
use snaptrans_config::{Settings, SettingsStore};
use snaptrans_core::{AppState, LanguageCatalog, prepare_source_text};
use snaptrans_hotkey::parse_hotkey;
use snaptrans_io::HistoryLog;
use snaptrans_translator::TranslationService;
use snaptrans_types::{HistoryEntry, TranslationOutcome, TranslationRequest};

use crate::cli::{HistoryArgs, SettingsArgs, TranslateArgs};
use crate::ui::render_translation;

pub async fn translate(
    state: &AppState,
    service: &TranslationService,
    store: &SettingsStore,
    history: Option<&HistoryLog>,
    args: TranslateArgs,
) -> anyhow::Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => snaptrans_io::clipboard::read_text().context("Failed to read the clipboard")?,
    };

    let target = match args.to.as_deref() {
        Some(to) => state.languages.resolve(to),
        None => {
            let last = state.settings.read().await.last_language.clone();
            state.languages.resolve(&last)
        }
    };

    let Some(request) = prepare_source_text(&text).and_then(|text| TranslationRequest::new(text, target))
    else {
        bail!("Nothing to translate");
    };

    if args.to.is_some() {
        remember_language(state, store, &request.target().name).await?;
    }

    let outcome = service.translate_outcome(&request).await;
    print!("{}", render_translation(&request.target().name, &outcome));

    match outcome {
        TranslationOutcome::Translated(translation) => {
            if args.copy {
                snaptrans_io::clipboard::write_text(&translation.text)
                    .context("Failed to copy the translation")?;
            }
            if let Some(history) = history.filter(|_| !args.no_history) {
                history
                    .append(&HistoryEntry {
                        source_text: request.source_text().to_string(),
                        target_language: request.target().name.clone(),
                        translated_text: translation.text,
                    })
                    .with_context(|| format!("Failed to write {}", history.path().display()))?;
            }
            Ok(())
        }
        TranslationOutcome::Failed { .. } => bail!("Translation failed"),
    }
}

async fn remember_language(
    state: &AppState,
    store: &SettingsStore,
    language: &str,
) -> anyhow::Result<()> {
    let mut settings = state.settings.write().await;
    if settings.last_language == language {
        return Ok(());
    }

    settings.last_language = language.to_string();
    store.save(&settings)?;
    tracing::debug!("Saved {} as the default target", language);
    Ok(())
}

pub fn history(log: &HistoryLog, args: HistoryArgs) -> anyhow::Result<()> {
    if args.clear {
        log.clear()
            .with_context(|| format!("Failed to clear {}", log.path().display()))?;
        println!("History cleared.");
        return Ok(());
    }

    let content = log
        .read_raw()
        .with_context(|| format!("Failed to read {}", log.path().display()))?;

    if content.trim().is_empty() {
        println!("History is empty.");
    } else {
        print!("{content}");
    }
    Ok(())
}

pub fn settings(store: &SettingsStore, mut settings: Settings, args: SettingsArgs) -> anyhow::Result<()> {
    let mut changed = false;

    if let Some(language) = args.language {
        let language = language.trim();
        if language.is_empty() {
            bail!("Language must not be empty");
        }
        settings.last_language = LanguageCatalog::builtin().resolve(language).name;
        changed = true;
    }

    if let Some(hotkey) = args.hotkey {
        parse_hotkey(&hotkey).with_context(|| format!("Invalid hotkey '{hotkey}'"))?;
        settings.hotkey = hotkey.trim().to_lowercase();
        changed = true;
    }

    if changed {
        store.save(&settings)?;
        tracing::info!("Settings saved to {}", store.path().display());
    }

    println!("language: {}", settings.last_language);
    println!("hotkey:   {}", settings.hotkey);
    Ok(())
}

pub fn languages(state: &AppState) {
    for entry in state.languages.entries() {
        println!("{:<3} {}", entry.code, entry.name);
    }
}
