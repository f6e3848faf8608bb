use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum AppEvent {
    TextCaptured {
        text: String,
        source: TextSource,
    },
    /// A translation task is done; `generation` decides whether it is still wanted
    TranslationFinished {
        request: TranslationRequest,
        generation: u64,
        outcome: TranslationOutcome,
    },
    ShowTranslation {
        source_text: String,
        target_language: String,
        outcome: TranslationOutcome,
    },
    StatusUpdate(String),
    /// The settings file was modified outside the running process
    SettingsChanged,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Selection copied when the hotkey fired
    Hotkey,
    /// New clipboard content picked up by the watcher
    Clipboard,
}

/// Translation destination: display name plus an optional ISO 639-1-like code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTarget {
    pub name: String,
    pub code: Option<String>,
}

impl LanguageTarget {
    pub fn new(name: impl Into<String>, code: Option<&str>) -> Self {
        Self {
            name: name.into(),
            code: code.map(str::to_string),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
        }
    }
}

/// A validated translation request.
///
/// The source text is guaranteed to contain something other than whitespace.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    id: Uuid,
    source_text: String,
    target: LanguageTarget,
}

impl TranslationRequest {
    /// Returns `None` for empty or whitespace-only text
    pub fn new(source_text: impl Into<String>, target: LanguageTarget) -> Option<Self> {
        let source_text = source_text.into();
        if source_text.trim().is_empty() {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4(),
            source_text,
            target,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn target(&self) -> &LanguageTarget {
        &self.target
    }
}

/// Successful translation payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Language reported by the provider or the detection step, if any
    pub source_language: Option<String>,
    pub provider: String,
}

/// What the front-end gets to show for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(Translation),
    Failed { message: String },
}

impl TranslationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TranslationOutcome::Translated(_))
    }

    /// Text to display, either the translation or the error message
    pub fn display_text(&self) -> &str {
        match self {
            TranslationOutcome::Translated(translation) => &translation.text,
            TranslationOutcome::Failed { message } => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub source_text: String,
    pub target_language: String,
    pub translated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_rejects_blank_text() {
        let target = LanguageTarget::new("Russian", Some("ru"));
        assert!(TranslationRequest::new("", target.clone()).is_none());
        assert!(TranslationRequest::new("  \n\t ", target.clone()).is_none());

        let request = TranslationRequest::new("Hello", target).unwrap();
        assert_eq!(request.source_text(), "Hello");
        assert_eq!(request.target().code.as_deref(), Some("ru"));
    }

    #[test]
    fn requests_get_distinct_ids() {
        let a = TranslationRequest::new("a", LanguageTarget::named("German")).unwrap();
        let b = TranslationRequest::new("a", LanguageTarget::named("German")).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn outcome_display_text() {
        let ok = TranslationOutcome::Translated(Translation {
            text: "Привет".to_string(),
            source_language: Some("English".to_string()),
            provider: "chat".to_string(),
        });
        assert!(ok.is_success());
        assert_eq!(ok.display_text(), "Привет");

        let failed = TranslationOutcome::Failed {
            message: "[Error: 500]\noops".to_string(),
        };
        assert!(!failed.is_success());
        assert_eq!(failed.display_text(), "[Error: 500]\noops");
    }
}
