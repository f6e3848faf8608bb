use async_trait::async_trait;
use snaptrans_types::{LanguageTarget, Translation};

use crate::prompt::{self, UNKNOWN_LANGUAGE};
use crate::{ChatBackend, ProviderMetadata, TranslateError, Translator};

/// Detect-then-translate pipeline on top of a chat model
pub struct ChatTranslator<C> {
    backend: C,
}

impl<C: ChatBackend> ChatTranslator<C> {
    pub fn new(backend: C) -> Self {
        Self { backend }
    }

    /// Detection never aborts a translation, any failure reads as "Unknown"
    pub async fn detect_language_or_unknown(&self, text: &str) -> String {
        match self.detect_language(text).await {
            Ok(language) => language,
            Err(e) => {
                tracing::warn!("Language detection failed: {e}");
                UNKNOWN_LANGUAGE.to_string()
            }
        }
    }
}

#[async_trait]
impl<C: ChatBackend> Translator for ChatTranslator<C> {
    async fn translate(
        &self,
        text: &str,
        target: &LanguageTarget,
    ) -> Result<Translation, TranslateError> {
        let source_language = self.detect_language_or_unknown(text).await;
        tracing::debug!("Detected source language: {source_language}");

        let user_prompt = prompt::translation_prompt(text, &source_language, target);
        let translated = self
            .backend
            .complete(prompt::TRANSLATE_SYSTEM_PROMPT, &user_prompt)
            .await?;

        if translated.is_empty() {
            return Err(TranslateError::MalformedResponse(
                "Model returned an empty translation".to_string(),
            ));
        }

        Ok(Translation {
            text: translated,
            source_language: (source_language != UNKNOWN_LANGUAGE).then_some(source_language),
            provider: "chat".to_string(),
        })
    }

    async fn detect_language(&self, text: &str) -> Result<String, TranslateError> {
        let reply = self
            .backend
            .complete(prompt::DETECT_SYSTEM_PROMPT, &prompt::detect_prompt(text))
            .await?;

        prompt::clean_detected_language(&reply).ok_or_else(|| {
            TranslateError::MalformedResponse(format!("Unusable detector reply: {reply:?}"))
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "chat".to_string(),
            requires_api_key: true,
            free_tier_available: false,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Chat backend answering from a script and recording every prompt pair
    #[derive(Default)]
    pub struct ScriptedChat {
        replies: Mutex<VecDeque<Result<String, TranslateError>>>,
        pub calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedChat {
        pub fn new(replies: Vec<Result<String, TranslateError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedChat {
        async fn complete(&self, system: &str, user: &str) -> Result<String, TranslateError> {
            self.calls
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(TranslateError::BackendUnavailable))
        }
    }

    #[tokio::test]
    async fn detects_then_translates() {
        let chat = std::sync::Arc::new(ScriptedChat::new(vec![
            Ok("English".to_string()),
            Ok("Привет".to_string()),
        ]));
        let translator = ChatTranslator::new(chat.clone());

        let translation = translator
            .translate("Hello", &LanguageTarget::new("Russian", Some("ru")))
            .await
            .unwrap();

        assert_eq!(translation.text, "Привет");
        assert_eq!(translation.source_language.as_deref(), Some("English"));

        let calls = chat.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, prompt::DETECT_SYSTEM_PROMPT);
        assert!(calls[0].1.ends_with("Hello"));
        assert_eq!(calls[1].0, prompt::TRANSLATE_SYSTEM_PROMPT);
        assert!(calls[1].1.starts_with("Translate the following text from English to Russian (ru)."));
    }

    #[tokio::test]
    async fn failed_detection_reads_as_unknown() {
        let chat = std::sync::Arc::new(ScriptedChat::new(vec![
            Err(TranslateError::Status {
                status: 500,
                body: "boom".to_string(),
            }),
            Ok("Hallo".to_string()),
        ]));
        let translator = ChatTranslator::new(chat.clone());

        assert_eq!(
            translator.detect_language_or_unknown("Hello").await,
            UNKNOWN_LANGUAGE
        );
    }

    #[tokio::test]
    async fn unknown_source_still_translates() {
        let chat = std::sync::Arc::new(ScriptedChat::new(vec![
            Err(TranslateError::Status {
                status: 503,
                body: "unavailable".to_string(),
            }),
            Ok("Hallo".to_string()),
        ]));
        let translator = ChatTranslator::new(chat.clone());

        let translation = translator
            .translate("Hello", &LanguageTarget::new("German", Some("de")))
            .await
            .unwrap();

        assert_eq!(translation.text, "Hallo");
        assert_eq!(translation.source_language, None);
        let calls = chat.calls.lock().unwrap();
        assert!(calls[1].1.starts_with("Translate the following text from Unknown to German (de)."));
    }

    #[tokio::test]
    async fn translation_status_error_propagates() {
        let chat = ScriptedChat::new(vec![
            Ok("English".to_string()),
            Err(TranslateError::Status {
                status: 401,
                body: "bad key".to_string(),
            }),
        ]);
        let translator = ChatTranslator::new(chat);

        let err = translator
            .translate("Hello", &LanguageTarget::named("German"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "[Error: 401]\nbad key");
    }

    #[tokio::test]
    async fn empty_model_reply_is_an_error() {
        let chat = ScriptedChat::new(vec![Ok("English".to_string()), Ok(String::new())]);
        let translator = ChatTranslator::new(chat);

        let err = translator
            .translate("Hello", &LanguageTarget::named("German"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::MalformedResponse(_)));
    }
}
