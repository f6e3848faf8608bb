use std::sync::Arc;

use snaptrans_config::DirectBackendKind;
use snaptrans_config::translator::TranslatorConfig;
use snaptrans_types::{LanguageTarget, Translation, TranslationOutcome, TranslationRequest};

use crate::{
    ChatTranslator, DirectBackend, GoogleTranslateClient, OpenAiChatClient, TranslateError,
    Translator,
};

/// Entry point used by the app.
///
/// The direct backend is used when one is configured and the target has an
/// ISO code; everything else goes through the chat model.
#[derive(Clone)]
pub struct TranslationService {
    chat: Arc<dyn Translator>,
    direct: Option<Arc<dyn DirectBackend>>,
}

impl TranslationService {
    pub fn new(chat: Arc<dyn Translator>, direct: Option<Arc<dyn DirectBackend>>) -> Self {
        Self { chat, direct }
    }

    pub fn from_config(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let chat = ChatTranslator::new(OpenAiChatClient::from_config(config)?);

        let direct: Option<Arc<dyn DirectBackend>> = match config.direct_backend {
            DirectBackendKind::Google => Some(Arc::new(GoogleTranslateClient::from_config(config)?)),
            DirectBackendKind::None => None,
        };

        if config.api_key.is_empty() {
            tracing::warn!("OPENAI_API_KEY is not set, chat translation will fail");
        }

        Ok(Self::new(Arc::new(chat), direct))
    }

    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<Translation, TranslateError> {
        let text = request.source_text();
        if text.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let target = request.target();

        if let (Some(direct), Some(code)) = (&self.direct, target.code.as_deref()) {
            tracing::debug!(
                request_id = %request.id(),
                provider = %direct.metadata().name,
                "translating to {code}"
            );
            return direct
                .translate(text, code)
                .await
                .map_err(|e| TranslateError::Direct(Box::new(e)));
        }

        tracing::debug!(
            request_id = %request.id(),
            provider = %self.chat.metadata().name,
            "translating to {}",
            target.name
        );
        self.chat.translate(text, target).await
    }

    /// Validate raw text and translate it
    pub async fn translate_text(
        &self,
        text: &str,
        target: LanguageTarget,
    ) -> Result<Translation, TranslateError> {
        let request = TranslationRequest::new(text, target).ok_or(TranslateError::EmptyInput)?;
        self.translate(&request).await
    }

    /// Same as [`translate`](Self::translate), folded into what the front-end shows
    pub async fn translate_outcome(&self, request: &TranslationRequest) -> TranslationOutcome {
        match self.translate(request).await {
            Ok(translation) => TranslationOutcome::Translated(translation),
            Err(e) => {
                tracing::warn!(request_id = %request.id(), "translation failed: {e}");
                TranslationOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
