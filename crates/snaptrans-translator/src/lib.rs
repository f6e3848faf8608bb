use snaptrans_types::{LanguageTarget, Translation};

pub mod chat;
pub mod chat_translator;
pub mod google;
pub mod prompt;
pub mod service;

#[cfg(test)]
mod test_support;

pub use chat::OpenAiChatClient;
pub use chat_translator::ChatTranslator;
pub use google::GoogleTranslateClient;
pub use service::TranslationService;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text into the target language
    async fn translate(
        &self,
        text: &str,
        target: &LanguageTarget,
    ) -> Result<Translation, TranslateError>;

    /// Detect language of text, as a language name
    async fn detect_language(&self, text: &str) -> Result<String, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// One system/user exchange with a chat-completion model
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, TranslateError>;
}

#[async_trait::async_trait]
impl<T: ChatBackend + ?Sized> ChatBackend for std::sync::Arc<T> {
    async fn complete(&self, system: &str, user: &str) -> Result<String, TranslateError> {
        (**self).complete(system, user).await
    }
}

/// A translation service addressed by ISO language code
#[async_trait::async_trait]
pub trait DirectBackend: Send + Sync {
    async fn translate(&self, text: &str, dest_code: &str) -> Result<Translation, TranslateError>;

    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Nothing to translate")]
    EmptyInput,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("[Error: {status}]\n{body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("[Google Translate error] {0}")]
    Direct(#[source] Box<TranslateError>),

    #[error("Translation backend unavailable")]
    BackendUnavailable,

    #[error("Authentication error: no API key configured")]
    AuthenticationError,
}

impl TranslateError {
    /// A refused connection means nothing is listening, anything else is a network failure
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() {
            tracing::warn!("Backend unreachable: {e}");
            TranslateError::BackendUnavailable
        } else {
            TranslateError::NetworkError(e)
        }
    }
}
