use std::env;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_direct_url() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Which direct translation service is tried before the chat model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectBackendKind {
    Google,
    None,
}

impl DirectBackendKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "google" => Some(Self::Google),
            "none" | "off" | "" => Some(Self::None),
            _ => None,
        }
    }
}

fn default_direct_backend() -> DirectBackendKind {
    DirectBackendKind::Google
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Bearer token for the chat-completion endpoint
    #[serde(default)]
    pub api_key: String,
    /// OpenAI-compatible base URL, `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_direct_backend")]
    pub direct_backend: DirectBackendKind,
    #[serde(default = "default_direct_url")]
    pub direct_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl TranslatorConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let base_url = env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url);
        let model = env::var("MODEL_NAME").unwrap_or(defaults.model);

        let direct_backend = match env::var("SNAPTRANS_DIRECT_BACKEND") {
            Ok(value) => DirectBackendKind::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Unknown SNAPTRANS_DIRECT_BACKEND '{value}', using none");
                DirectBackendKind::None
            }),
            Err(_) => defaults.direct_backend,
        };

        let timeout_seconds = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_seconds);

        Self {
            api_key,
            base_url,
            model,
            direct_backend,
            direct_url: defaults.direct_url,
            timeout_seconds,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            direct_backend: default_direct_backend(),
            direct_url: default_direct_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_backend_parsing() {
        assert_eq!(DirectBackendKind::parse("Google"), Some(DirectBackendKind::Google));
        assert_eq!(DirectBackendKind::parse(" none "), Some(DirectBackendKind::None));
        assert_eq!(DirectBackendKind::parse("off"), Some(DirectBackendKind::None));
        assert_eq!(DirectBackendKind::parse("deepl"), None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: TranslatorConfig = serde_json::from_str(r#"{"api_key":"sk-test"}"#).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.direct_backend, DirectBackendKind::Google);
        assert_eq!(config.timeout_seconds, 30);
    }
}
