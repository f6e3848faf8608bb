use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use snaptrans_config::translator::TranslatorConfig;
use snaptrans_types::Translation;

use crate::{DirectBackend, ProviderMetadata, TranslateError};

/// Google Translate through the public `gtx` web endpoint
#[derive(Clone)]
pub struct GoogleTranslateClient {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslateClient {
    pub fn new(api_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    pub fn from_config(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self::with_client(client, config.direct_url.clone()))
    }
}

#[async_trait]
impl DirectBackend for GoogleTranslateClient {
    async fn translate(&self, text: &str, dest_code: &str) -> Result<Translation, TranslateError> {
        let params = [
            ("client", "gtx"),
            ("sl", "auto"),
            ("tl", dest_code),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self
            .client
            .get(&self.api_url)
            .query(&params)
            .send()
            .await
            .map_err(TranslateError::from_send)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        parse_response(&json)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "google".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

/// The endpoint answers with nested arrays: `[[["<translated>", "<source>", ...], ...], null, "<detected>"]`
fn parse_response(json: &serde_json::Value) -> Result<Translation, TranslateError> {
    let segments = json
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| TranslateError::MalformedResponse("No translation segments".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        return Err(TranslateError::MalformedResponse(
            "Empty translation in response".to_string(),
        ));
    }

    let source_language = json
        .get(2)
        .and_then(|d| d.as_str())
        .map(str::to_string);

    Ok(Translation {
        text,
        source_language,
        provider: "google".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve_once, test_client};
    use serde_json::json;

    #[test]
    fn joins_all_segments() {
        let body = json!([
            [["Привет. ", "Hello. ", null, null, 10], ["Как дела?", "How are you?", null, null, 10]],
            null,
            "en"
        ]);

        let translation = parse_response(&body).unwrap();
        assert_eq!(translation.text, "Привет. Как дела?");
        assert_eq!(translation.source_language.as_deref(), Some("en"));
        assert_eq!(translation.provider, "google");
    }

    #[test]
    fn rejects_unexpected_shape() {
        assert!(matches!(
            parse_response(&json!({"error": "nope"})),
            Err(TranslateError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_response(&json!([[], null, "en"])),
            Err(TranslateError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn sends_target_code_and_text() {
        let server = serve_once(200, r#"[[["Hallo","Hello",null,null,1]],null,"en"]"#).await;

        let client = GoogleTranslateClient::with_client(test_client(), format!("{}/translate_a/single", server.url));
        let translation = client.translate("Hello", "de").await.unwrap();
        assert_eq!(translation.text, "Hallo");

        let request = server.request.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /translate_a/single?"));
        assert!(request_line.contains("client=gtx"));
        assert!(request_line.contains("tl=de"));
        assert!(request_line.contains("q=Hello"));
    }

    #[tokio::test]
    async fn non_ok_status_is_reported() {
        let server = serve_once(429, "Too Many Requests").await;

        let client = GoogleTranslateClient::with_client(test_client(), server.url.clone());
        let err = client.translate("Hello", "de").await.unwrap_err();
        assert_eq!(err.to_string(), "[Error: 429]\nToo Many Requests");
    }
}
