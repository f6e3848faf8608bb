use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use snaptrans_config::translator::TranslatorConfig;

use crate::{ChatBackend, TranslateError};

/// Client for an OpenAI-compatible `/chat/completions` endpoint
#[derive(Clone)]
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, base_url, model)
    }

    pub fn with_client(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        model: String,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self::with_client(
            client,
            config.api_key.clone(),
            config.base_url.clone(),
            config.model.clone(),
        ))
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[async_trait]
impl ChatBackend for OpenAiChatClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(TranslateError::from_send)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "chat completion failed");
            return Err(TranslateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        let content = json["choices"]
            .get(0)
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or_else(|| {
                TranslateError::MalformedResponse("No message content in response".to_string())
            })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve_once, test_client};

    fn client_for(url: &str, api_key: &str) -> OpenAiChatClient {
        OpenAiChatClient::with_client(
            test_client(),
            api_key.to_string(),
            format!("{url}/v1/"),
            "gpt-4o-mini".to_string(),
        )
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let a = OpenAiChatClient::new("k".into(), "https://api.example.com/v1".into(), "m".into());
        let b = OpenAiChatClient::new("k".into(), "https://api.example.com/v1/".into(), "m".into());
        assert_eq!(a.endpoint(), "https://api.example.com/v1/chat/completions");
        assert_eq!(a.endpoint(), b.endpoint());
    }

    #[tokio::test]
    async fn returns_trimmed_message_content() {
        let server = serve_once(
            200,
            r#"{"choices":[{"message":{"role":"assistant","content":"  Привет \n"}}]}"#,
        )
        .await;

        let client = client_for(&server.url, "sk-test");
        let reply = client.complete("system prompt", "user prompt").await.unwrap();
        assert_eq!(reply, "Привет");

        let request = server.request.await.unwrap();
        assert!(request.starts_with("POST /v1/chat/completions HTTP/1.1"));
        assert!(request.to_lowercase().contains("authorization: bearer sk-test"));

        let body: serde_json::Value = serde_json::from_str(request.split("\r\n\r\n").nth(1).unwrap()).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "system prompt");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "user prompt");
    }

    #[tokio::test]
    async fn non_ok_status_carries_status_and_body() {
        let server = serve_once(401, r#"{"error":"invalid api key"}"#).await;

        let client = client_for(&server.url, "sk-bad");
        let err = client.complete("s", "u").await.unwrap_err();

        match &err {
            TranslateError::Status { status, body } => {
                assert_eq!(*status, 401);
                assert_eq!(body, r#"{"error":"invalid api key"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "[Error: 401]\n{\"error\":\"invalid api key\"}");
    }

    #[tokio::test]
    async fn missing_choices_is_malformed() {
        let server = serve_once(200, r#"{"choices":[]}"#).await;

        let client = client_for(&server.url, "sk-test");
        let err = client.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, TranslateError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = serve_once(200, "<html>gateway</html>").await;

        let client = client_for(&server.url, "sk-test");
        let err = client.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, TranslateError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_backend_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = client_for(&url, "sk-test");
        let err = client.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, TranslateError::BackendUnavailable));
    }

    #[tokio::test]
    async fn empty_api_key_fails_before_sending() {
        // Nothing listens here, a request would surface as a network error
        let client = client_for("http://127.0.0.1:9", "");
        let err = client.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, TranslateError::AuthenticationError));
    }
}
