// src/api/client.rs
//! Thin reqwest wrapper for an OpenAI-compatible chat completions API.
//!
//! Handles authentication and the request/response round trip. Parsing
//! lives in `parser`, classification of failures in `crate::error`.

use super::parser::parse_completion_response;
use super::responses::{ChatCompletionRequest, ResponseFormat};
use super::{CompletionGateway, CompletionRequest};
use crate::error::{AppError, ProviderError, ProviderErrorCode};
use crate::types::ApiKey;
use reqwest::{header, Client, Response};
use serde::Serialize;

const CHAT_COMPLETIONS_ENDPOINT: &str = "chat/completions";

/// HTTP client for the completion provider, created once per process.
#[derive(Clone)]
pub struct OpenAiHttpClient {
    client: Client,
    base_url: String,
}

impl OpenAiHttpClient {
    /// Creates a new HTTP client with bearer authentication.
    pub fn new(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()
            .map_err(|e| AppError::InternalError {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API key format: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a POST request with a JSON body to the given endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| classify_transport_error(&url, e))?;

        log::debug!("POST {} -> {}", url, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl CompletionGateway for OpenAiHttpClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        let body = ChatCompletionRequest {
            model: request.model.as_str(),
            messages: &request.messages,
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
            response_format: request
                .options
                .json_object
                .then(ResponseFormat::json_object),
        };

        let response = self.post(CHAT_COMPLETIONS_ENDPOINT, &body).await?;
        let result = extract_response_text(response).await?;
        parse_completion_response(result)
    }
}

fn classify_transport_error(url: &str, e: reqwest::Error) -> ProviderError {
    log::error!("Request to {} failed: {}", url, e);
    if e.is_timeout() {
        ProviderError::new(ProviderErrorCode::Timeout, None, format!("Request to {} timed out", url))
    } else {
        ProviderError::network(format!("Request to {} failed: {}", url, e))
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, ProviderError> {
    let status = response.status();
    let url = response.url().to_string();
    let data = response
        .text()
        .await
        .map_err(|e| classify_transport_error(&url, e))?;

    Ok(ApiResponse { data, status, url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::ChatMessage;
    use crate::types::ModelName;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest::new(
            ModelName::new("gpt-4o").unwrap(),
            vec![ChatMessage::system("be hype"), ChatMessage::user("go")],
        )
    }

    fn client(base_url: &str) -> OpenAiHttpClient {
        OpenAiHttpClient::new(&ApiKey::new("sk-test-key").unwrap(), base_url).unwrap()
    }

    #[tokio::test]
    async fn test_complete_sends_model_messages_and_json_mode() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o",
                "temperature": 0.7,
                "response_format": { "type": "json_object" },
                "messages": [
                    { "role": "system", "content": "be hype" },
                    { "role": "user", "content": "go" }
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"[]"},"finish_reason":"stop"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let content = client(&server.url()).complete(&request()).await.unwrap();

        assert_eq!(content, Some("[]".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url_is_ignored() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"ok"}}]}"#)
            .create_async()
            .await;

        let base = format!("{}/", server.url());
        assert_eq!(client(&base).complete(&request()).await.unwrap(), Some("ok".into()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_plain_text_mode_forwards_max_tokens() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::PartialJson(json!({ "max_tokens": 256 })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"hi"}}]}"#)
            .create_async()
            .await;

        let request = request().with_options(crate::api::CompletionOptions {
            json_object: false,
            max_tokens: Some(256),
            ..Default::default()
        });
        let content = client(&server.url()).complete(&request).await.unwrap();
        assert_eq!(content, Some("hi".into()));
        mock.assert_async().await;
    }

    #[test]
    fn test_response_format_skipped_when_absent() {
        let messages = vec![ChatMessage::user("go")];
        let body = ChatCompletionRequest {
            model: "gpt-4o",
            messages: &messages,
            temperature: 0.7,
            max_tokens: None,
            response_format: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("response_format").is_none());
        assert!(value.get("max_tokens").is_none());
    }

    #[tokio::test]
    async fn test_provider_error_keeps_status_hint() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#)
            .create_async()
            .await;

        let err = client(&server.url()).complete(&request()).await.unwrap_err();
        assert_eq!(err.code, ProviderErrorCode::InvalidApiKey);
        assert_eq!(err.status_hint, Some(401));
        assert_eq!(err.message, "Incorrect API key provided");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_a_network_error() {
        // Port 9 (discard) is not expected to accept connections
        let err = client("http://127.0.0.1:9").complete(&request()).await.unwrap_err();
        assert_eq!(err.code, ProviderErrorCode::Network);
        assert_eq!(err.status_hint, None);
    }
}
