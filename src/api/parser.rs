// src/api/parser.rs
//! Turns raw provider responses into completion text or a typed error.

use super::client::ApiResponse;
use super::responses::{ChatCompletionResponse, ProviderErrorEnvelope};
use crate::error::{ProviderError, ProviderErrorCode};
use crate::validation::preview;

/// Parse a chat completions response into the first choice's content.
pub fn parse_completion_response(result: ApiResponse<String>) -> Result<Option<String>, ProviderError> {
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status.as_u16(), &result.url))
    }
}

fn parse_success(body: &str, url: &str) -> Result<Option<String>, ProviderError> {
    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse completion response from {}: {}", url, e);
        log::debug!("Unparseable completion body: {}", preview(body));
        ProviderError::new(
            ProviderErrorCode::Unknown("malformed_response".to_string()),
            None,
            format!("Unreadable completion response from {}: {}", url, e),
        )
    })?;

    if let Some(usage) = &response.usage {
        log::debug!(
            "Completion by {}: {} prompt + {} completion = {} tokens",
            response.model.as_deref().unwrap_or("unknown model"),
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens
        );
    }

    let Some(choice) = response.choices.into_iter().next() else {
        log::warn!("Completion response from {} has no choices", url);
        return Ok(None);
    };

    if let Some(reason) = choice.finish_reason.as_deref() {
        if reason != "stop" {
            log::warn!("Completion finished with reason '{}'", reason);
        }
    }

    let message = choice.message;
    if let Some(refusal) = message.as_ref().and_then(|m| m.refusal.as_deref()) {
        log::warn!("Model refused the request: {}", refusal);
    }

    Ok(message.and_then(|m| m.content))
}

fn parse_error(body: &str, status: u16, url: &str) -> ProviderError {
    if let Ok(envelope) = serde_json::from_str::<ProviderErrorEnvelope>(body) {
        let code = envelope
            .error
            .code_str()
            .map(ProviderErrorCode::from_api_response)
            .unwrap_or_else(|| ProviderErrorCode::from_http_status(status));
        log::error!("Provider returned HTTP {} ({}): {}", status, code, envelope.error.message);
        return ProviderError::new(code, Some(status), envelope.error.message);
    }

    log::error!("Provider returned HTTP {} from {}: {}", status, url, preview(body));
    ProviderError::new(
        ProviderErrorCode::from_http_status(status),
        Some(status),
        format!("HTTP {} from {}", status, url),
    )
}
