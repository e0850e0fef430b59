// src/api/responses.rs
//! Wire types for the OpenAI-compatible chat completions endpoint.
//!
//! Only the fields this crate reads are modelled; everything else in the
//! provider's payload is ignored.

use crate::prompts::ChatMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub model: Option<String>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<AssistantMessage>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
    pub refusal: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// `{ "error": { "message": ..., "type": ..., "code": ... } }`
#[derive(Debug, Deserialize)]
pub struct ProviderErrorEnvelope {
    pub error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Usually a string, occasionally a number or null.
    pub code: Option<Value>,
}

impl ProviderErrorBody {
    /// The most specific code string available: `code`, then `type`.
    pub fn code_str(&self) -> Option<&str> {
        self.code
            .as_ref()
            .and_then(Value::as_str)
            .or(self.kind.as_deref())
    }
}
