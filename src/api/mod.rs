// src/api/mod.rs
//! Completion provider interaction: the ability to turn messages into text.
//!
//! Business logic depends on the [`CompletionGateway`] trait, never on HTTP
//! details. The OpenAI-compatible HTTP client is one implementation; tests
//! substitute their own.

pub mod client;
pub mod parser;
mod responses;

use crate::constants::DEFAULT_TEMPERATURE;
use crate::error::ProviderError;
use crate::prompts::ChatMessage;
use crate::types::ModelName;

pub use client::OpenAiHttpClient;

/// Sampling and format options for one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    /// Ask the provider to constrain output to a JSON object.
    pub json_object: bool,
    pub max_tokens: Option<u32>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            json_object: true,
            max_tokens: None,
        }
    }
}

/// One call to the completion capability.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: ModelName,
    pub messages: Vec<ChatMessage>,
    pub options: CompletionOptions,
}

impl CompletionRequest {
    pub fn new(model: ModelName, messages: Vec<ChatMessage>) -> Self {
        Self {
            model,
            messages,
            options: CompletionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }
}

/// The ability to complete a conversation.
///
/// `Ok(None)` means the provider answered but produced no text; deciding
/// whether that is an error belongs to the response validator.
#[async_trait::async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError>;
}
