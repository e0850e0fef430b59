// src/lib.rs
//! hypegen library: turns a video or a topic into platform-specific promotional copy.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ProviderError`, `ResponseValidationError`, `TranscriptError`
//! - **Configuration**: `ServiceConfig`, `CommandLineInput`
//! - **Domain types**: `Platform`, `Variation`, `VariationTriple`, `PlatformResult`, `GenerationOutcome`
//! - **Validation**: `validate`, the gate between raw model output and typed results
//! - **Generation**: `GenerationOrchestrator`, `HypePipeline`, `PromptBuilder`
//! - **Adapters**: `OpenAiHttpClient`, `YoutubeTranscriptClient`
//! - **Boundaries**: the HTTP `router` and CLI output planning

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod request;
pub mod server;
pub mod transcript;
pub mod types;
pub mod validation;

// --- Error Handling ---
pub use crate::error::{
    AppError, ProviderError, ProviderErrorCode, ResponseValidationError, TranscriptError,
};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, RunMode, ServiceConfig};

// --- Domain Types ---
pub use crate::types::{
    ApiKey, GenerationOutcome, ModelName, Platform, PlatformResult, RequestId, ValidatedUrl,
    Variation, VariationTriple, Vibe, VideoId,
};

// --- Validation ---
pub use crate::validation::validate;

// --- Generation ---
pub use crate::api::{CompletionGateway, CompletionOptions, CompletionRequest, OpenAiHttpClient};
pub use crate::pipeline::{GenerationOrchestrator, HypePipeline};
pub use crate::prompts::{ChatMessage, ContentSource, PromptBuilder, PromptContext, Role};
pub use crate::request::GenerateRequest;
pub use crate::transcript::{ResolvedTranscript, TranscriptResolver, YoutubeTranscriptClient};

// --- Boundaries ---
pub use crate::server::{router, serve, AppState};
