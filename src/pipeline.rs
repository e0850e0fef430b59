// src/pipeline.rs
//! Generation pipeline: context resolution, per-platform fan-out, and
//! fail-fast aggregation into one outcome.
//!
//! Every platform's completion call is issued in one concurrent batch. The
//! first platform to fail, whether at the provider or in validation, decides
//! the outcome and the remaining calls are dropped.

use crate::api::{CompletionGateway, CompletionOptions, CompletionRequest};
use crate::error::{AppError, ProviderError};
use crate::prompts::{ContentSource, PromptBuilder, PromptContext};
use crate::request::GenerateRequest;
use crate::transcript::TranscriptResolver;
use crate::types::{GenerationOutcome, ModelName, Platform, PlatformResult, RequestId, VariationTriple};
use crate::validation::validate;
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;

/// Drives prompt building, completion, and validation for a set of platforms.
#[derive(Clone)]
pub struct GenerationOrchestrator {
    gateway: Arc<dyn CompletionGateway>,
    prompts: Arc<PromptBuilder>,
    model: ModelName,
    options: CompletionOptions,
    call_timeout: Duration,
}

impl GenerationOrchestrator {
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        prompts: Arc<PromptBuilder>,
        model: ModelName,
        call_timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            prompts,
            model,
            options: CompletionOptions::default(),
            call_timeout,
        }
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    /// Generates every platform's triple, or the first error encountered.
    ///
    /// Results are keyed by platform, in the order the platforms were given.
    pub async fn generate(
        &self,
        request_id: RequestId,
        context: &PromptContext,
        platforms: &[Platform],
    ) -> Result<PlatformResult, AppError> {
        log::info!(
            "[{}] Generating {} platform(s) with {}",
            request_id,
            platforms.len(),
            self.model
        );

        let calls = platforms
            .iter()
            .map(|&platform| self.generate_platform(request_id, platform, context));

        let triples = try_join_all(calls).await.map_err(|e| {
            log::error!("[{}] Generation aborted ({}): {}", request_id, e.kind(), e);
            e
        })?;

        Ok(platforms
            .iter()
            .map(|platform| platform.key())
            .zip(triples)
            .collect())
    }

    /// Like [`generate`](Self::generate), with the result folded into an outcome.
    pub async fn run(
        &self,
        request_id: RequestId,
        context: &PromptContext,
        platforms: &[Platform],
    ) -> GenerationOutcome {
        self.generate(request_id, context, platforms).await.into()
    }

    async fn generate_platform(
        &self,
        request_id: RequestId,
        platform: Platform,
        context: &PromptContext,
    ) -> Result<VariationTriple, AppError> {
        let messages = self.prompts.build(platform, context)?;
        let request =
            CompletionRequest::new(self.model.clone(), messages).with_options(self.options.clone());

        log::debug!("[{}] Requesting completion for {}", request_id, platform);
        let raw = tokio::time::timeout(self.call_timeout, self.gateway.complete(&request))
            .await
            .map_err(|_| ProviderError::timeout(platform.key(), self.call_timeout.as_secs()))??;

        let triple = validate(platform.key(), raw.as_deref())?;
        log::debug!("[{}] {} validated", request_id, platform);
        Ok(triple)
    }
}

/// A full request: resolve the content source, then orchestrate.
#[derive(Clone)]
pub struct HypePipeline {
    orchestrator: GenerationOrchestrator,
    transcripts: Arc<dyn TranscriptResolver>,
    platforms: Vec<Platform>,
}

impl HypePipeline {
    pub fn new(
        orchestrator: GenerationOrchestrator,
        transcripts: Arc<dyn TranscriptResolver>,
        platforms: Vec<Platform>,
    ) -> Self {
        Self {
            orchestrator,
            transcripts,
            platforms,
        }
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Turns a request into the prompt context, fetching a transcript if needed.
    pub async fn resolve_context(
        &self,
        request_id: RequestId,
        request: &GenerateRequest,
    ) -> Result<PromptContext, AppError> {
        let source = match request {
            GenerateRequest::FromVideo { video, .. } => {
                let resolved = self.transcripts.resolve(video).await.map_err(|e| {
                    log::warn!("[{}] Transcript for {} unavailable: {}", request_id, video, e);
                    e
                })?;
                ContentSource::Transcript {
                    transcript: resolved.transcript,
                    title: resolved.title,
                }
            }
            GenerateRequest::FromTopic {
                content_type,
                topic,
                highlight,
                ..
            } => ContentSource::Topic {
                content_type: content_type.clone(),
                topic: topic.clone(),
                highlight: highlight.clone(),
            },
        };

        Ok(PromptContext::new(source, request.vibe().clone()))
    }

    pub async fn run(
        &self,
        request_id: RequestId,
        request: &GenerateRequest,
    ) -> Result<PlatformResult, AppError> {
        log::info!("[{}] Request: {}", request_id, request.describe());
        let context = self.resolve_context(request_id, request).await?;
        let result = self
            .orchestrator
            .generate(request_id, &context, &self.platforms)
            .await?;
        log::info!("[{}] Generated {} platform(s)", request_id, result.len());
        Ok(result)
    }
}
