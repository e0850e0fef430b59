// src/transcript/mod.rs
//! Video transcript resolution: turning a video into text the prompts can use.

pub mod youtube;

use crate::error::TranscriptError;
use crate::types::VideoId;

pub use youtube::YoutubeTranscriptClient;

/// Transcript text plus whatever title the source exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTranscript {
    pub transcript: String,
    pub title: Option<String>,
}

/// The ability to fetch the transcript of a video.
#[async_trait::async_trait]
pub trait TranscriptResolver: Send + Sync {
    async fn resolve(&self, video: &VideoId) -> Result<ResolvedTranscript, TranscriptError>;
}
