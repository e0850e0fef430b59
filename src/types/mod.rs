// src/types/mod.rs
//! Domain types: request newtypes, platforms, and the generated-content model.

use thiserror::Error;

mod domain_types;
mod ids;
mod platform;
mod variation;

pub use domain_types::*;
pub use ids::*;
pub use platform::*;
pub use variation::*;

/// Caller-supplied input that failed basic shape or required-field checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid YouTube URL format: {url}")]
    InvalidVideoUrl { url: String },

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid model name: {name} - {reason}")]
    InvalidModelName { name: String, reason: String },

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: usize, min: usize, max: usize },
}
