// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each variant says what went wrong and for which platform or upstream,
//! and `AppError::status_code` maps that vocabulary onto the HTTP boundary.

use crate::types::ValidationError;
use std::fmt;
use thiserror::Error;

/// Completion provider error codes as a typed vocabulary.
///
/// Parsed from the provider's `error.code` / `error.type` strings, with
/// the HTTP status as a fallback when the error body is unparseable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorCode {
    /// Credential missing, malformed or revoked
    InvalidApiKey,
    /// Account has no remaining quota
    InsufficientQuota,
    /// Too many requests
    RateLimited,
    /// The request body was rejected by the provider
    InvalidRequest,
    /// The configured model does not exist or is not available to this key
    ModelNotFound,
    /// The prompt exceeds the model's context window
    ContextLengthExceeded,
    /// Provider-side failure
    ServerError,
    /// The request never produced an HTTP response
    Network,
    /// The call exceeded the configured completion timeout
    Timeout,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl ProviderErrorCode {
    /// Parse a provider error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "invalid_api_key" | "authentication_error" | "invalid_authentication" => {
                Self::InvalidApiKey
            }
            "insufficient_quota" => Self::InsufficientQuota,
            "rate_limit_exceeded" | "rate_limit_error" => Self::RateLimited,
            "invalid_request_error" => Self::InvalidRequest,
            "model_not_found" => Self::ModelNotFound,
            "context_length_exceeded" => Self::ContextLengthExceeded,
            "server_error" | "api_error" => Self::ServerError,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidApiKey => write!(f, "invalid_api_key"),
            Self::InsufficientQuota => write!(f, "insufficient_quota"),
            Self::RateLimited => write!(f, "rate_limit_exceeded"),
            Self::InvalidRequest => write!(f, "invalid_request_error"),
            Self::ModelNotFound => write!(f, "model_not_found"),
            Self::ContextLengthExceeded => write!(f, "context_length_exceeded"),
            Self::ServerError => write!(f, "server_error"),
            Self::Network => write!(f, "network_error"),
            Self::Timeout => write!(f, "timeout"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// The completion call itself failed.
///
/// Carries no provider-internal types: only the typed code, the HTTP
/// status the provider answered with (if any), and its message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Completion provider error ({code}): {message}")]
pub struct ProviderError {
    pub code: ProviderErrorCode,
    pub status_hint: Option<u16>,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, status_hint: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            code,
            status_hint,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Network, None, message)
    }

    pub fn timeout(platform: &str, seconds: u64) -> Self {
        Self::new(
            ProviderErrorCode::Timeout,
            None,
            format!("completion for {} timed out after {}s", platform, seconds),
        )
    }
}

/// Why a model response was refused by the response validator.
///
/// Every variant names the platform; the raw model text is never part of
/// the message (it is logged instead).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseValidationError {
    #[error("Missing content from LLM for {platform}.")]
    MissingContent { platform: String },

    #[error("Invalid JSON format received from LLM for {platform}. Parsing failed.")]
    MalformedJson { platform: String },

    #[error("Invalid root structure from LLM for {platform}. Expected a JSON array of variations or {{ \"variations\": [...] }}.")]
    InvalidRootShape { platform: String },

    #[error("Invalid response structure from LLM for {platform}. Expected exactly 3 variations, got {got}.")]
    InvalidArity { platform: String, got: usize },

    #[error("Invalid response structure from LLM for {platform}. Variation at index {index} is malformed.")]
    InvalidItemShape {
        platform: String,
        index: usize,
        reason: String,
    },
}

impl ResponseValidationError {
    pub fn platform(&self) -> &str {
        match self {
            Self::MissingContent { platform }
            | Self::MalformedJson { platform }
            | Self::InvalidRootShape { platform }
            | Self::InvalidArity { platform, .. }
            | Self::InvalidItemShape { platform, .. } => platform,
        }
    }
}

/// Transcript or context resolution failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("No transcript found for video {video_id} (may be unavailable or unsupported language).")]
    NotFound { video_id: String },

    #[error("Transcripts are disabled for video {video_id}.")]
    Disabled { video_id: String },

    #[error("Video {video_id} is unavailable.")]
    VideoUnavailable { video_id: String },

    #[error("Transcript is empty or unavailable for video {video_id}.")]
    Empty { video_id: String },

    #[error("Failed to fetch transcript: too many requests, the upstream asked for a captcha")]
    TooManyRequests,

    #[error("Failed to fetch transcript: HTTP {status} from {url}")]
    Upstream { status: u16, url: String },

    #[error("Failed to fetch transcript: {0}")]
    Network(String),

    #[error("Failed to fetch transcript: {0}")]
    Malformed(String),
}

impl TranscriptError {
    /// Whether the failure means the content has no retrievable transcript,
    /// as opposed to the fetch itself failing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Disabled { .. }
                | Self::VideoUnavailable { .. }
                | Self::Empty { .. }
        )
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid JSON in request body: {0}")]
    MalformedRequestBody(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    ResponseValidation(#[from] ResponseValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("Error interacting with clipboard: {0}")]
    Clipboard(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AppError {
    /// HTTP status for this error at the `POST /generate` boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedRequestBody(_) | Self::Validation(_) => 400,
            Self::Transcript(e) if e.is_not_found() => 404,
            Self::Transcript(_) => 502,
            Self::Provider(ProviderError {
                status_hint: Some(status),
                ..
            }) if (400..=599).contains(status) => *status,
            _ => 500,
        }
    }

    /// Short, stable name of the error kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingConfiguration(_) => "missing_configuration",
            Self::MalformedRequestBody(_) | Self::Validation(_) => "request_validation",
            Self::ResponseValidation(e) => match e {
                ResponseValidationError::MissingContent { .. } => "missing_content",
                ResponseValidationError::MalformedJson { .. } => "malformed_json",
                ResponseValidationError::InvalidRootShape { .. } => "invalid_root_shape",
                ResponseValidationError::InvalidArity { .. } => "invalid_arity",
                ResponseValidationError::InvalidItemShape { .. } => "invalid_item_shape",
            },
            Self::Provider(_) => "provider",
            Self::Transcript(_) => "upstream_resolution",
            Self::TemplateRenderError { .. } => "template_render",
            Self::Clipboard(_) => "clipboard",
            Self::Io(_) => "io",
            Self::DeliveryFailed { .. } => "delivery",
            Self::InternalError { .. } => "internal",
        }
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::InternalError {
            message: "Formatting error".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<arboard::Error> for AppError {
    fn from(err: arboard::Error) -> Self {
        AppError::Clipboard(format!("Clipboard error: {}", err))
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_code_vocabulary() {
        assert_eq!(
            ProviderErrorCode::from_api_response("invalid_api_key"),
            ProviderErrorCode::InvalidApiKey
        );
        assert_eq!(
            ProviderErrorCode::from_api_response("rate_limit_exceeded"),
            ProviderErrorCode::RateLimited
        );
        assert_eq!(
            ProviderErrorCode::from_api_response("something_new"),
            ProviderErrorCode::Unknown("something_new".to_string())
        );
        assert_eq!(ProviderErrorCode::HttpStatus(418).to_string(), "http_418");
    }

    #[test]
    fn test_request_errors_map_to_400() {
        assert_eq!(
            AppError::from(ValidationError::MissingField("topic")).status_code(),
            400
        );
        assert_eq!(
            AppError::MalformedRequestBody("expected value".into()).status_code(),
            400
        );
    }

    #[test]
    fn test_transcript_errors_split_between_404_and_502() {
        let not_found = TranscriptError::Disabled {
            video_id: "dQw4w9WgXcQ".into(),
        };
        assert_eq!(AppError::from(not_found).status_code(), 404);

        let network = TranscriptError::Network("connection reset".into());
        assert_eq!(AppError::from(network).status_code(), 502);
    }

    #[test]
    fn test_provider_status_hint_is_forwarded() {
        let limited = ProviderError::new(ProviderErrorCode::RateLimited, Some(429), "slow down");
        assert_eq!(AppError::from(limited).status_code(), 429);

        let network = ProviderError::network("dns failure");
        assert_eq!(AppError::from(network).status_code(), 500);

        let bogus = ProviderError::new(ProviderErrorCode::HttpStatus(200), Some(200), "odd");
        assert_eq!(AppError::from(bogus).status_code(), 500);
    }

    #[test]
    fn test_response_validation_errors_are_500_and_name_the_platform() {
        let err = ResponseValidationError::InvalidArity {
            platform: "tiktok".into(),
            got: 2,
        };
        assert_eq!(err.platform(), "tiktok");
        assert_eq!(
            err.to_string(),
            "Invalid response structure from LLM for tiktok. Expected exactly 3 variations, got 2."
        );
        let app = AppError::from(err);
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.kind(), "invalid_arity");
    }
}
