// src/types/ids.rs
use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;
use uuid::Uuid;

/// Eleven URL-safe characters: the shape of every YouTube video id.
static VIDEO_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{11}$")
        .expect("Failed to compile video ID regex - this is a bug in the code")
});

/// Fallback for inputs the URL parser rejects, e.g. `youtu.be/abc` without a scheme.
static VIDEO_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&/#]|$)",
    )
    .expect("Failed to compile video URL regex - this is a bug in the code")
});

/// Identifier of a YouTube video, always 11 characters of `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Validates a bare video id.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if VIDEO_ID_REGEX.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(ValidationError::InvalidVideoUrl {
                url: input.to_string(),
            })
        }
    }

    /// Extracts the video id from the URL shapes people paste:
    /// `youtube.com/watch?v=`, `youtu.be/`, `youtube.com/shorts/`, `youtube.com/live/`.
    pub fn from_url(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let invalid = || ValidationError::InvalidVideoUrl {
            url: input.to_string(),
        };

        if input.is_empty() {
            return Err(ValidationError::MissingField("url"));
        }

        let candidate = match Url::parse(input) {
            Ok(url) => Self::candidate_from_parsed(&url),
            Err(_) => VIDEO_URL_REGEX
                .captures(input)
                .and_then(|captures| captures.get(1))
                .map(|m| m.as_str().to_string()),
        };

        candidate
            .filter(|id| VIDEO_ID_REGEX.is_match(id))
            .map(Self)
            .ok_or_else(invalid)
    }

    fn candidate_from_parsed(url: &Url) -> Option<String> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return None;
        }
        let host = url.host_str()?.to_ascii_lowercase();
        let host = host
            .strip_prefix("www.")
            .or_else(|| host.strip_prefix("m."))
            .unwrap_or(&host)
            .to_string();

        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

        match host.as_str() {
            "youtu.be" => segments.next().map(str::to_string),
            "youtube.com" => match segments.next()? {
                "watch" => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                // Live URLs may carry extra path segments after the id
                "shorts" | "live" => segments.next().map(str::to_string),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VideoId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlates the log lines of one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}
