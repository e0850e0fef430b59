// src/types/platform.rs
use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A target content surface with its own prompt template and conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    #[serde(rename = "tiktok")]
    TikTok,
    #[serde(rename = "youtube")]
    YoutubeDescription,
}

impl Platform {
    /// Platforms generated for every request unless configured otherwise.
    pub const DEFAULT_SET: [Platform; 3] = [Platform::Twitter, Platform::Instagram, Platform::TikTok];

    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Instagram,
        Platform::TikTok,
        Platform::YoutubeDescription,
    ];

    /// Key used in `PlatformResult` and on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::YoutubeDescription => "youtube",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::YoutubeDescription => "YouTube Description",
        }
    }

    /// Hard per-post character ceiling, where the platform enforces one.
    pub fn character_limit(self) -> Option<usize> {
        match self {
            Platform::Twitter => Some(crate::constants::TWITTER_CHARACTER_LIMIT),
            _ => None,
        }
    }

    /// Display name for an arbitrary result key, falling back to the key itself.
    pub fn display_name_for_key(key: &str) -> &str {
        match key.parse::<Platform>() {
            Ok(platform) => platform.display_name(),
            Err(_) => key,
        }
    }
}

impl FromStr for Platform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twitter" | "x" => Ok(Platform::Twitter),
            "instagram" => Ok(Platform::Instagram),
            "tiktok" | "shorts" => Ok(Platform::TikTok),
            "youtube" | "youtube-description" => Ok(Platform::YoutubeDescription),
            other => Err(ValidationError::UnknownPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
