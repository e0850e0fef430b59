// src/transcript/youtube.rs
//! YouTube caption client.
//!
//! Loads the watch page, reads the caption track list embedded in the
//! player response, then downloads the chosen track's timed-text XML and
//! joins its segments.

use super::{ResolvedTranscript, TranscriptResolver};
use crate::error::{AppError, TranscriptError};
use crate::types::VideoId;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client};
use serde::Deserialize;
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

static TEXT_SEGMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<text\b[^>]*>(.*?)</text>")
        .expect("Failed to compile timed text regex - this is a bug in the code")
});

static TITLE_META_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta\s+name="title"\s+content="([^"]*)""#)
        .expect("Failed to compile title regex - this is a bug in the code")
});

static NUMERIC_ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&#(x[0-9A-Fa-f]+|[0-9]+);")
        .expect("Failed to compile entity regex - this is a bug in the code")
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerCaptions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default)]
    language_code: String,
    /// `"asr"` for auto-generated tracks
    kind: Option<String>,
}

/// Transcript resolver backed by YouTube's public watch page.
#[derive(Clone)]
pub struct YoutubeTranscriptClient {
    client: Client,
    base_url: Url,
    language: String,
}

impl YoutubeTranscriptClient {
    pub fn new(base_url: &str, language: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid transcript base URL {}: {}", base_url, e))
        })?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_str(language).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid transcript language {}: {}", language, e))
            })?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::InternalError {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url,
            language: language.to_string(),
        })
    }

    async fn get_text(&self, url: Url) -> Result<String, TranscriptError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TranscriptError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptError::TooManyRequests);
        }
        if !status.is_success() {
            return Err(TranscriptError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| TranscriptError::Network(e.to_string()))
    }

    fn choose_track<'a>(&self, tracks: &'a [CaptionTrack]) -> Option<&'a CaptionTrack> {
        let manual = |t: &&CaptionTrack| t.kind.as_deref() != Some("asr");
        let exact = |t: &&CaptionTrack| t.language_code == self.language;
        let prefix = |t: &&CaptionTrack| t.language_code.starts_with(self.language.as_str());

        tracks
            .iter()
            .filter(exact)
            .find(manual)
            .or_else(|| tracks.iter().find(exact))
            .or_else(|| tracks.iter().find(prefix))
            .or_else(|| tracks.first())
    }
}

#[async_trait::async_trait]
impl TranscriptResolver for YoutubeTranscriptClient {
    async fn resolve(&self, video: &VideoId) -> Result<ResolvedTranscript, TranscriptError> {
        log::info!("Fetching transcript for video {}", video);

        let mut watch_url = self
            .base_url
            .join("watch")
            .map_err(|e| TranscriptError::Malformed(e.to_string()))?;
        watch_url.query_pairs_mut().append_pair("v", video.as_str());

        let page = self.get_text(watch_url).await?;

        if page.contains("class=\"g-recaptcha\"") {
            return Err(TranscriptError::TooManyRequests);
        }

        let tracks = caption_tracks(&page, video)?;
        let track = self
            .choose_track(&tracks)
            .ok_or_else(|| TranscriptError::NotFound {
                video_id: video.to_string(),
            })?;
        log::debug!(
            "Using caption track '{}'{} for {}",
            track.language_code,
            if track.kind.as_deref() == Some("asr") { " (auto-generated)" } else { "" },
            video
        );

        let track_url = self
            .base_url
            .join(&track.base_url)
            .map_err(|e| TranscriptError::Malformed(format!("caption track URL: {}", e)))?;
        let xml = self.get_text(track_url).await?;

        let transcript = join_segments(&xml);
        if transcript.is_empty() {
            return Err(TranscriptError::Empty {
                video_id: video.to_string(),
            });
        }

        let title = extract_title(&page);
        log::info!(
            "Transcript fetched for {} ({} chars, title {})",
            video,
            transcript.chars().count(),
            title.as_deref().unwrap_or("unknown")
        );

        Ok(ResolvedTranscript { transcript, title })
    }
}

/// Caption tracks from the player response embedded in a watch page.
fn caption_tracks(page: &str, video: &VideoId) -> Result<Vec<CaptionTrack>, TranscriptError> {
    let Some((_, after)) = page.split_once("\"captions\":") else {
        if !page.contains("\"playabilityStatus\":") {
            return Err(TranscriptError::VideoUnavailable {
                video_id: video.to_string(),
            });
        }
        return Err(TranscriptError::Disabled {
            video_id: video.to_string(),
        });
    };

    let json = after
        .split_once(",\"videoDetails")
        .map(|(captions, _)| captions)
        .unwrap_or(after);

    let captions: PlayerCaptions = serde_json::from_str(json)
        .map_err(|e| TranscriptError::Malformed(format!("caption list: {}", e)))?;

    let renderer = captions
        .player_captions_tracklist_renderer
        .ok_or_else(|| TranscriptError::Disabled {
            video_id: video.to_string(),
        })?;

    if renderer.caption_tracks.is_empty() {
        return Err(TranscriptError::NotFound {
            video_id: video.to_string(),
        });
    }
    Ok(renderer.caption_tracks)
}

fn extract_title(page: &str) -> Option<String> {
    TITLE_META_REGEX
        .captures(page)
        .and_then(|captures| captures.get(1))
        .map(|m| decode_entities(m.as_str()).trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Decoded, non-empty segment texts joined by single spaces.
fn join_segments(xml: &str) -> String {
    TEXT_SEGMENT_REGEX
        .captures_iter(xml)
        .filter_map(|captures| captures.get(1))
        // Timed text is escaped twice: `&amp;#39;` for an apostrophe
        .map(|m| decode_entities(&decode_entities(m.as_str())))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let numeric = NUMERIC_ENTITY_REGEX.replace_all(text, |captures: &regex::Captures| {
        let code = &captures[1];
        let parsed = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        parsed
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| captures[0].to_string())
    });

    numeric
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
