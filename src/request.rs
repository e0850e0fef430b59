// src/request.rs
//! Parsing of `POST /generate` bodies.
//!
//! Two flows share the endpoint. A body carrying a `url` key is a video
//! request; anything else is a direct-topic request. Fields are checked in
//! a fixed order so the first missing one is the one reported.

use crate::error::AppError;
use crate::types::{ValidationError, Vibe, VideoId};
use serde_json::{Map, Value};

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateRequest {
    /// `{ url, vibe }`
    FromVideo { video: VideoId, vibe: Vibe },
    /// `{ contentType, topic, highlight, vibe }`
    FromTopic {
        content_type: String,
        topic: String,
        highlight: String,
        vibe: Vibe,
    },
}

impl GenerateRequest {
    /// Parses and validates a raw request body.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            log::debug!("Rejecting request body: {}", e);
            AppError::MalformedRequestBody(e.to_string())
        })?;

        Self::from_value(value)
    }

    /// Validates an already-parsed body.
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        match value {
            Value::Object(fields) => Ok(Self::from_fields(&fields)?),
            other => Err(AppError::MalformedRequestBody(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        if fields.contains_key("url") {
            let url = required(fields, "url")?;
            let vibe = Vibe::new(required(fields, "vibe")?)?;
            let video = VideoId::from_url(&url)?;
            return Ok(Self::FromVideo { video, vibe });
        }

        let topic = required(fields, "topic")?;
        let highlight = required(fields, "highlight")?;
        let content_type = required(fields, "contentType")?;
        let vibe = Vibe::new(required(fields, "vibe")?)?;

        Ok(Self::FromTopic {
            content_type,
            topic,
            highlight,
            vibe,
        })
    }

    pub fn vibe(&self) -> &Vibe {
        match self {
            Self::FromVideo { vibe, .. } | Self::FromTopic { vibe, .. } => vibe,
        }
    }

    /// One-line summary for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::FromVideo { video, vibe } => format!("video {} ({})", video, vibe),
            Self::FromTopic {
                content_type,
                topic,
                vibe,
                ..
            } => format!("{} \"{}\" ({})", content_type, topic, vibe),
        }
    }
}

/// A trimmed, non-blank string field; wrong types count as missing.
fn required(fields: &Map<String, Value>, key: &'static str) -> Result<String, ValidationError> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(ValidationError::MissingField(key))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(body: &str) -> Result<GenerateRequest, AppError> {
        GenerateRequest::from_body(body.as_bytes())
    }

    fn missing(body: &str) -> &'static str {
        match parse(body) {
            Err(AppError::Validation(ValidationError::MissingField(field))) => field,
            other => panic!("expected a missing field, got {:?}", other),
        }
    }

    #[test]
    fn test_video_flow() {
        let request = parse(r#"{"url":"https://youtu.be/dQw4w9WgXcQ","vibe":" Funny "}"#).unwrap();
        assert_eq!(
            request,
            GenerateRequest::FromVideo {
                video: VideoId::parse("dQw4w9WgXcQ").unwrap(),
                vibe: Vibe::new("Funny").unwrap(),
            }
        );
        assert_eq!(request.describe(), "video dQw4w9WgXcQ (Funny)");
    }

    #[test]
    fn test_topic_flow() {
        let request = parse(
            r#"{"contentType":"Podcast Episode","topic":"Rust in prod","highlight":"zero crashes","vibe":"Informative","extra":1}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            GenerateRequest::FromTopic {
                content_type: "Podcast Episode".into(),
                topic: "Rust in prod".into(),
                highlight: "zero crashes".into(),
                vibe: Vibe::new("Informative").unwrap(),
            }
        );
        assert_eq!(request.vibe().as_str(), "Informative");
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        assert_eq!(missing(r#"{}"#), "topic");
        assert_eq!(missing(r#"{"topic":"t"}"#), "highlight");
        assert_eq!(missing(r#"{"topic":"t","highlight":"h"}"#), "contentType");
        assert_eq!(
            missing(r#"{"topic":"t","highlight":"h","contentType":"c","vibe":"  "}"#),
            "vibe"
        );
        assert_eq!(missing(r#"{"url":"","vibe":"Funny"}"#), "url");
        assert_eq!(missing(r#"{"url":"https://youtu.be/dQw4w9WgXcQ"}"#), "vibe");
        assert_eq!(missing(r#"{"topic":42,"highlight":"h"}"#), "topic");
    }

    #[test]
    fn test_invalid_video_url() {
        let err = parse(r#"{"url":"https://vimeo.com/1","vibe":"Funny"}"#).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::InvalidVideoUrl { .. })
        ));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_malformed_bodies() {
        for body in ["", "{", "not json", "[1,2]", "\"url\""] {
            let err = parse(body).unwrap_err();
            assert!(matches!(err, AppError::MalformedRequestBody(_)), "{}", body);
            assert_eq!(err.status_code(), 400);
        }
    }
}
