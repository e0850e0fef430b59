// src/prompts/mod.rs
//! Prompt construction: (platform, context, vibe) → role-tagged messages.
//!
//! Rendering is pure. The registry is built once and shared read-only.

mod templates;

pub use templates::JSON_OUTPUT_INSTRUCTION;

use crate::constants::{TRANSCRIPT_MAX_PROMPT_CHARS, VARIATIONS_PER_PLATFORM};
use crate::error::AppError;
use crate::types::{Platform, Vibe};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::borrow::Cow;

const USER_TEMPLATE_NAME: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message sent to the completion provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// What the copy is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// URL flow: the resolved transcript of a video.
    Transcript {
        transcript: String,
        title: Option<String>,
    },
    /// Direct-topic flow.
    Topic {
        content_type: String,
        topic: String,
        highlight: String,
    },
}

/// Everything the prompt needs besides the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub source: ContentSource,
    pub vibe: Vibe,
}

impl PromptContext {
    pub fn new(source: ContentSource, vibe: Vibe) -> Self {
        Self { source, vibe }
    }
}

/// Renders platform prompts from the registered handlebars templates.
pub struct PromptBuilder {
    registry: Handlebars<'static>,
}

impl PromptBuilder {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        // Prompts are plain text
        registry.register_escape_fn(handlebars::no_escape);

        for platform in Platform::ALL {
            let name = system_template_name(platform);
            registry
                .register_template_string(&name, templates::system_template(platform))
                .map_err(|e| AppError::TemplateRenderError {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
        }
        registry
            .register_template_string(USER_TEMPLATE_NAME, templates::USER_TEMPLATE)
            .map_err(|e| AppError::TemplateRenderError {
                name: USER_TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { registry })
    }

    /// Builds the `[system, user]` message pair for one platform.
    pub fn build(
        &self,
        platform: Platform,
        context: &PromptContext,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let mut data = json!({
            "count": VARIATIONS_PER_PLATFORM,
            "vibe": context.vibe.as_str(),
            "platform": platform.display_name(),
            "deliverable": templates::deliverable(platform),
            "character_limit": platform.character_limit(),
            "instruction": JSON_OUTPUT_INSTRUCTION,
        });

        match &context.source {
            ContentSource::Transcript { transcript, title } => {
                data["transcript"] = json!(truncate_transcript(transcript, TRANSCRIPT_MAX_PROMPT_CHARS));
                data["title"] = json!(title);
            }
            ContentSource::Topic {
                content_type,
                topic,
                highlight,
            } => {
                data["content_type"] = json!(content_type);
                data["topic"] = json!(topic);
                data["highlight"] = json!(highlight);
            }
        }

        let system = self.render(&system_template_name(platform), &data)?;
        let user = self.render(USER_TEMPLATE_NAME, &data)?;

        log::debug!(
            "Built {} prompt: system {} chars, user {} chars",
            platform,
            system.len(),
            user.len()
        );

        Ok(vec![ChatMessage::system(system), ChatMessage::user(user)])
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String, AppError> {
        self.registry
            .render(name, data)
            .map(|rendered| rendered.trim().to_string())
            .map_err(|e| AppError::TemplateRenderError {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

fn system_template_name(platform: Platform) -> String {
    format!("{}.system", platform.key())
}

/// Cuts a transcript to at most `max_chars` characters, on a char boundary.
pub fn truncate_transcript(transcript: &str, max_chars: usize) -> Cow<'_, str> {
    match transcript.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            log::debug!(
                "Truncating transcript from {} bytes to {} characters",
                transcript.len(),
                max_chars
            );
            Cow::Owned(format!("{} [...]", transcript[..cut].trim_end()))
        }
        None => Cow::Borrowed(transcript),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn topic_context() -> PromptContext {
        PromptContext::new(
            ContentSource::Topic {
                content_type: "Stream VOD".into(),
                topic: "Speedrunning Celeste".into(),
                highlight: "sub-30 minute any%".into(),
            },
            Vibe::new("Excited").unwrap(),
        )
    }

    fn transcript_context(title: Option<&str>) -> PromptContext {
        PromptContext::new(
            ContentSource::Transcript {
                transcript: "today we build a parser & it works <first> try".into(),
                title: title.map(str::to_string),
            },
            Vibe::new("Funny").unwrap(),
        )
    }

    #[test]
    fn test_every_platform_gets_system_and_user_messages() {
        let builder = PromptBuilder::new().unwrap();
        for platform in Platform::ALL {
            let messages = builder.build(platform, &topic_context()).unwrap();
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[0].role, Role::System);
            assert_eq!(messages[1].role, Role::User);
        }
    }

    #[test]
    fn test_output_instruction_is_embedded_everywhere() {
        let builder = PromptBuilder::new().unwrap();
        for platform in Platform::ALL {
            for context in [topic_context(), transcript_context(None)] {
                let messages = builder.build(platform, &context).unwrap();
                assert!(
                    messages[0].content.ends_with(JSON_OUTPUT_INSTRUCTION),
                    "{}",
                    platform
                );
            }
        }
        assert!(JSON_OUTPUT_INSTRUCTION.contains(&format!("exactly {}", VARIATIONS_PER_PLATFORM)));
    }

    #[test]
    fn test_topic_fields_and_vibe_rendered() {
        let builder = PromptBuilder::new().unwrap();
        let messages = builder.build(Platform::Twitter, &topic_context()).unwrap();
        let system = &messages[0].content;
        assert!(system.contains("\"Excited\" tone"));
        assert!(system.contains("\"Speedrunning Celeste\""));
        assert!(system.contains("under 280 characters"));
        assert!(!system.contains("transcript"));

        let user = &messages[1].content;
        assert!(user.starts_with("Content Type: Stream VOD\nTopic: Speedrunning Celeste"));
        assert!(user.ends_with("especially the JSON output format."));
        assert!(user.contains("Twitter post"));
    }

    #[test]
    fn test_transcript_is_not_html_escaped() {
        let builder = PromptBuilder::new().unwrap();
        let messages = builder
            .build(Platform::TikTok, &transcript_context(Some("Parsers & You")))
            .unwrap();
        assert!(messages[0].content.contains("for the video \"Parsers & You\""));
        assert!(messages[1].content.contains("a parser & it works <first> try"));
        assert!(messages[1].content.contains("Video Title: Parsers & You"));
    }

    #[test]
    fn test_missing_title_renders_placeholder() {
        let builder = PromptBuilder::new().unwrap();
        let messages = builder
            .build(Platform::Instagram, &transcript_context(None))
            .unwrap();
        assert!(messages[1].content.contains("Video Title: (unknown)"));
        assert!(!messages[0].content.contains("for the video"));
    }

    #[test]
    fn test_truncate_transcript() {
        assert_eq!(truncate_transcript("short", 10), "short");
        let long = "ü".repeat(20);
        let cut = truncate_transcript(&long, 5);
        assert_eq!(cut, format!("{} [...]", "ü".repeat(5)));
    }
}
