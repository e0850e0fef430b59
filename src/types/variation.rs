// src/types/variation.rs
//! The generated-content model: variations, triples, per-platform results,
//! and the success/failure outcome returned to callers.
//!
//! Everything here is built fresh per request and never mutated after
//! construction.

use crate::constants::VARIATIONS_PER_PLATFORM;
use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One generated content unit for one platform.
///
/// The derived `Deserialize` is the structural contract for model output:
/// all four fields are required with exactly these types, unknown fields
/// are ignored, and nothing is defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub topic: String,
    pub hook: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl Variation {
    /// Text placed on the clipboard when a user copies this variation:
    /// hook, description, then the tags as hashtags.
    pub fn clipboard_text(&self) -> String {
        let mut text = String::with_capacity(self.hook.len() + self.description.len() + 64);
        text.push_str(self.hook.trim());

        let description = self.description.trim();
        if !description.is_empty() {
            if !text.is_empty() {
                text.push_str("\n\n");
            }
            text.push_str(description);
        }

        let hashtags = self.hashtags();
        if !hashtags.is_empty() {
            if !text.is_empty() {
                text.push_str("\n\n");
            }
            text.push_str(&hashtags);
        }
        text
    }

    /// Tags rendered as space-separated hashtags, in model order.
    pub fn hashtags(&self) -> String {
        self.tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(|tag| {
                if tag.starts_with('#') {
                    tag.to_string()
                } else {
                    format!("#{}", tag)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Character count of the copyable text, as a platform would count it.
    pub fn character_count(&self) -> usize {
        self.clipboard_text().chars().count()
    }
}

/// Exactly three variations for one platform, in model output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationTriple([Variation; VARIATIONS_PER_PLATFORM]);

impl VariationTriple {
    pub fn new(variations: [Variation; VARIATIONS_PER_PLATFORM]) -> Self {
        Self(variations)
    }

    /// Zero-based access; index 0 is "Variation 1".
    pub fn get(&self, index: usize) -> Option<&Variation> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variation> {
        self.0.iter()
    }
}

impl TryFrom<Vec<Variation>> for VariationTriple {
    type Error = Vec<Variation>;

    /// Succeeds only for exactly three variations; hands the vector back otherwise.
    fn try_from(variations: Vec<Variation>) -> Result<Self, Self::Error> {
        <[Variation; VARIATIONS_PER_PLATFORM]>::try_from(variations).map(Self)
    }
}

impl<'a> IntoIterator for &'a VariationTriple {
    type Item = &'a Variation;
    type IntoIter = std::slice::Iter<'a, Variation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Platform key → its validated triple, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformResult(IndexMap<String, VariationTriple>);

impl PlatformResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platform(mut self, key: impl Into<String>, triple: VariationTriple) -> Self {
        self.0.insert(key.into(), triple);
        self
    }

    pub fn get(&self, key: &str) -> Option<&VariationTriple> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariationTriple)> {
        self.0.iter().map(|(key, triple)| (key.as_str(), triple))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, VariationTriple)> for PlatformResult {
    fn from_iter<I: IntoIterator<Item = (K, VariationTriple)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// What the caller receives: either every platform's triple or one error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success { data: PlatformResult },
    Failure { error: String },
}

impl GenerationOutcome {
    pub fn failure(error: impl fmt::Display) -> Self {
        Self::Failure {
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl<E: fmt::Display> From<Result<PlatformResult, E>> for GenerationOutcome {
    fn from(result: Result<PlatformResult, E>) -> Self {
        match result {
            Ok(data) => Self::Success { data },
            Err(e) => Self::failure(e),
        }
    }
}

// `{ "success": true, "data": ... }` / `{ "success": false, "error": ... }`
impl Serialize for GenerationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut envelope = serializer.serialize_struct("GenerationOutcome", 2)?;
        match self {
            Self::Success { data } => {
                envelope.serialize_field("success", &true)?;
                envelope.serialize_field("data", data)?;
            }
            Self::Failure { error } => {
                envelope.serialize_field("success", &false)?;
                envelope.serialize_field("error", error)?;
            }
        }
        envelope.end()
    }
}
