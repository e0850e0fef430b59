// src/validation.rs
//! Structural validation of raw model output.
//!
//! The completion provider hands back an opaque string that is supposed to be
//! JSON. Nothing downstream is allowed to see it until it has been turned into
//! a [`VariationTriple`] here. Each step is a hard gate and the first failing
//! gate decides the error:
//!
//! 1. presence (absent or empty text)
//! 2. JSON syntax, with no repair of fences or surrounding prose
//! 3. root shape: a bare array, or an object whose single key is a
//!    recognized envelope key holding an array
//! 4. arity: exactly three elements
//! 5. item shape: every element deserializes into [`Variation`]
//!
//! The item schema is the derived `Deserialize` of [`Variation`], so the
//! structural contract lives in exactly one place.

use crate::constants::{RAW_CONTENT_PREVIEW_LENGTH, VARIATIONS_ENVELOPE_KEYS, VARIATIONS_PER_PLATFORM};
use crate::error::ResponseValidationError;
use crate::types::{Variation, VariationTriple};
use serde_json::Value;

/// Validates raw model output for one platform into exactly three variations.
///
/// Pure: the same input always yields a structurally equal result.
pub fn validate(
    platform: &str,
    raw_content: Option<&str>,
) -> Result<VariationTriple, ResponseValidationError> {
    let raw = match raw_content {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            log::warn!("No content returned by the model for {}", platform);
            return Err(ResponseValidationError::MissingContent {
                platform: platform.to_string(),
            });
        }
    };

    let parsed: Value = serde_json::from_str(raw).map_err(|e| {
        log::warn!(
            "Model output for {} is not valid JSON ({}): {}",
            platform,
            e,
            preview(raw)
        );
        ResponseValidationError::MalformedJson {
            platform: platform.to_string(),
        }
    })?;

    let items = extract_sequence(parsed).ok_or_else(|| {
        log::warn!(
            "Model output for {} has an unrecognized root shape: {}",
            platform,
            preview(raw)
        );
        ResponseValidationError::InvalidRootShape {
            platform: platform.to_string(),
        }
    })?;

    if items.len() != VARIATIONS_PER_PLATFORM {
        log::warn!(
            "Model output for {} has {} variations, expected {}",
            platform,
            items.len(),
            VARIATIONS_PER_PLATFORM
        );
        return Err(ResponseValidationError::InvalidArity {
            platform: platform.to_string(),
            got: items.len(),
        });
    }

    let variations = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Variation>(item).map_err(|e| {
                log::warn!(
                    "Variation {} for {} is malformed: {}",
                    index,
                    platform,
                    e
                );
                ResponseValidationError::InvalidItemShape {
                    platform: platform.to_string(),
                    index,
                    reason: e.to_string(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Length was checked above
    VariationTriple::try_from(variations).map_err(|variations| {
        ResponseValidationError::InvalidArity {
            platform: platform.to_string(),
            got: variations.len(),
        }
    })
}

/// Pulls the variation sequence out of either accepted root shape.
///
/// Returns `None` for any other shape, including an array made up entirely
/// of JSON primitives (null, booleans, numbers, strings).
fn extract_sequence(root: Value) -> Option<Vec<Value>> {
    let items = match root {
        Value::Array(items) => items,
        Value::Object(map) if map.len() == 1 => {
            let (key, inner) = map.into_iter().next()?;
            if !VARIATIONS_ENVELOPE_KEYS.contains(&key.as_str()) {
                return None;
            }
            match inner {
                Value::Array(items) => items,
                _ => return None,
            }
        }
        _ => return None,
    };

    let all_scalars = !items.is_empty()
        && items
            .iter()
            .all(|item| {
                matches!(
                    item,
                    Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
                )
            });
    if all_scalars {
        return None;
    }

    Some(items)
}

/// Truncated view of raw model output for log lines.
pub(crate) fn preview(raw: &str) -> String {
    match raw.char_indices().nth(RAW_CONTENT_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &raw[..cut]),
        None => raw.to_string(),
    }
}
