// src/output/render.rs
//! Terminal rendering of generated variations, and delivery planning.

use super::types::{DeliveryOptions, DeliveryTarget, OutputPlan};
use crate::constants::VARIATIONS_PER_PLATFORM;
use crate::error::AppError;
use crate::types::{GenerationOutcome, Platform, PlatformResult, ValidationError, Variation};
use std::fmt::Write;

/// Human-readable rendering: one section per platform, "Variation N" per item.
pub fn render_text(result: &PlatformResult) -> Result<String, AppError> {
    let mut out = String::new();

    for (key, triple) in result.iter() {
        let limit = key.parse::<Platform>().ok().and_then(Platform::character_limit);
        writeln!(out, "=== {} ===", Platform::display_name_for_key(key))?;

        for (index, variation) in triple.iter().enumerate() {
            writeln!(out)?;
            render_variation(&mut out, index + 1, variation, limit)?;
        }
        writeln!(out)?;
    }

    Ok(out)
}

fn render_variation(
    out: &mut String,
    number: usize,
    variation: &Variation,
    limit: Option<usize>,
) -> Result<(), AppError> {
    writeln!(out, "--- Variation {} ---", number)?;
    writeln!(out, "Topic: {}", variation.topic)?;
    writeln!(out, "Hook: {}", variation.hook)?;
    writeln!(out, "{}", variation.description)?;

    let hashtags = variation.hashtags();
    if !hashtags.is_empty() {
        writeln!(out, "{}", hashtags)?;
    }

    let count = variation.character_count();
    match limit {
        Some(limit) if count > limit => {
            writeln!(out, "[{}/{} characters, over the limit by {}]", count, limit, count - limit)?
        }
        Some(limit) => writeln!(out, "[{}/{} characters]", count, limit)?,
        None => writeln!(out, "[{} characters]", count)?,
    }
    Ok(())
}

/// The `{ success, data | error }` envelope, pretty-printed.
pub fn render_json(outcome: &GenerationOutcome) -> Result<String, AppError> {
    serde_json::to_string_pretty(outcome).map_err(|e| AppError::InternalError {
        message: "Failed to serialize outcome".to_string(),
        source: Some(Box::new(e)),
    })
}

/// Picks "Variation N" (1-based) of a platform's triple.
pub fn select_variation<'a>(
    result: &'a PlatformResult,
    platform: Platform,
    number: usize,
) -> Result<&'a Variation, AppError> {
    let triple = result.get(platform.key()).ok_or_else(|| {
        ValidationError::UnknownPlatform(format!("{} was not generated", platform.key()))
    })?;

    if !(1..=VARIATIONS_PER_PLATFORM).contains(&number) {
        return Err(ValidationError::OutOfBounds {
            value: number,
            min: 1,
            max: VARIATIONS_PER_PLATFORM,
        }
        .into());
    }

    triple
        .get(number - 1)
        .ok_or_else(|| AppError::InternalError {
            message: format!("Variation {} missing from a validated triple", number),
            source: None,
        })
}

/// Plans where a successful result goes.
pub fn plan_delivery(result: &PlatformResult, options: &DeliveryOptions) -> Result<OutputPlan, AppError> {
    let rendered = if options.json {
        render_json(&GenerationOutcome::Success {
            data: result.clone(),
        })?
    } else {
        render_text(result)?
    };

    let mut plan = OutputPlan::new();

    if let Some(path) = &options.output_file {
        plan = plan.with_operation(DeliveryTarget::WriteFile {
            path: path.clone(),
            content: rendered.clone(),
        });
    }

    if let Some(platform) = options.copy {
        let variation = select_variation(result, platform, options.variation)?;
        plan = plan.with_operation(DeliveryTarget::CopyToClipboard {
            content: variation.clipboard_text(),
            label: format!("{} variation {}", platform.display_name(), options.variation),
        });
    }

    Ok(plan.with_operation(DeliveryTarget::PrintToStdout { content: rendered }))
}
