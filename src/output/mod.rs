// src/output/mod.rs
//! CLI output, with planning kept separate from execution.
//!
//! Rendering and planning are pure functions; `writer` performs the I/O.

mod clipboard;
mod render;
mod types;
mod writer;

pub use clipboard::copy_to_clipboard;
pub use render::{plan_delivery, render_json, render_text, select_variation};
pub use types::{DeliveryOptions, DeliveryTarget, OutputPlan, OutputReport};
pub use writer::{deliver, ensure_delivered};
