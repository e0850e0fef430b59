// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story
//! of how a generation request is shaped: how many variations come back,
//! how long we wait for the model, how much transcript we send.

// ---------------------------------------------------------------------------
// Response contract
// ---------------------------------------------------------------------------

/// How many variations the model must return for every platform.
///
/// The presentation layer indexes variations positionally ("Variation 1/2/3"),
/// so this is an exact count, never a minimum.
pub const VARIATIONS_PER_PLATFORM: usize = 3;

/// Object keys accepted as the envelope around the variations sequence.
pub const VARIATIONS_ENVELOPE_KEYS: &[&str] = &["variations"];

// ---------------------------------------------------------------------------
// Completion provider defaults
// ---------------------------------------------------------------------------

/// Model used when neither `--model` nor `OPENAI_MODEL` is given.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Base URL of the OpenAI-compatible chat completions API.
pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.openai.com/v1";

/// Sampling temperature for every completion call.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Upper bound on a single completion call, in seconds.
///
/// Platform calls run concurrently, so this is also roughly the upper
/// bound on a whole generation request.
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 60;

// ---------------------------------------------------------------------------
// Transcript boundaries
// ---------------------------------------------------------------------------

/// Maximum transcript characters embedded into a prompt.
///
/// Long videos produce transcripts far beyond what the copy needs; the
/// opening of the video carries the hook.
pub const TRANSCRIPT_MAX_PROMPT_CHARS: usize = 12_000;

/// Caption language requested when a video offers several tracks.
pub const DEFAULT_TRANSCRIPT_LANGUAGE: &str = "en";

/// Base URL for watch pages.
pub const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Character ceiling of a single post on Twitter.
pub const TWITTER_CHARACTER_LIMIT: usize = 280;

// ---------------------------------------------------------------------------
// HTTP boundary
// ---------------------------------------------------------------------------

/// Address the server binds when neither `--bind` nor `HYPEGEN_BIND` is set.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Largest request body accepted by `POST /generate`.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when logging raw model output or error bodies.
pub const RAW_CONTENT_PREVIEW_LENGTH: usize = 200;
