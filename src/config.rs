// src/config.rs
use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_COMPLETION_TIMEOUT_SECS, DEFAULT_MODEL, DEFAULT_PROVIDER_BASE_URL,
    DEFAULT_TRANSCRIPT_LANGUAGE, VARIATIONS_PER_PLATFORM, YOUTUBE_BASE_URL,
};
use crate::error::AppError;
use crate::output::DeliveryOptions;
use crate::request::GenerateRequest;
use crate::types::{ApiKey, ModelName, Platform, ValidatedUrl, ValidationError};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Longest completion timeout accepted on the command line, in seconds.
const MAX_TIMEOUT_SECS: u64 = 600;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(name = "hypegen", author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Completion model name
    #[arg(long, global = true, env = "OPENAI_MODEL")]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, global = true, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-call completion timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_COMPLETION_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Platforms to generate for, comma separated (twitter,instagram,tiktok,youtube)
    #[arg(long, global = true, value_delimiter = ',')]
    pub platforms: Vec<Platform>,

    /// Preferred caption language for video transcripts
    #[arg(long, global = true, default_value = DEFAULT_TRANSCRIPT_LANGUAGE)]
    pub language: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP service (the default)
    Serve(ServeArgs),
    /// Generate copy once and print it
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "HYPEGEN_BIND")]
    pub bind: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// YouTube video URL to build the copy from
    #[arg(long, conflicts_with_all = ["topic", "highlight"], required_unless_present = "topic")]
    pub url: Option<String>,

    /// Topic of the content (direct-topic flow)
    #[arg(long, requires = "highlight")]
    pub topic: Option<String>,

    /// Key highlight to emphasize (direct-topic flow)
    #[arg(long)]
    pub highlight: Option<String>,

    /// Kind of content, e.g. "Stream VOD", "YouTube Video", "Podcast Episode"
    #[arg(long, default_value = "YouTube Video")]
    pub content_type: String,

    /// Tone of the copy, e.g. Excited, Funny, Informative, Intriguing, Urgent
    #[arg(long)]
    pub vibe: String,

    /// Copy one variation of this platform to the clipboard
    #[arg(long)]
    pub copy: Option<Platform>,

    /// Which variation to copy (1-3)
    #[arg(long, default_value_t = 1)]
    pub variation: usize,

    /// Also write the output to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the JSON envelope instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// What the binary should do once configured.
#[derive(Debug, Clone)]
pub enum RunMode {
    Serve {
        bind: SocketAddr,
    },
    Generate {
        request: GenerateRequest,
        delivery: DeliveryOptions,
    },
}

/// Resolved service configuration, immutable after startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_key: ApiKey,
    pub model: ModelName,
    pub base_url: ValidatedUrl,
    pub transcript_base_url: ValidatedUrl,
    pub transcript_language: String,
    pub call_timeout: Duration,
    pub platforms: Vec<Platform>,
    pub mode: RunMode,
}

impl ServiceConfig {
    /// Resolves the configuration from CLI input and the environment.
    ///
    /// A missing `OPENAI_API_KEY` is fatal here, before anything binds.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AppError::MissingConfiguration("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        Self::resolve_with_api_key(cli, &api_key)
    }

    pub fn resolve_with_api_key(cli: CommandLineInput, api_key: &str) -> Result<Self, AppError> {
        let api_key = ApiKey::new(api_key)?;
        let model = ModelName::new(cli.model.as_deref().unwrap_or(DEFAULT_MODEL))?;
        let base_url = ValidatedUrl::parse(cli.base_url.as_deref().unwrap_or(DEFAULT_PROVIDER_BASE_URL))?;
        let transcript_base_url = ValidatedUrl::parse(YOUTUBE_BASE_URL)?;

        if !(1..=MAX_TIMEOUT_SECS).contains(&cli.timeout_secs) {
            return Err(ValidationError::OutOfBounds {
                value: cli.timeout_secs as usize,
                min: 1,
                max: MAX_TIMEOUT_SECS as usize,
            }
            .into());
        }

        let mode = match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
            Command::Serve(args) => RunMode::Serve {
                bind: parse_bind(args.bind.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS))?,
            },
            Command::Generate(args) => resolve_generate(args)?,
        };

        Ok(ServiceConfig {
            api_key,
            model,
            base_url,
            transcript_base_url,
            transcript_language: cli.language,
            call_timeout: Duration::from_secs(cli.timeout_secs),
            platforms: dedupe_platforms(cli.platforms),
            mode,
        })
    }
}

fn parse_bind(bind: &str) -> Result<SocketAddr, AppError> {
    bind.parse().map_err(|e| {
        AppError::MissingConfiguration(format!("Invalid bind address {}: {}", bind, e))
    })
}

/// Builds the same request the HTTP boundary would receive.
fn resolve_generate(args: GenerateArgs) -> Result<RunMode, AppError> {
    let body = match &args.url {
        Some(url) => json!({ "url": url, "vibe": args.vibe }),
        None => json!({
            "contentType": args.content_type,
            "topic": args.topic,
            "highlight": args.highlight,
            "vibe": args.vibe,
        }),
    };
    let request = GenerateRequest::from_value(body)?;

    if !(1..=VARIATIONS_PER_PLATFORM).contains(&args.variation) {
        return Err(ValidationError::OutOfBounds {
            value: args.variation,
            min: 1,
            max: VARIATIONS_PER_PLATFORM,
        }
        .into());
    }

    Ok(RunMode::Generate {
        request,
        delivery: DeliveryOptions {
            json: args.json,
            output_file: args.output,
            copy: args.copy,
            variation: args.variation,
        },
    })
}

/// Request order, duplicates dropped; the default set when none are given.
fn dedupe_platforms(requested: Vec<Platform>) -> Vec<Platform> {
    if requested.is_empty() {
        return Platform::DEFAULT_SET.to_vec();
    }
    let mut platforms = Vec::with_capacity(requested.len());
    for platform in requested {
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }
    platforms
}
