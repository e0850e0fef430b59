// src/main.rs
use clap::Parser;
use hypegen::output::{self, DeliveryOptions};
use hypegen::{
    AppError, AppState, CommandLineInput, GenerateRequest, GenerationOrchestrator,
    GenerationOutcome, HypePipeline, OpenAiHttpClient, PromptBuilder, RequestId, RunMode,
    ServiceConfig, YoutubeTranscriptClient,
};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console output goes to stderr so `generate` can be piped.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("hypegen.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}"
    } else {
        "{d(%H:%M:%S)} [{l}] - {m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Wires the adapters once; every request shares them.
fn build_pipeline(config: &ServiceConfig) -> Result<HypePipeline, AppError> {
    let gateway = Arc::new(OpenAiHttpClient::new(&config.api_key, config.base_url.as_str())?);
    let transcripts = Arc::new(YoutubeTranscriptClient::new(
        config.transcript_base_url.as_str(),
        &config.transcript_language,
    )?);
    let prompts = Arc::new(PromptBuilder::new()?);

    let orchestrator =
        GenerationOrchestrator::new(gateway, prompts, config.model.clone(), config.call_timeout);

    log::info!(
        "Using model {} at {} for {}",
        config.model,
        config.base_url,
        config
            .platforms
            .iter()
            .map(|p| p.key())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(HypePipeline::new(orchestrator, transcripts, config.platforms.clone()))
}

/// Runs one generation and delivers it; failures print the error envelope.
async fn generate_once(
    pipeline: &HypePipeline,
    request: &GenerateRequest,
    delivery: &DeliveryOptions,
) -> Result<(), AppError> {
    let request_id = RequestId::new();

    let result = match pipeline.run(request_id, request).await {
        Ok(result) => result,
        Err(e) => {
            if delivery.json {
                println!("{}", output::render_json(&GenerationOutcome::failure(&e))?);
            }
            return Err(e);
        }
    };

    let plan = output::plan_delivery(&result, delivery)?;
    let report = output::deliver(plan);
    output::ensure_delivered(&report)
}

async fn execute(config: ServiceConfig) -> Result<(), AppError> {
    let pipeline = build_pipeline(&config)?;

    match config.mode {
        RunMode::Serve { bind } => hypegen::serve(AppState::new(pipeline), bind).await,
        RunMode::Generate { request, delivery } => {
            generate_once(&pipeline, &request, &delivery).await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = match ServiceConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return Ok(ExitCode::from(2));
        }
    };

    match execute(config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            log::error!("{} ({})", e, e.kind());
            Ok(ExitCode::FAILURE)
        }
    }
}
