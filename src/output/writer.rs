// src/output/writer.rs
//! Executes output plans. The only place the CLI touches files, the
//! clipboard, or stdout.

use super::clipboard::copy_to_clipboard;
use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Runs every operation in order; a failure is recorded and the rest still run.
pub fn deliver(plan: OutputPlan) -> OutputReport {
    log::debug!("Executing output plan with {} operations", plan.operations.len());

    let report = plan
        .operations
        .into_iter()
        .fold(OutputReport::new(), |report, operation| {
            match execute_operation(&operation) {
                Ok(bytes_written) => report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                }),
                Err(e) => {
                    log::error!("Failed to {}: {}", operation.describe(), e);
                    report.with_failed(FailedOperation {
                        operation,
                        error: e.to_string(),
                    })
                }
            }
        });

    log::debug!(
        "Output plan complete: {} succeeded, {} failed, {} bytes",
        report.completed.len(),
        report.failed.len(),
        report.bytes_written()
    );
    report
}

/// Converts a report with failures into an error.
pub fn ensure_delivered(report: &OutputReport) -> Result<(), AppError> {
    if report.is_success() {
        return Ok(());
    }
    Err(AppError::DeliveryFailed {
        failures: report
            .failed
            .iter()
            .map(|failed| format!("{}: {}", failed.operation.describe(), failed.error))
            .collect(),
    })
}

fn execute_operation(operation: &DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::CopyToClipboard { content, label } => {
            copy_to_clipboard(content)?;
            eprintln!("Copied {} to clipboard", label);
            Ok(content.len())
        }
        DeliveryTarget::PrintToStdout { content } => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(content.len())
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    log::info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(content.len())
}
