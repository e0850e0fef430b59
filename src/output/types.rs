// src/output/types.rs
//! Immutable plan and report types for CLI output.

use crate::types::Platform;
use std::path::PathBuf;

/// How the `generate` command should deliver a successful result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOptions {
    /// Print the JSON envelope instead of the text rendering
    pub json: bool,
    /// Also write the rendering to this file
    pub output_file: Option<PathBuf>,
    /// Copy one variation of this platform to the clipboard
    pub copy: Option<Platform>,
    /// 1-based variation number used with `copy`
    pub variation: usize,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            json: false,
            output_file: None,
            copy: None,
            variation: 1,
        }
    }
}

/// Ordered list of delivery operations.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }
}

/// A single output operation.
#[derive(Debug, Clone)]
pub enum DeliveryTarget {
    WriteFile { path: PathBuf, content: String },
    /// `label` names what was copied, for the confirmation message
    CopyToClipboard { content: String, label: String },
    PrintToStdout { content: String },
}

impl DeliveryTarget {
    pub fn describe(&self) -> String {
        match self {
            DeliveryTarget::WriteFile { path, .. } => format!("write {}", path.display()),
            DeliveryTarget::CopyToClipboard { label, .. } => format!("copy {}", label),
            DeliveryTarget::PrintToStdout { .. } => "print to stdout".to_string(),
        }
    }
}

/// Result of executing an output plan.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub completed: Vec<CompletedOperation>,
    pub failed: Vec<FailedOperation>,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(mut self, operation: CompletedOperation) -> Self {
        self.completed.push(operation);
        self
    }

    pub fn with_failed(mut self, operation: FailedOperation) -> Self {
        self.failed.push(operation);
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn bytes_written(&self) -> usize {
        self.completed.iter().map(|op| op.bytes_written).sum()
    }
}

#[derive(Debug, Clone)]
pub struct CompletedOperation {
    pub operation: DeliveryTarget,
    pub bytes_written: usize,
}

#[derive(Debug, Clone)]
pub struct FailedOperation {
    pub operation: DeliveryTarget,
    pub error: String,
}
