// src/output/types.rs
//! Plans for delivering a document, and what came of them.

use std::fmt;
use std::path::PathBuf;

/// Everything to do with one rendered document.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub targets: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: DeliveryTarget) -> Self {
        self.targets.push(target);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A single place the document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    WriteFile { path: PathBuf, content: String },
    CopyToClipboard { content: String },
    PrintToStdout { content: String },
}

impl fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryTarget::WriteFile { path, .. } => write!(f, "file {}", path.display()),
            DeliveryTarget::CopyToClipboard { .. } => write!(f, "clipboard"),
            DeliveryTarget::PrintToStdout { .. } => write!(f, "stdout"),
        }
    }
}

/// Outcome of executing an [`OutputPlan`].
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    /// Targets written, with the number of bytes each received.
    pub completed: Vec<(DeliveryTarget, usize)>,
    /// Targets that failed, with the error text.
    pub failed: Vec<(DeliveryTarget, String)>,
    pub duration_ms: u64,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn bytes_written(&self) -> usize {
        self.completed.iter().map(|(_, bytes)| bytes).sum()
    }

    /// One line per failure, naming the target.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|(target, error)| format!("{}: {}", target, error))
            .collect()
    }
}
