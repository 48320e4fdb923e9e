// src/output/writer.rs
//! Executes output plans by performing the actual I/O.

use super::clipboard::copy_to_clipboard;
use super::types::{DeliveryTarget, OutputPlan, OutputReport};
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Deliver to every target in the plan.
///
/// A failing target does not stop the others; failures are collected in the
/// report for the caller to judge.
pub fn deliver(plan: OutputPlan) -> OutputReport {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::info!("Delivering to {} target(s)", plan.targets.len());

    for target in plan.targets {
        match execute(&target) {
            Ok(bytes) => {
                log::info!("Delivered {} bytes to {}", bytes, target);
                report.completed.push((target, bytes));
            }
            Err(e) => {
                log::error!("Delivery to {} failed: {}", target, e);
                report.failed.push((target, e.to_string()));
            }
        }
    }

    report.duration_ms = start_time.elapsed().as_millis() as u64;
    report
}

fn execute(target: &DeliveryTarget) -> Result<usize, AppError> {
    match target {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::CopyToClipboard { content } => {
            copy_to_clipboard(content)?;
            Ok(content.len())
        }
        DeliveryTarget::PrintToStdout { content } => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", content)?;
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
    Ok(content.len())
}
