// src/output/clipboard.rs
//! Clipboard access: arboard first, then the platform's own copy command.

use crate::error::AppError;
use std::io::Write;
use std::process::{Command, Stdio};

/// Copies content to the system clipboard.
pub fn copy_to_clipboard(content: &str) -> Result<(), AppError> {
    log::debug!("Copying {} characters to clipboard", content.len());

    match copy_with_arboard(content) {
        Ok(()) => {
            log::info!("Content copied to clipboard using arboard");
            return Ok(());
        }
        Err(e) => log::debug!("Arboard failed: {}, trying platform command", e),
    }

    let (program, args) = platform_command()?;
    pipe_to_command(program, args, content)?;
    log::info!("Content copied to clipboard using {}", program);
    Ok(())
}

fn copy_with_arboard(content: &str) -> Result<(), AppError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(content)?;
    Ok(())
}

/// The copy command for this platform, with its arguments.
fn platform_command() -> Result<(&'static str, &'static [&'static str]), AppError> {
    if cfg!(target_os = "macos") {
        Ok(("pbcopy", &[]))
    } else if cfg!(target_os = "windows") {
        Ok(("clip", &[]))
    } else if cfg!(target_os = "linux") {
        let is_wayland = std::env::var("WAYLAND_DISPLAY").is_ok()
            || std::env::var("XDG_SESSION_TYPE").is_ok_and(|s| s == "wayland");
        if is_wayland {
            Ok(("wl-copy", &[]))
        } else {
            Ok(("xclip", &["-selection", "clipboard"]))
        }
    } else {
        Err(AppError::Clipboard(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

/// Run `program`, feeding `content` on stdin.
fn pipe_to_command(program: &str, args: &[&str], content: &str) -> Result<(), AppError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| AppError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(content.as_bytes())
            .map_err(|e| AppError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| AppError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(AppError::Clipboard(format!(
            "{} failed: {}",
            program,
            String::from_utf8_lossy(&output.stderr)
        )))
    }
}
