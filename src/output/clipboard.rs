// src/output/clipboard.rs
//! System clipboard access: arboard first, then the platform's CLI tools.

use crate::error::AppError;
use std::io::Write;
use std::process::{Command, Stdio};

/// Copies text to the system clipboard.
pub fn copy_to_clipboard(content: &str) -> Result<(), AppError> {
    log::debug!("Copying {} characters to clipboard", content.chars().count());

    match copy_with_arboard(content) {
        Ok(()) => {
            log::debug!("Copied to clipboard using arboard");
            return Ok(());
        }
        Err(e) => log::debug!("arboard failed: {}, trying clipboard commands", e),
    }

    let mut last_error = AppError::Clipboard("No clipboard command available on this platform".to_string());
    for (program, args) in clipboard_commands() {
        match pipe_to_command(program, args, content) {
            Ok(()) => {
                log::debug!("Copied to clipboard using {}", program);
                return Ok(());
            }
            Err(e) => {
                log::debug!("{} failed: {}", program, e);
                last_error = e;
            }
        }
    }

    log::error!("Failed to copy to clipboard: {}", last_error);
    Err(last_error)
}

fn copy_with_arboard(content: &str) -> Result<(), AppError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(content)?;
    Ok(())
}

type ClipboardCommand = (&'static str, &'static [&'static str]);

const PBCOPY: ClipboardCommand = ("pbcopy", &[]);
const CLIP: ClipboardCommand = ("clip", &[]);
const WL_COPY: ClipboardCommand = ("wl-copy", &[]);
const XCLIP: ClipboardCommand = ("xclip", &["-selection", "clipboard"]);

/// Candidate commands, most likely first.
fn clipboard_commands() -> Vec<ClipboardCommand> {
    if cfg!(target_os = "macos") {
        vec![PBCOPY]
    } else if cfg!(target_os = "windows") {
        vec![CLIP]
    } else if cfg!(target_os = "linux") {
        let wayland = std::env::var("WAYLAND_DISPLAY").is_ok()
            || std::env::var("XDG_SESSION_TYPE").is_ok_and(|s| s == "wayland");
        if wayland {
            vec![WL_COPY, XCLIP]
        } else {
            vec![XCLIP, WL_COPY]
        }
    } else {
        Vec::new()
    }
}

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
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_command_is_a_clipboard_error() {
        let err = pipe_to_command("hypegen-no-such-clipboard-tool", &[], "x").unwrap_err();
        assert!(matches!(err, AppError::Clipboard(_)));
    }

    #[test]
    #[ignore] // Requires clipboard access
    fn test_copy_variation_text() {
        assert!(copy_to_clipboard("Big news\n\nOut now.\n\n#rust").is_ok());
    }
}
