use std::{
    io::{self, Write},
    process::{Command, Stdio},
};

/// Somewhere text can be copied to.
pub trait ClipboardWriter {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if no clipboard mechanism accepted the text.
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Errors that can occur when copying to the clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard mechanism accepted the text.
    #[error("Failed to copy to clipboard ({})", describe_attempts(.attempts))]
    Unavailable {
        /// Each mechanism that was tried, and why it failed.
        attempts: Vec<(String, String)>,
    },
}

fn describe_attempts(attempts: &[(String, String)]) -> String {
    if attempts.is_empty() {
        return "no clipboard mechanism available".to_string();
    }
    attempts
        .iter()
        .map(|(backend, reason)| format!("{backend}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The operating system clipboard.
///
/// Mechanisms are tried in platform order until one accepts the text. On
/// Linux the clipboard commands come first: they keep serving the selection
/// after this process exits, which the in-process API does not.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut attempts = Vec::new();
        for backend in backends() {
            match backend.copy(text) {
                Ok(()) => {
                    tracing::debug!("Copied to clipboard with {}", backend.name());
                    return Ok(());
                }
                Err(reason) => {
                    tracing::debug!("Clipboard backend {} failed: {reason}", backend.name());
                    attempts.push((backend.name().to_string(), reason));
                }
            }
        }

        Err(ClipboardError::Unavailable { attempts })
    }
}

/// One way of placing text on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    /// The platform clipboard API, held by this process.
    Api,

    /// A command that reads the text from stdin.
    Command(&'static str, &'static [&'static str]),
}

impl Backend {
    const fn name(self) -> &'static str {
        match self {
            Self::Api => "clipboard API",
            Self::Command(program, _) => program,
        }
    }

    fn copy(self, text: &str) -> Result<(), String> {
        match self {
            Self::Api => arboard::Clipboard::new()
                .and_then(|mut clipboard| clipboard.set_text(text))
                .map_err(|e| e.to_string()),
            Self::Command(program, args) => {
                pipe_to(program, args, text).map_err(|e| e.to_string())
            }
        }
    }
}

#[cfg(target_os = "macos")]
const fn backends() -> &'static [Backend] {
    &[Backend::Api, Backend::Command("pbcopy", &[])]
}

#[cfg(target_os = "windows")]
const fn backends() -> &'static [Backend] {
    &[Backend::Api, Backend::Command("clip", &[])]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const fn backends() -> &'static [Backend] {
    &[
        Backend::Command("wl-copy", &[]),
        Backend::Command("xclip", &["-selection", "clipboard"]),
        Backend::Command("xsel", &["--clipboard", "--input"]),
        Backend::Api,
    ]
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(text.as_bytes()) {
            drop(stdin);
            // the child may still be running; reap it before reporting
            if child.kill().is_err() {
                tracing::debug!("{program} already exited");
            }
            child.wait()?;
            return Err(e);
        }
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{program} exited with {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_error_lists_attempts() {
        let error = ClipboardError::Unavailable {
            attempts: vec![
                ("xclip".to_string(), "not found".to_string()),
                ("clipboard API".to_string(), "no display".to_string()),
            ],
        };
        assert_eq!(
            error.to_string(),
            "Failed to copy to clipboard (xclip: not found; clipboard API: no display)"
        );
    }

    #[test]
    fn unavailable_error_without_attempts() {
        let error = ClipboardError::Unavailable {
            attempts: Vec::new(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to copy to clipboard (no clipboard mechanism available)"
        );
    }

    #[test]
    fn pipe_to_missing_program_fails() {
        assert!(pipe_to("tstat-no-such-clipboard-program", &[], "text").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn pipe_to_reports_a_reader_that_exits_early() {
        // more than a pipe buffer, so the write can't complete before `true` exits
        let text = "x".repeat(1 << 20);
        assert!(pipe_to("true", &[], &text).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn pipe_to_reports_a_failing_command() {
        let error = pipe_to("false", &[], "").unwrap_err();
        assert!(error.to_string().starts_with("false exited with"));
    }

    #[test]
    fn every_platform_has_a_command_and_the_api() {
        assert!(backends().contains(&Backend::Api));
        assert!(
            backends()
                .iter()
                .any(|backend| matches!(backend, Backend::Command(..)))
        );
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    #[test]
    fn linux_prefers_commands_over_the_api() {
        let names: Vec<&str> = backends().iter().map(|backend| backend.name()).collect();
        assert_eq!(names, ["wl-copy", "xclip", "xsel", "clipboard API"]);
    }

    #[cfg(any(target_os = "macos", target_os = "windows"))]
    #[test]
    fn api_is_tried_first_elsewhere() {
        assert_eq!(backends().first(), Some(&Backend::Api));
    }
}
