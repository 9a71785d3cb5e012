use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};

/// Something that can show a document to the user.
pub trait DocumentOpener {
    /// Opens the document at the vault-relative `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document couldn't be opened.
    fn open(&mut self, path: &str) -> Result<(), OpenError>;
}

/// Errors that can occur when opening a document.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The document doesn't exist.
    #[error("Status file {0} not found")]
    NotFound(String),

    /// The platform opener couldn't be started or reported failure.
    #[error("Error opening file {path}")]
    Launch {
        /// The document that failed to open.
        path: String,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
}

/// Opens documents with the operating system's default application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemOpener {
    root: PathBuf,
}

impl SystemOpener {
    /// An opener for documents in the vault at `root`.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl DocumentOpener for SystemOpener {
    fn open(&mut self, path: &str) -> Result<(), OpenError> {
        let file_path = self.root.join(path);
        if !file_path.is_file() {
            return Err(OpenError::NotFound(path.to_string()));
        }

        tracing::debug!("Opening {}", file_path.display());
        launch(&file_path).map_err(|source| OpenError::Launch {
            path: path.to_string(),
            source,
        })
    }
}

#[cfg(target_os = "macos")]
fn launch(file_path: &Path) -> io::Result<()> {
    run(Command::new("open").arg(file_path))
}

#[cfg(target_os = "windows")]
fn launch(file_path: &Path) -> io::Result<()> {
    run(Command::new("cmd").args(["/C", "start", ""]).arg(file_path))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn launch(file_path: &Path) -> io::Result<()> {
    run(Command::new("xdg-open").arg(file_path))
}

/// Runs a launcher to completion. Launchers hand the document to another
/// application and exit, so a non-zero status means nothing was opened.
fn run(command: &mut Command) -> io::Result<()> {
    let status = command.status()?;
    if status.success() {
        Ok(())
    } else {
        let program = command.get_program().to_string_lossy().into_owned();
        Err(io::Error::other(format!("{program} exited with {status}")))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_document_is_not_launched() {
        let tmp = TempDir::new().unwrap();
        let mut opener = SystemOpener::new(tmp.path().to_path_buf());

        let error = opener.open("Status.md").unwrap_err();

        assert!(matches!(error, OpenError::NotFound(ref path) if path == "Status.md"));
        assert_eq!(error.to_string(), "Status file Status.md not found");
    }

    #[cfg(unix)]
    #[test]
    fn failing_launcher_is_an_error() {
        let error = run(&mut Command::new("false")).unwrap_err();
        assert!(error.to_string().starts_with("false exited with"));
    }

    #[cfg(unix)]
    #[test]
    fn successful_launcher() {
        assert!(run(&mut Command::new("true")).is_ok());
    }

    #[test]
    fn missing_launcher_is_an_error() {
        assert!(run(&mut Command::new("tstat-no-such-opener")).is_err());
    }
}
