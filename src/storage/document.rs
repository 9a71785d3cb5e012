use std::io;

/// Access to the documents of a vault, addressed by vault-relative paths.
pub trait DocumentStore {
    /// Reads the full text of a document.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::NotFound`] if no document exists at `path`.
    fn read(&self, path: &str) -> Result<String, ReadError>;

    /// Replaces the text of a document, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn write(&mut self, path: &str, content: &str) -> io::Result<()>;

    /// Checks whether a document exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Lists every document path in the vault, sorted.
    fn documents(&self) -> Vec<String>;
}

/// Errors that can occur when reading a document.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// No document exists at the path.
    #[error("document not found")]
    NotFound,

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ReadError {
    /// Maps an I/O error, treating `NotFound` as a missing document.
    #[must_use]
    pub fn from_io(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Io(error),
        }
    }
}
