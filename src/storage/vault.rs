//! A filesystem backed store of documents
//!
//! The [`Vault`] maps vault-relative paths like `Projects/Tasks.md` onto a
//! root directory.

use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::storage::{DocumentStore, ReadError, CONFIG_DIR};

/// A directory of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// Opens a vault at the given directory.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolves a vault-relative path to a filesystem path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl DocumentStore for Vault {
    fn read(&self, path: &str) -> Result<String, ReadError> {
        let file_path = self.resolve(path);
        if file_path.is_dir() {
            return Err(ReadError::NotFound);
        }
        fs::read_to_string(&file_path).map_err(ReadError::from_io)
    }

    fn write(&mut self, path: &str, content: &str) -> io::Result<()> {
        let file_path = self.resolve(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, content)?;
        tracing::debug!("Wrote {} bytes to {}", content.len(), file_path.display());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn documents(&self) -> Vec<String> {
        let mut documents: Vec<String> = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != OsStr::new(CONFIG_DIR))
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| relative_path(&self.root, entry.path()))
            .collect();
        documents.sort();
        documents
    }
}

/// Renders a path below `root` with `/` separators, as vault paths are written.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Option<Vec<&str>> = relative.iter().map(OsStr::to_str).collect();
    segments.map(|segments| segments.join("/"))
}
