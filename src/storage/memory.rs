use std::{collections::BTreeMap, io};

use crate::storage::{DocumentStore, ReadError};

/// An in-memory document store.
///
/// Useful for driving the update pipeline without a filesystem.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    documents: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, replacing any existing one at the same path.
    #[must_use]
    pub fn with_document(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.documents.insert(path.into(), content.into());
        self
    }

    /// Returns the content of a document, if present.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.documents.get(path).map(String::as_str)
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, path: &str) -> Result<String, ReadError> {
        self.get(path).map(ToString::to_string).ok_or(ReadError::NotFound)
    }

    fn write(&mut self, path: &str, content: &str) -> io::Result<()> {
        self.documents.insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.documents.contains_key(path)
    }

    fn documents(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }
}
