use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

const EXTENSION: &str = ".md";

/// A validated vault-relative path to a markdown document.
///
/// The path must be non-empty and end with `.md`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MarkdownPath(NonEmptyString);

impl MarkdownPath {
    /// Creates a new `MarkdownPath`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPathError`] if the path is empty or doesn't end with
    /// `.md`.
    pub fn new(path: String) -> Result<Self, InvalidPathError> {
        if !path.ends_with(EXTENSION) {
            return Err(InvalidPathError(path));
        }
        NonEmptyString::new(path).map(Self).map_err(InvalidPathError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for MarkdownPath {
    type Error = InvalidPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for MarkdownPath {
    type Err = InvalidPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for MarkdownPath {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for MarkdownPath {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for MarkdownPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a path does not name a markdown document.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid path '{0}': file paths must end with the .md extension")]
pub struct InvalidPathError(String);
