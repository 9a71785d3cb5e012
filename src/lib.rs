//! Plain-text Task Status Summaries
//!
//! Checkbox task lines in a markdown document that link to a numbered note
//! (`- [ ] Write spec [[101]]`) are collected under their `## ` section and
//! written to a second document as `101 - Section` lines.

pub mod domain;
pub use domain::{extract_tasks, Config, SectionFilter, Summary, TaskRecord};

/// The update pipeline and other operations against a vault.
pub mod host;
pub use host::{Host, Outcome, Report, Step, UpdateError};

/// Document and configuration storage.
pub mod storage;
pub use storage::{ConfigStore, DocumentStore, MemoryStore, TomlConfigStore, Vault};

/// Clipboard and document opener integrations.
pub mod system;
pub use system::{ClipboardWriter, DocumentOpener, SystemClipboard, SystemOpener};
