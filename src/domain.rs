//! Domain models for task summaries.
//!
//! This module contains the extraction pass and the types it works with:
//! sections, task lines and records, the summary, and the configuration.

/// Level-2 section tracking and heading enumeration.
pub mod section;
pub use section::{headings, SectionTracker};

/// Task line matching and task records.
pub mod task;
pub use task::{InvalidTaskIdError, ParseRecordError, TaskId, TaskRecord};

mod config;
pub use config::{migrate_allowed_sections, Config, ConfigError, ConfigurationInvalid, Paths};

mod filter;
pub use filter::SectionFilter;

mod path;
pub use path::{InvalidPathError, MarkdownPath};

mod summary;
pub use summary::{extract_tasks, parse_summary, Summary};
