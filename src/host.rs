//! The update pipeline and the other operations run against a vault.
//!
//! [`Host`] ties the pure extraction pass to its collaborators: a
//! [`DocumentStore`] for reading the source and writing the target, a
//! [`ClipboardWriter`], and a [`DocumentOpener`]. Each is a trait, so the
//! whole pipeline can run against in-memory fakes.

use std::io;

use tracing::instrument;

use crate::{
    domain::{
        headings, parse_summary, Config, ConfigurationInvalid, MarkdownPath, ParseRecordError,
        Summary, TaskRecord,
    },
    storage::{DocumentStore, ReadError},
    system::{ClipboardError, ClipboardWriter, DocumentOpener, OpenError},
};

/// A vault together with the capabilities used to act on it.
#[derive(Debug)]
pub struct Host<S, C, O> {
    store: S,
    clipboard: C,
    opener: O,
}

/// What an update run did.
#[derive(Debug)]
pub enum Outcome {
    /// The target was rewritten.
    Updated(Report),

    /// The source has no matching task lines; the target was left untouched.
    NoTasksFound,
}

/// The result of a successful update.
#[derive(Debug)]
pub struct Report {
    /// The document that was written.
    pub target: MarkdownPath,

    /// The summary that was written.
    pub summary: Summary,

    /// Whether the target was opened.
    pub opened: Step<OpenError>,

    /// Whether the summary was copied to the clipboard.
    pub copied: Step<ClipboardError>,
}

/// The result of an optional follow-up action.
#[derive(Debug)]
pub enum Step<E> {
    /// The action is disabled in the configuration.
    Skipped,

    /// The action succeeded.
    Done,

    /// The action failed. Earlier steps are not rolled back.
    Failed(E),
}

impl<E> Step<E> {
    fn run(enabled: bool, action: impl FnOnce() -> Result<(), E>) -> Self {
        if !enabled {
            return Self::Skipped;
        }
        match action() {
            Ok(()) => Self::Done,
            Err(e) => Self::Failed(e),
        }
    }

    /// Returns `true` if the action ran and succeeded.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Errors that stop an update before the target is written.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The configuration is incomplete or invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationInvalid),

    /// The source document doesn't exist.
    #[error("File {0} not found")]
    SourceNotFound(MarkdownPath),

    /// The source document couldn't be read.
    #[error("Failed to read {path}")]
    Read {
        /// The source document.
        path: MarkdownPath,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },

    /// The target document couldn't be written.
    #[error("Failed to write {path}")]
    Write {
        /// The target document.
        path: MarkdownPath,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
}

/// Errors from operations on the existing summary document.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// The configuration has no usable target.
    #[error(transparent)]
    Configuration(#[from] ConfigurationInvalid),

    /// The target document doesn't exist yet.
    #[error("Status file {0} not found")]
    TargetNotFound(MarkdownPath),

    /// The target document couldn't be read.
    #[error("Failed to read {path}")]
    Read {
        /// The target document.
        path: MarkdownPath,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },

    /// The target document isn't a summary.
    #[error("{path} is not a task summary")]
    Parse {
        /// The target document.
        path: MarkdownPath,
        /// The first offending line.
        #[source]
        source: ParseRecordError,
    },

    /// The clipboard rejected the summary.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl<S, C, O> Host<S, C, O>
where
    S: DocumentStore,
    C: ClipboardWriter,
    O: DocumentOpener,
{
    /// Creates a host from its capabilities.
    pub const fn new(store: S, clipboard: C, opener: O) -> Self {
        Self {
            store,
            clipboard,
            opener,
        }
    }

    /// The document store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Regenerates the summary document from the source.
    ///
    /// The target is replaced in full, or not touched at all if the source
    /// has no matching tasks. Opening and copying run afterwards when enabled;
    /// their failures are reported in the [`Report`] and never undo the write.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the source can't be
    /// read, or the target can't be written.
    #[instrument(level = "debug", skip_all)]
    pub fn update(&mut self, config: &Config) -> Result<Outcome, UpdateError> {
        let paths = config.paths()?;
        let content = self.store.read(&paths.source).map_err(|e| match e {
            ReadError::NotFound => UpdateError::SourceNotFound(paths.source.clone()),
            ReadError::Io(source) => UpdateError::Read {
                path: paths.source.clone(),
                source,
            },
        })?;

        let Some(summary) = Summary::extract(&content, &config.section_filter()) else {
            tracing::info!("No tasks found in {}", paths.source);
            return Ok(Outcome::NoTasksFound);
        };

        let rendered = summary.to_string();
        self.store
            .write(&paths.target, &rendered)
            .map_err(|source| UpdateError::Write {
                path: paths.target.clone(),
                source,
            })?;
        tracing::info!("Updated {} tasks in {}", summary.len(), paths.target);

        let opened = Step::run(config.auto_open, || self.opener.open(&paths.target));
        if let Step::Failed(e) = &opened {
            tracing::debug!(error = ?e, "Failed to open {}", paths.target);
        }

        let copied = Step::run(config.auto_copy, || self.clipboard.copy(&rendered));
        if let Step::Failed(e) = &copied {
            tracing::debug!(error = ?e, "Failed to copy summary to clipboard");
        }

        Ok(Outcome::Updated(Report {
            target: paths.target,
            summary,
            opened,
            copied,
        }))
    }

    /// Copies the current content of the target document to the clipboard.
    ///
    /// Returns the number of bytes copied.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is unset or missing, or the clipboard
    /// rejects the text.
    #[instrument(level = "debug", skip_all)]
    pub fn copy_summary(&mut self, config: &Config) -> Result<usize, SummaryError> {
        let target = config.target_path()?;
        let content = self.read_target(&target)?;
        self.clipboard.copy(&content)?;
        Ok(content.len())
    }

    /// Reads the target document back into task records.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is unset or missing, or isn't a
    /// summary.
    pub fn read_summary(&self, config: &Config) -> Result<Vec<TaskRecord>, SummaryError> {
        let target = config.target_path()?;
        let content = self.read_target(&target)?;
        parse_summary(&content).map_err(|source| SummaryError::Parse {
            path: target,
            source,
        })
    }

    /// Lists the distinct section headings of the configured source.
    ///
    /// Returns an empty list if no source is configured or it can't be read.
    #[must_use]
    pub fn source_headings(&self, config: &Config) -> Vec<String> {
        let Some(source) = config.source().filter(|s| !s.is_empty()) else {
            return Vec::new();
        };

        match self.store.read(source) {
            Ok(content) => headings(&content),
            Err(e) => {
                tracing::debug!("Error reading file sections from {source}: {e}");
                Vec::new()
            }
        }
    }

    /// Lists the vault's documents whose path contains `query`, ignoring
    /// case.
    #[must_use]
    pub fn documents(&self, query: Option<&str>) -> Vec<String> {
        let documents = self.store.documents();
        match query.map(str::to_lowercase) {
            Some(query) => documents
                .into_iter()
                .filter(|path| path.to_lowercase().contains(&query))
                .collect(),
            None => documents,
        }
    }

    fn read_target(&self, target: &MarkdownPath) -> Result<String, SummaryError> {
        self.store.read(target).map_err(|e| match e {
            ReadError::NotFound => SummaryError::TargetNotFound(target.clone()),
            ReadError::Io(source) => SummaryError::Read {
                path: target.clone(),
                source,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::storage::{MemoryStore, Vault};

    const SOURCE: &str = "## Active
- [ ] Write spec [[101]]
- [x] Review [[102|done]]
## Done
- [x] Shipped [[103]]
";

    #[derive(Debug, Default)]
    struct FakeClipboard {
        contents: Option<String>,
        broken: bool,
    }

    impl ClipboardWriter for FakeClipboard {
        fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.broken {
                return Err(ClipboardError::Unavailable {
                    attempts: vec![("clipboard API".to_string(), "no clipboard".to_string())],
                });
            }
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct FakeOpener {
        opened: Vec<String>,
        broken: bool,
    }

    impl DocumentOpener for FakeOpener {
        fn open(&mut self, path: &str) -> Result<(), OpenError> {
            if self.broken {
                return Err(OpenError::Launch {
                    path: path.to_string(),
                    source: io::Error::other("no opener"),
                });
            }
            self.opened.push(path.to_string());
            Ok(())
        }
    }

    type TestHost = Host<MemoryStore, FakeClipboard, FakeOpener>;

    fn host(store: MemoryStore) -> TestHost {
        Host::new(store, FakeClipboard::default(), FakeOpener::default())
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.set_source("Tasks.md".parse().unwrap());
        config.set_target("Status.md".parse().unwrap());
        config
    }

    #[test]
    fn update_writes_opens_and_copies() {
        let mut host = host(MemoryStore::new().with_document("Tasks.md", SOURCE));

        let Outcome::Updated(report) = host.update(&config()).unwrap() else {
            panic!("expected an update");
        };

        let expected = "101 - Active\n102 - Active\n103 - Done";
        assert_eq!(report.summary.len(), 3);
        assert_eq!(report.target.as_str(), "Status.md");
        assert!(report.opened.is_done());
        assert!(report.copied.is_done());
        assert_eq!(host.store().get("Status.md"), Some(expected));
        assert_eq!(host.opener.opened, vec!["Status.md"]);
        assert_eq!(host.clipboard.contents.as_deref(), Some(expected));
    }

    #[test]
    fn update_respects_section_filter() {
        let mut host = host(MemoryStore::new().with_document("Tasks.md", SOURCE));
        let mut config = config();
        config.enable_section("Active");

        host.update(&config).unwrap();

        assert_eq!(
            host.store().get("Status.md"),
            Some("101 - Active\n102 - Active")
        );
    }

    #[test]
    fn update_replaces_previous_summary() {
        let store = MemoryStore::new()
            .with_document("Tasks.md", SOURCE)
            .with_document("Status.md", "999 - Stale\n998 - Stale");
        let mut host = host(store);

        host.update(&config()).unwrap();

        assert_eq!(
            host.store().get("Status.md"),
            Some("101 - Active\n102 - Active\n103 - Done")
        );
    }

    #[test]
    fn update_is_idempotent() {
        let mut host = host(MemoryStore::new().with_document("Tasks.md", SOURCE));

        host.update(&config()).unwrap();
        let first = host.store().get("Status.md").map(ToString::to_string);
        host.update(&config()).unwrap();

        assert_eq!(host.store().get("Status.md"), first.as_deref());
    }

    #[test]
    fn disabled_steps_are_skipped() {
        let mut host = host(MemoryStore::new().with_document("Tasks.md", SOURCE));
        let mut config = config();
        config.auto_open = false;
        config.auto_copy = false;

        let Outcome::Updated(report) = host.update(&config).unwrap() else {
            panic!("expected an update");
        };

        assert!(matches!(report.opened, Step::Skipped));
        assert!(matches!(report.copied, Step::Skipped));
        assert!(host.opener.opened.is_empty());
        assert!(host.clipboard.contents.is_none());
    }

    #[test]
    fn follow_up_failures_do_not_undo_the_write() {
        let store = MemoryStore::new().with_document("Tasks.md", SOURCE);
        let mut host = Host::new(
            store,
            FakeClipboard {
                broken: true,
                ..FakeClipboard::default()
            },
            FakeOpener {
                broken: true,
                ..FakeOpener::default()
            },
        );

        let Outcome::Updated(report) = host.update(&config()).unwrap() else {
            panic!("expected an update");
        };

        assert!(matches!(report.opened, Step::Failed(_)));
        assert!(matches!(report.copied, Step::Failed(_)));
        assert!(host.store().exists("Status.md"));
    }

    #[test]
    fn clipboard_failure_does_not_block_opening() {
        let store = MemoryStore::new().with_document("Tasks.md", SOURCE);
        let mut host = Host::new(
            store,
            FakeClipboard {
                broken: true,
                ..FakeClipboard::default()
            },
            FakeOpener::default(),
        );

        let Outcome::Updated(report) = host.update(&config()).unwrap() else {
            panic!("expected an update");
        };

        assert!(report.opened.is_done());
        assert!(matches!(report.copied, Step::Failed(_)));
    }

    #[test]
    fn no_tasks_leaves_target_untouched() {
        let store = MemoryStore::new()
            .with_document("Tasks.md", "## Active\nnothing linked\n## Done\n")
            .with_document("Status.md", "1 - Previous");
        let mut host = host(store);

        let outcome = host.update(&config()).unwrap();

        assert!(matches!(outcome, Outcome::NoTasksFound));
        assert_eq!(host.store().get("Status.md"), Some("1 - Previous"));
        assert!(host.opener.opened.is_empty());
        assert!(host.clipboard.contents.is_none());
    }

    #[test]
    fn no_tasks_does_not_create_target() {
        let mut host = host(MemoryStore::new().with_document("Tasks.md", "## Active\n"));

        host.update(&config()).unwrap();

        assert!(!host.store().exists("Status.md"));
    }

    #[test]
    fn missing_source_is_reported() {
        let mut host = host(MemoryStore::new());

        let error = host.update(&config()).unwrap_err();

        assert!(matches!(error, UpdateError::SourceNotFound(_)));
        assert_eq!(error.to_string(), "File Tasks.md not found");
        assert!(!host.store().exists("Status.md"));
    }

    fn vault_host(tmp: &TempDir) -> Host<Vault, FakeClipboard, FakeOpener> {
        Host::new(
            Vault::new(tmp.path().to_path_buf()),
            FakeClipboard::default(),
            FakeOpener::default(),
        )
    }

    #[test]
    fn unwritable_target_is_reported_before_follow_ups() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Tasks.md"), SOURCE).unwrap();
        fs::create_dir(tmp.path().join("Status.md")).unwrap();
        let mut host = vault_host(&tmp);

        let error = host.update(&config()).unwrap_err();

        assert!(
            matches!(error, UpdateError::Write { ref path, .. } if path.as_str() == "Status.md")
        );
        assert_eq!(error.to_string(), "Failed to write Status.md");
        assert!(host.opener.opened.is_empty());
        assert!(host.clipboard.contents.is_none());
        assert_eq!(
            fs::read_to_string(tmp.path().join("Tasks.md")).unwrap(),
            SOURCE
        );
        assert!(tmp.path().join("Status.md").is_dir());
    }

    #[test]
    fn unreadable_source_is_reported() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Tasks.md"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();
        let mut host = vault_host(&tmp);

        let error = host.update(&config()).unwrap_err();

        assert!(
            matches!(error, UpdateError::Read { ref path, .. } if path.as_str() == "Tasks.md")
        );
        assert!(!tmp.path().join("Status.md").exists());
        assert!(host.opener.opened.is_empty());
        assert!(host.clipboard.contents.is_none());
    }

    #[test]
    fn directory_source_is_not_found() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("Tasks.md")).unwrap();
        let mut host = vault_host(&tmp);

        let error = host.update(&config()).unwrap_err();

        assert!(matches!(error, UpdateError::SourceNotFound(_)));
        assert!(!tmp.path().join("Status.md").exists());
    }

    #[test]
    fn invalid_configuration_is_reported() {
        let mut host = host(MemoryStore::new().with_document("Tasks.md", SOURCE));
        let mut config = Config::default();
        config.set_source("Tasks.md".parse().unwrap());

        let error = host.update(&config).unwrap_err();

        assert!(matches!(
            error,
            UpdateError::Configuration(ConfigurationInvalid::MissingTarget)
        ));
    }

    #[test]
    fn copy_summary_copies_target() {
        let store = MemoryStore::new().with_document("Status.md", "1 - Active");
        let mut host = host(store);

        let copied = host.copy_summary(&config()).unwrap();

        assert_eq!(copied, 10);
        assert_eq!(host.clipboard.contents.as_deref(), Some("1 - Active"));
    }

    #[test]
    fn copy_summary_requires_target() {
        let mut host = host(MemoryStore::new());

        assert!(matches!(
            host.copy_summary(&config()),
            Err(SummaryError::TargetNotFound(_))
        ));
        assert!(matches!(
            host.copy_summary(&Config::default()),
            Err(SummaryError::Configuration(ConfigurationInvalid::MissingTarget))
        ));
    }

    #[test]
    fn read_summary_parses_target() {
        let mut host = host(MemoryStore::new().with_document("Tasks.md", SOURCE));
        host.update(&config()).unwrap();

        let records = host.read_summary(&config()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].to_string(), "103 - Done");
    }

    #[test]
    fn read_summary_rejects_other_documents() {
        let host = host(MemoryStore::new().with_document("Status.md", "# Heading"));

        assert!(matches!(
            host.read_summary(&config()),
            Err(SummaryError::Parse { .. })
        ));
    }

    #[test]
    fn source_headings() {
        let host = host(MemoryStore::new().with_document("Tasks.md", SOURCE));

        assert_eq!(host.source_headings(&config()), vec!["Active", "Done"]);
        assert!(host.source_headings(&Config::default()).is_empty());
    }

    #[test]
    fn source_headings_of_missing_source_is_empty() {
        let host = host(MemoryStore::new());
        assert!(host.source_headings(&config()).is_empty());
    }

    #[test]
    fn documents_filter_ignores_case() {
        let store = MemoryStore::new()
            .with_document("Projects/Tasks.md", "")
            .with_document("Status.md", "")
            .with_document("tasks-archive.md", "");
        let host = host(store);

        assert_eq!(
            host.documents(Some("TASKS")),
            vec!["Projects/Tasks.md", "tasks-archive.md"]
        );
        assert_eq!(host.documents(None).len(), 3);
        assert!(host.documents(Some("missing")).is_empty());
    }
}
