//! The extraction pass and the summary it produces.

use std::fmt;

use nonempty::NonEmpty;

use crate::domain::{
    filter::SectionFilter,
    section::SectionTracker,
    task::{task_identifier, ParseRecordError, TaskId, TaskRecord},
};

/// Extracts every task record from a document, in document order.
///
/// Headings update the current section and are never task lines. Matching
/// lines outside the allowed sections are skipped.
///
/// ```
/// use task_status::domain::{extract_tasks, SectionFilter};
///
/// let document = "## Active\n- [ ] Write spec [[101]]\n## Done\n- [x] Shipped [[103]]";
/// let records = extract_tasks(document, &SectionFilter::unrestricted());
///
/// assert_eq!(records[0].to_string(), "101 - Active");
/// assert_eq!(records[1].to_string(), "103 - Done");
/// ```
#[must_use]
pub fn extract_tasks(document: &str, filter: &SectionFilter) -> Vec<TaskRecord> {
    let mut tracker = SectionTracker::default();

    document
        .lines()
        .filter_map(|line| {
            if tracker.observe(line) {
                return None;
            }

            let id = task_identifier(line)?;
            let section = tracker.current();
            if !filter.allows(section) {
                tracing::trace!(id, section, "skipping task outside allowed sections");
                return None;
            }

            // the matcher only captures ASCII digits
            let id = TaskId::new(id.to_string()).ok()?;
            Some(TaskRecord::new(id, section.to_string()))
        })
        .collect()
}

/// A non-empty, ordered list of task records.
///
/// An extraction pass that finds nothing has no summary; callers must treat
/// that as "nothing to write" rather than writing an empty document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary(NonEmpty<TaskRecord>);

impl Summary {
    /// Wraps the records, or returns `None` if there are none.
    #[must_use]
    pub fn new(records: Vec<TaskRecord>) -> Option<Self> {
        NonEmpty::from_vec(records).map(Self)
    }

    /// Runs the extraction pass and wraps the result.
    #[must_use]
    pub fn extract(document: &str, filter: &SectionFilter) -> Option<Self> {
        Self::new(extract_tasks(document, filter))
    }

    /// The number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the records in document order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskRecord> {
        self.0.iter()
    }
}

/// Renders one `"<identifier> - <section>"` line per record, separated by a
/// single newline with no trailing newline.
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, record) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{record}")?;
        }
        Ok(())
    }
}

/// Reads a rendered summary back into records.
///
/// Blank lines are ignored, so a trailing newline added by an editor does not
/// change the result.
///
/// # Errors
///
/// Returns an error for the first line that isn't a valid summary line.
pub fn parse_summary(text: &str) -> Result<Vec<TaskRecord>, ParseRecordError> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect()
}
