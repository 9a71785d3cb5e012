//! Level-2 section tracking.
//!
//! A section starts at a line beginning with exactly `"## "` and runs until
//! the next such line. There is no nesting: deeper headings (`###`) and
//! malformed ones (`##Foo`) are ordinary content.

use std::collections::BTreeSet;

const HEADING_PREFIX: &str = "## ";

/// Returns the section label if `line` is a level-2 heading.
///
/// The label is the remainder of the line after the `"## "` prefix, with
/// surrounding whitespace trimmed.
///
/// ```
/// use task_status::domain::section::heading;
///
/// assert_eq!(heading("## Active  "), Some("Active"));
/// assert_eq!(heading("### Active"), None);
/// assert_eq!(heading("##Active"), None);
/// ```
#[must_use]
pub fn heading(line: &str) -> Option<&str> {
    line.strip_prefix(HEADING_PREFIX).map(str::trim)
}

/// Tracks the current section while a document is read line by line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SectionTracker {
    current: String,
}

impl SectionTracker {
    /// Feeds a line to the tracker.
    ///
    /// Returns `true` if the line was a heading (and so updated the current
    /// section). Heading lines are never task lines.
    pub fn observe(&mut self, line: &str) -> bool {
        heading(line).is_some_and(|label| {
            label.clone_into(&mut self.current);
            true
        })
    }

    /// The label of the most recent heading, or `""` before the first one.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }
}

/// Collects the distinct heading labels of a document in first-seen order.
#[must_use]
pub fn headings(document: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    document
        .lines()
        .filter_map(heading)
        .filter(|label| seen.insert(*label))
        .map(ToString::to_string)
        .collect()
}
