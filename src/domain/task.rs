//! Task lines and the records extracted from them.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

/// Matches a checkbox list item whose text links to a numeric note.
///
/// The checkbox must be `[ ]` or `[x]` (lowercase only). The text before
/// the first link that yields a match is matched lazily, and the digits must
/// be followed directly by the link close (`]`) or an alias separator (`|`).
/// A byte order mark counts as leading whitespace.
static TASK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s\x{FEFF}]*-[\s\x{FEFF}]*\[[ x]\].*?\[\[([0-9]+)(?:\]|\|)")
        .expect("task line pattern is valid")
});

/// Returns the linked identifier if `line` is a task line.
///
/// Lines that neither start with `"- ["` nor contain `"[["` are rejected
/// before the pattern runs. Completion state is not reported: `[ ]` and
/// `[x]` are treated the same.
///
/// ```
/// use task_status::domain::task::task_identifier;
///
/// assert_eq!(task_identifier("- [ ] task [[7|Display Text]]"), Some("7"));
/// assert_eq!(task_identifier("- [X] task [[7]]"), None);
/// ```
#[must_use]
pub fn task_identifier(line: &str) -> Option<&str> {
    if !line.starts_with("- [") && !line.contains("[[") {
        return None;
    }

    TASK_LINE
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// A validated task identifier: one or more ASCII decimal digits.
///
/// The digits are kept verbatim, so `007` and `7` are distinct identifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new `TaskId`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTaskIdError`] if the string is empty or contains
    /// anything other than ASCII digits.
    pub fn new(id: String) -> Result<Self, InvalidTaskIdError> {
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidTaskIdError(id));
        }
        Ok(Self(id))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TaskId {
    type Err = InvalidTaskIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a string is not a valid task identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid task identifier '{0}': must be non-empty and contain only digits (0-9)")]
pub struct InvalidTaskIdError(String);

/// A task found in the source document, paired with its section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    identifier: TaskId,
    section: String,
}

impl TaskRecord {
    /// Creates a record from an identifier and the section it was found in.
    #[must_use]
    pub const fn new(identifier: TaskId, section: String) -> Self {
        Self {
            identifier,
            section,
        }
    }

    /// The linked identifier.
    #[must_use]
    pub const fn identifier(&self) -> &TaskId {
        &self.identifier
    }

    /// The enclosing section label (empty before the first heading).
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }
}

/// Renders the record as a summary line: `"<identifier> - <section>"`.
impl fmt::Display for TaskRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.identifier, self.section)
    }
}

impl FromStr for TaskRecord {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Identifiers never contain the separator, so the first one splits.
        // An unnamed section leaves a trailing space that editors may strip.
        let (id, section) = s
            .split_once(" - ")
            .or_else(|| s.strip_suffix(" -").map(|id| (id, "")))
            .ok_or_else(|| ParseRecordError::Syntax(s.to_string()))?;

        Ok(Self::new(id.parse()?, section.to_string()))
    }
}

/// Errors that can occur when reading a summary line back.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseRecordError {
    /// The line has no `" - "` separator.
    #[error("Invalid summary line '{0}': expected '<identifier> - <section>'")]
    Syntax(String),

    /// The part before the separator is not a valid identifier.
    #[error(transparent)]
    Identifier(#[from] InvalidTaskIdError),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("- [ ] Write spec [[101]]", Some("101"); "unchecked")]
    #[test_case("- [x] Review [[102|done]]", Some("102"); "checked with alias")]
    #[test_case("- [ ] task [[7|Display Text]]", Some("7"); "alias form")]
    #[test_case("    - [ ] nested [[5]]", Some("5"); "indented item")]
    #[test_case("-[ ] tight [[6]]", Some("6"); "no space after marker")]
    #[test_case("\u{feff}- [ ] first line [[1]]", Some("1"); "byte order mark")]
    #[test_case("- [x] [[8]]", Some("8"); "no task text")]
    #[test_case("- [ ] lead [[007]]", Some("007"); "leading zeros kept")]
    #[test_case("- [X] Shipped [[42]]", None; "uppercase x")]
    #[test_case("- [-] Cancelled [[42]]", None; "other checkbox state")]
    #[test_case("- [ ] bad [[42abc]]", None; "digits then letters")]
    #[test_case("- [ ] words [[note]]", None; "non numeric link")]
    #[test_case("- [ ] spaced [[ 42]]", None; "space before digits")]
    #[test_case("- [ ] no link 42", None; "no link")]
    #[test_case("* [ ] star marker [[42]]", None; "star marker")]
    #[test_case("[[42]] - [ ] link first", None; "link before checkbox")]
    #[test_case("Plain paragraph", None; "plain text")]
    fn identifier_extraction(line: &str, expected: Option<&str>) {
        assert_eq!(task_identifier(line), expected);
    }

    #[test]
    fn first_link_with_digits_is_used() {
        assert_eq!(task_identifier("- [ ] a [[1]] then [[2]]"), Some("1"));
    }

    #[test]
    fn later_link_matches_when_earlier_one_is_not_numeric() {
        assert_eq!(task_identifier("- [ ] see [[Notes]] for [[9]]"), Some("9"));
    }

    #[test]
    fn task_id_rejects_non_digits() {
        assert!(TaskId::new(String::new()).is_err());
        assert!(TaskId::new("12a".to_string()).is_err());
        assert!(TaskId::new("١٢".to_string()).is_err());
        assert_eq!(TaskId::new("12".to_string()).unwrap().as_str(), "12");
    }

    #[test]
    fn record_display() {
        let record = TaskRecord::new("101".parse().unwrap(), "Active".to_string());
        assert_eq!(record.to_string(), "101 - Active");

        let unsectioned = TaskRecord::new("5".parse().unwrap(), String::new());
        assert_eq!(unsectioned.to_string(), "5 - ");
    }

    #[test]
    fn record_parse_keeps_separator_in_section() {
        let record: TaskRecord = "3 - Q1 - Planning".parse().unwrap();
        assert_eq!(record.identifier().as_str(), "3");
        assert_eq!(record.section(), "Q1 - Planning");
    }

    #[test]
    fn record_parse_accepts_stripped_unnamed_section() {
        for line in ["5 - ", "5 -"] {
            let record: TaskRecord = line.parse().unwrap();
            assert_eq!(record.identifier().as_str(), "5");
            assert_eq!(record.section(), "");
        }
    }

    #[test]
    fn record_parse_errors() {
        assert!(matches!(
            "101 Active".parse::<TaskRecord>(),
            Err(ParseRecordError::Syntax(_))
        ));
        assert!(matches!(
            "abc - Active".parse::<TaskRecord>(),
            Err(ParseRecordError::Identifier(_))
        ));
    }
}
