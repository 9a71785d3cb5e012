use std::collections::BTreeSet;

/// Restricts extraction to a set of sections.
///
/// An empty filter places no restriction: every section, including the
/// unnamed one before the first heading, is allowed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SectionFilter {
    allowed: BTreeSet<String>,
}

impl SectionFilter {
    /// A filter that allows every section.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            allowed: BTreeSet::new(),
        }
    }

    /// Checks whether tasks in `section` should be reported.
    #[must_use]
    pub fn allows(&self, section: &str) -> bool {
        self.allowed.is_empty() || self.allowed.contains(section)
    }
}

impl<S: Into<String>> FromIterator<S> for SectionFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            allowed: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_allows_everything() {
        let filter = SectionFilter::unrestricted();
        assert_eq!(filter, SectionFilter::default());
        assert!(filter.allows("Active"));
        assert!(filter.allows(""));
    }

    #[test]
    fn non_empty_filter_allows_members_only() {
        let filter: SectionFilter = ["Active"].into_iter().collect();
        assert!(filter.allows("Active"));
        assert!(!filter.allows("Done"));
        assert!(!filter.allows(""));
        assert!(!filter.allows("active"));
    }
}
