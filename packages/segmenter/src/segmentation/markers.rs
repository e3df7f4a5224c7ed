//! Precomputed marker positions for boundary lookups.
//!
//! Header and claims segmentation repeatedly ask "where is the next boundary
//! marker after offset K". Instead of rescanning the text for every question,
//! [`MarkerIndex`] scans each pattern once and answers from sorted match
//! lists with a binary search.

use regex::Regex;

/// Byte span of one marker match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerMatch {
    /// Index of the pattern that produced the match.
    pub pattern: usize,

    /// Byte offset of the match start.
    pub start: usize,

    /// Byte offset of the match end.
    pub end: usize,
}

/// All match positions of a fixed list of patterns in one document.
#[derive(Debug, Clone, Default)]
pub struct MarkerIndex {
    matches: Vec<Vec<(usize, usize)>>,
}

impl MarkerIndex {
    /// Scan `text` once per pattern.
    #[must_use]
    pub fn build<'r>(text: &str, patterns: impl IntoIterator<Item = &'r Regex>) -> Self {
        let matches = patterns
            .into_iter()
            .map(|re| re.find_iter(text).map(|m| (m.start(), m.end())).collect())
            .collect();
        Self { matches }
    }

    /// Number of indexed patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether no patterns were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// First match of `pattern` starting at or after `offset`.
    #[must_use]
    pub fn first_at_or_after(&self, pattern: usize, offset: usize) -> Option<MarkerMatch> {
        let spans = self.matches.get(pattern)?;
        let idx = spans.partition_point(|(start, _)| *start < offset);
        spans.get(idx).map(|&(start, end)| MarkerMatch {
            pattern,
            start,
            end,
        })
    }

    /// Earliest match among `patterns` starting at or after `offset`.
    ///
    /// Ties go to the pattern listed first.
    #[must_use]
    pub fn earliest_among(
        &self,
        patterns: impl IntoIterator<Item = usize>,
        offset: usize,
    ) -> Option<MarkerMatch> {
        patterns
            .into_iter()
            .filter_map(|p| self.first_at_or_after(p, offset))
            .min_by_key(|m| (m.start, m.pattern))
    }

    /// Match of the first pattern, in the given order, that matches at or after `offset`.
    ///
    /// Unlike [`Self::earliest_among`] this respects list order, not document order.
    #[must_use]
    pub fn first_in_order(
        &self,
        patterns: impl IntoIterator<Item = usize>,
        offset: usize,
    ) -> Option<MarkerMatch> {
        patterns
            .into_iter()
            .find_map(|p| self.first_at_or_after(p, offset))
    }
}
