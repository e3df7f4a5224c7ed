//! Types for the segmentation system.

use regex::Regex;

use crate::types::{HeaderKind, Language};

/// Compile a pattern from a static layout table.
///
/// Layout tables are fixed at build time and covered by tests, so an invalid
/// pattern is a programming error.
#[allow(clippy::expect_used)] // Static layout patterns that are guaranteed to be valid
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid layout regex")
}

/// Declarative specification of a header section.
///
/// Pairs a section with the marker phrase that starts it.
#[derive(Debug, Clone)]
pub struct SectionSpec {
    /// Section produced by this marker.
    pub kind: HeaderKind,

    /// Start marker; the section content begins at the end of the match.
    pub start: Regex,
}

impl SectionSpec {
    /// Create a new section specification.
    #[must_use]
    pub fn new(kind: HeaderKind, start: &str) -> Self {
        Self {
            kind,
            start: compile(start),
        }
    }
}

/// All marker tables for one document language.
///
/// Lists are ordered: section specs follow the expected document order, and
/// start/terminator lists are tried in list order unless noted otherwise.
#[derive(Debug, Clone)]
pub struct LanguageLayout {
    /// Language these tables describe.
    pub language: Language,

    /// Any document-start anchor; everything before the first match is front matter.
    pub front_matter: Regex,

    /// Title marker; capture group 1 holds the title line.
    pub title: Option<Regex>,

    /// Abstract start markers.
    pub abstract_starts: Vec<Regex>,

    /// Abstract terminator markers.
    pub abstract_ends: Vec<Regex>,

    /// Prefix stripped from the abstract slice (up to the last abstract label).
    pub abstract_prefix: Option<Regex>,

    /// Header sections in expected document order.
    pub sections: Vec<SectionSpec>,

    /// Line-anchored claims block start markers (earliest match wins).
    pub claims_starts: Vec<Regex>,

    /// Line-anchored markers of the section following the claims (earliest match wins).
    pub claims_ends: Vec<Regex>,

    /// Line-anchored bracketed claim-item markers, searched document-wide.
    pub claim_items: Vec<Regex>,

    /// Line-anchored numbered claim lines, accepted only inside a header-delimited block.
    pub claim_list_items: Vec<Regex>,

    /// Whole-line claims header labels dropped when cleaning the block.
    pub claims_labels: Vec<Regex>,
}

impl LanguageLayout {
    /// Create a new layout with a front matter anchor and no other markers.
    #[must_use]
    pub fn new(language: Language, front_matter: &str) -> Self {
        Self {
            language,
            front_matter: compile(front_matter),
            title: None,
            abstract_starts: Vec::new(),
            abstract_ends: Vec::new(),
            abstract_prefix: None,
            sections: Vec::new(),
            claims_starts: Vec::new(),
            claims_ends: Vec::new(),
            claim_items: Vec::new(),
            claim_list_items: Vec::new(),
            claims_labels: Vec::new(),
        }
    }

    /// Set the title marker.
    #[must_use]
    pub fn with_title(mut self, pattern: &str) -> Self {
        self.title = Some(compile(pattern));
        self
    }

    /// Set the abstract start and terminator markers.
    #[must_use]
    pub fn with_abstract<'a>(
        mut self,
        starts: impl IntoIterator<Item = &'a str>,
        ends: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.abstract_starts = starts.into_iter().map(compile).collect();
        self.abstract_ends = ends.into_iter().map(compile).collect();
        self
    }

    /// Set the abstract prefix pattern.
    #[must_use]
    pub fn with_abstract_prefix(mut self, pattern: &str) -> Self {
        self.abstract_prefix = Some(compile(pattern));
        self
    }

    /// Append a header section.
    #[must_use]
    pub fn with_section(mut self, kind: HeaderKind, start: &str) -> Self {
        self.sections.push(SectionSpec::new(kind, start));
        self
    }

    /// Set the claims block start and end markers.
    #[must_use]
    pub fn with_claims_block<'a>(
        mut self,
        starts: impl IntoIterator<Item = &'a str>,
        ends: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.claims_starts = starts.into_iter().map(compile).collect();
        self.claims_ends = ends.into_iter().map(compile).collect();
        self
    }

    /// Set the claim-item markers.
    #[must_use]
    pub fn with_claim_items<'a>(
        mut self,
        items: impl IntoIterator<Item = &'a str>,
        list_items: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.claim_items = items.into_iter().map(compile).collect();
        self.claim_list_items = list_items.into_iter().map(compile).collect();
        self
    }

    /// Set the claims header labels.
    #[must_use]
    pub fn with_claims_labels<'a>(mut self, labels: impl IntoIterator<Item = &'a str>) -> Self {
        self.claims_labels = labels.into_iter().map(compile).collect();
        self
    }

    /// Whether a trimmed line is exactly a claims header label.
    #[must_use]
    pub fn is_claims_label(&self, line: &str) -> bool {
        self.claims_labels.iter().any(|re| re.is_match(line))
    }
}
