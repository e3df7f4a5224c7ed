//! Core data types for the segmenter.
//!
//! These types describe one patent document as it moves through the engine:
//! extracted text, normalized text, the per-language section map, claims and
//! the aligned output consumed by the translation collaborator.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Document language.
///
/// Japanese filings are the source side, Traditional Chinese filings the
/// target side of every pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Japanese (source).
    Japanese,

    /// Traditional Chinese (target).
    Chinese,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Japanese => f.write_str("japanese"),
            Self::Chinese => f.write_str("chinese"),
        }
    }
}

/// Named legal section of a patent.
///
/// Declaration order is the expected document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderKind {
    Title,
    Abstract,
    TechnicalField,
    Background,
    PriorArt,
    Summary,
    Problem,
    Solution,
    Effects,
    Description,
    Examples,
    Claims,
}

impl HeaderKind {
    /// Get the snake_case name used as section key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Abstract => "abstract",
            Self::TechnicalField => "technical_field",
            Self::Background => "background",
            Self::PriorArt => "prior_art",
            Self::Summary => "summary",
            Self::Problem => "problem",
            Self::Solution => "solution",
            Self::Effects => "effects",
            Self::Description => "description",
            Self::Examples => "examples",
            Self::Claims => "claims",
        }
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of a bracket-marked paragraph (`【0007】`, `[7]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParagraphNumber(u16);

impl ParagraphNumber {
    /// Create a paragraph number.
    #[must_use]
    pub fn new(number: u16) -> Self {
        Self(number)
    }

    /// Parse the 1-4 digit capture of a paragraph marker.
    ///
    /// # Examples
    /// ```
    /// use patent_segmenter::ParagraphNumber;
    ///
    /// assert_eq!(ParagraphNumber::parse("0007").unwrap().key(), "0007");
    /// assert_eq!(ParagraphNumber::parse("12").unwrap().key(), "0012");
    /// assert!(ParagraphNumber::parse("12345").is_none());
    /// ```
    #[must_use]
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || digits.len() > 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Self)
    }

    /// Get the numeric value.
    #[must_use]
    pub fn value(&self) -> u16 {
        self.0
    }

    /// Get the 4-digit zero-padded key.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{:04}", self.0)
    }
}

impl fmt::Display for ParagraphNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Key of a section map entry.
///
/// Paragraph keys and header keys live in separate variants so that the
/// aligner can tell them apart by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKey {
    /// Numbered paragraph.
    Paragraph(ParagraphNumber),

    /// Named legal section.
    Header(HeaderKind),

    /// The whole normalized document.
    FullText,
}

impl SectionKey {
    /// Whether this is a paragraph key.
    #[must_use]
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Self::Paragraph(_))
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraph(number) => number.fmt(f),
            Self::Header(kind) => kind.fmt(f),
            Self::FullText => f.write_str("full_text"),
        }
    }
}

impl Serialize for SectionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Text extracted from one document, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    /// Language of the document.
    pub language: Language,

    /// Originating file name.
    pub source_name: String,

    text: String,
}

impl RawText {
    /// Create raw text for a document.
    #[must_use]
    pub fn new(language: Language, source_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language,
            source_name: source_name.into(),
            text: text.into(),
        }
    }

    /// Get the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in chars.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Canonical text produced by [`crate::normalize::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    language: Language,
    text: String,
}

impl NormalizedText {
    pub(crate) fn new(language: Language, text: String) -> Self {
        Self { language, text }
    }

    /// Get the language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Get the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Ordered map of section key to section text for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: BTreeMap<SectionKey, String>,
}

impl SectionMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a section.
    pub fn insert(&mut self, key: SectionKey, text: impl Into<String>) {
        self.sections.insert(key, text.into());
    }

    /// Get a section.
    #[must_use]
    pub fn get(&self, key: &SectionKey) -> Option<&str> {
        self.sections.get(key).map(String::as_str)
    }

    /// Get a header section.
    #[must_use]
    pub fn header(&self, kind: HeaderKind) -> Option<&str> {
        self.get(&SectionKey::Header(kind))
    }

    /// Whether the map holds `key`.
    #[must_use]
    pub fn contains(&self, key: &SectionKey) -> bool {
        self.sections.contains_key(key)
    }

    /// Iterate all sections in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&SectionKey, &str)> {
        self.sections.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Iterate paragraph sections in ascending number order.
    pub fn paragraphs(&self) -> impl Iterator<Item = (ParagraphNumber, &str)> {
        self.sections.iter().filter_map(|(k, v)| match k {
            SectionKey::Paragraph(number) => Some((*number, v.as_str())),
            _ => None,
        })
    }

    /// Number of entries, `full_text` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the map has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Whether any paragraph or header section was found.
    ///
    /// `full_text` alone does not count.
    #[must_use]
    pub fn has_structure(&self) -> bool {
        self.sections.keys().any(|k| !matches!(k, SectionKey::FullText))
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (key, text) in &self.sections {
            map.serialize_entry(&key.to_string(), text)?;
        }
        map.end()
    }
}

/// One numbered claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claim {
    /// Claim number as written (digits only).
    pub number: String,

    /// Claim body; may be empty for a bodiless marker.
    pub text: String,
}

impl Claim {
    /// Create a claim.
    #[must_use]
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
        }
    }
}

/// A section present in both language variants of a patent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedPair {
    /// Source-side key.
    pub key: SectionKey,

    /// Source-language text.
    pub source: String,

    /// Target-language text.
    pub target: String,
}

impl AlignedPair {
    /// Create an aligned pair.
    #[must_use]
    pub fn new(key: SectionKey, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            key,
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A claim present in both language variants of a patent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedClaim {
    /// Claim number.
    pub number: String,

    /// Source-language claim text.
    pub source: String,

    /// Target-language claim text.
    pub target: String,
}

/// Count chars (not bytes).
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncate to at most `max_chars` chars on a char boundary.
///
/// # Examples
/// ```
/// use patent_segmenter::types::truncate_chars;
///
/// assert_eq!(truncate_chars("請求項一二三", 3), "請求項");
/// assert_eq!(truncate_chars("abc", 10), "abc");
/// ```
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
