//! Text normalization for extracted patent text.
//!
//! Two passes exist: [`clean_text`] is a light cleanup applied once by the
//! caller right after extraction, and [`normalize`] produces the canonical
//! form every marker pattern is written against.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::segmentation::LanguageLayout;
use crate::types::{Language, NormalizedText};

/// Three or more consecutive newlines.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Runs of two or more spaces or tabs.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HORIZONTAL_SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid regex"));

/// A line holding only a page number ("12") or a page marker ("3 / 10").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PAGE_NUMBER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*(?:/\s*\d+\s*)?$").expect("valid regex"));

/// Unify `\r\n` and `\r` line terminators to `\n`.
fn unify_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Collapse three or more newlines into a single blank line.
fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINE_RUN.replace_all(text, "\n\n").into_owned()
}

/// Light cleanup of freshly extracted text.
///
/// - Unifies line endings
/// - Drops page-number-only lines and "n / m" page markers
/// - Collapses runs of spaces/tabs to one space
/// - Collapses 3+ newlines to one blank line
///
/// Works line by line, so consecutive page-number lines all go in one pass
/// and the function is idempotent.
///
/// # Examples
/// ```
/// use patent_segmenter::normalize::clean_text;
///
/// assert_eq!(clean_text("abc\n12\n3 / 10\ndef"), "abc\ndef");
/// assert_eq!(clean_text("a  \t b"), "a b");
/// ```
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = unify_line_endings(text);
    let lines: Vec<String> = text
        .split('\n')
        .filter(|line| !PAGE_NUMBER_LINE.is_match(line))
        .map(|line| HORIZONTAL_SPACE_RUN.replace_all(line, " ").into_owned())
        .collect();

    collapse_blank_lines(&lines.join("\n")).trim().to_string()
}

/// Canonicalize text for segmentation.
///
/// Applies NFKC (full-width digits and brackets become their half-width
/// forms), unifies line endings, collapses blank-line runs and removes any
/// front matter before the first document-start anchor of `language`.
/// Without an anchor the whole text is kept, trimmed.
///
/// Idempotent: normalizing normalized text returns the same text.
///
/// # Examples
/// ```
/// use patent_segmenter::normalize::normalize;
/// use patent_segmenter::Language;
///
/// let text = normalize("送付状\r\n【０００１】本発明は", Language::Japanese);
/// assert_eq!(text.as_str(), "【0001】本発明は");
/// ```
#[must_use]
pub fn normalize(text: &str, language: Language) -> NormalizedText {
    let canonical: String = text.nfkc().collect();
    let canonical = collapse_blank_lines(&unify_line_endings(&canonical));
    let body = remove_front_matter(&canonical, language);
    NormalizedText::new(language, body.to_string())
}

/// Slice off everything before the first document-start anchor.
fn remove_front_matter(text: &str, language: Language) -> &str {
    let layout = LanguageLayout::for_language(language);
    match layout.front_matter.find(text) {
        Some(anchor) => {
            if anchor.start() > 0 {
                tracing::debug!(
                    language = %language,
                    dropped_bytes = anchor.start(),
                    "Removed front matter"
                );
            }
            text[anchor.start()..].trim()
        }
        None => text.trim(),
    }
}
