//! Text extraction seam.
//!
//! Binary document parsing lives outside this crate. An extractor hands the
//! engine plain text, or a [`SkipReason`] telling why it could not. The
//! bundled [`SidecarExtractor`] reads the plain-text renditions that
//! conversion tools (`pdftotext`, `pandoc`, ...) leave next to each document.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{MAX_FILE_SIZE, MIN_EXTRACTED_CHARS, OCR_PROBE_MIN_CHARS, OCR_PROBE_PAGES};
use crate::error::SkipReason;
use crate::types::{Language, RawText};

/// Page separator written by `pdftotext`.
const FORM_FEED: char = '\u{c}';

/// Source of document text.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of the document at `path`.
    fn extract(&self, path: &Path, language: Language) -> Result<RawText, SkipReason>;
}

/// Decide whether extracted PDF pages hold a usable text layer.
///
/// A document needs OCR when its first three pages together have fewer than
/// 100 non-blank chars, or when the whole document has fewer than 500.
///
/// # Examples
/// ```
/// use patent_segmenter::extract::assess_pages;
///
/// assert!(assess_pages(&["", " ", "p3", "long page"]).is_err());
/// ```
pub fn assess_pages(pages: &[&str]) -> Result<(), SkipReason> {
    let probe_chars: usize = pages
        .iter()
        .take(OCR_PROBE_PAGES)
        .map(|page| page.trim().chars().count())
        .sum();
    if pages.len() >= OCR_PROBE_PAGES && probe_chars < OCR_PROBE_MIN_CHARS {
        return Err(SkipReason::needs_ocr(format!(
            "first {OCR_PROBE_PAGES} pages hold only {probe_chars} chars"
        )));
    }

    let total_chars: usize = pages.iter().map(|page| page.trim().chars().count()).sum();
    if total_chars < MIN_EXTRACTED_CHARS {
        return Err(SkipReason::needs_ocr(format!(
            "document holds only {total_chars} chars"
        )));
    }

    Ok(())
}

/// Extractor that reads a `.txt` rendition stored beside each document.
///
/// For `P1(JP).pdf` the text is read from `P1(JP).pdf.txt`; a `.txt` file
/// is read directly. Renditions of PDFs are expected to separate pages with
/// form feeds and go through [`assess_pages`].
#[derive(Debug, Clone)]
pub struct SidecarExtractor {
    max_file_size: u64,
}

impl Default for SidecarExtractor {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl SidecarExtractor {
    /// Create an extractor with the default size limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the largest document size in bytes.
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Path of the plain-text rendition for `path`.
    #[must_use]
    pub fn sidecar_path(path: &Path) -> PathBuf {
        if extension_of(path) == "txt" {
            return path.to_path_buf();
        }
        let mut sidecar = path.as_os_str().to_os_string();
        sidecar.push(".txt");
        PathBuf::from(sidecar)
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

impl TextExtractor for SidecarExtractor {
    fn extract(&self, path: &Path, language: Language) -> Result<RawText, SkipReason> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let metadata = fs::metadata(path)
            .map_err(|e| SkipReason::unextractable(format!("cannot open {name}: {e}")))?;
        if metadata.len() > self.max_file_size {
            return Err(SkipReason::unextractable(format!(
                "file too large: {} bytes",
                metadata.len()
            )));
        }

        let extension = extension_of(path);
        let sidecar = Self::sidecar_path(path);
        if !sidecar.is_file() {
            return Err(match extension.as_str() {
                "doc" => SkipReason::unextractable("legacy .doc format without a text rendition"),
                _ => SkipReason::unextractable(format!("no text rendition for {name}")),
            });
        }

        let bytes = fs::read(&sidecar)
            .map_err(|e| SkipReason::unextractable(format!("cannot read {}: {e}", sidecar.display())))?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(file = %name, "Text rendition is not valid UTF-8, decoding lossily");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        if extension == "pdf" {
            let pages: Vec<&str> = text.split(FORM_FEED).collect();
            assess_pages(&pages)?;
        }

        let text = text.replace(FORM_FEED, "\n");
        tracing::debug!(file = %name, chars = text.chars().count(), "Extracted text");
        Ok(RawText::new(language, name, text))
    }
}
