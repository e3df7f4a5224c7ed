//! Configuration constants and validation functions for the segmenter.

use std::path::Path;

use crate::error::{Result, SegmenterError};
use crate::types::Language;

/// Minimum paragraph body length in chars; shorter bodies are noise.
pub const MIN_PARAGRAPH_CHARS: usize = 50;

/// Maximum paragraph body length in chars; longer bodies are truncated.
pub const MAX_PARAGRAPH_CHARS: usize = 8000;

/// Header sections must be strictly longer than this to be kept.
pub const MIN_SECTION_CHARS: usize = 80;

/// The whole document is kept as `full_text` only above this length.
pub const MIN_FULL_TEXT_CHARS: usize = 200;

/// A claims block replaces the header-derived claims section only above this length.
pub const MIN_CLAIMS_BLOCK_CHARS: usize = 200;

/// Aligned pairs shorter than this on either side are not emitted by the corpus processor.
pub const DEFAULT_MIN_ALIGNED_CHARS: usize = 100;

/// Aligned texts are truncated to this length by the corpus processor.
pub const DEFAULT_MAX_ALIGNED_CHARS: usize = 10_000;

/// Largest document the extractor will open (50 MB).
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Number of leading pages checked for an image-only document.
pub const OCR_PROBE_PAGES: usize = 3;

/// Leading pages with fewer extracted chars than this need OCR.
pub const OCR_PROBE_MIN_CHARS: usize = 100;

/// Documents with fewer extracted chars than this in total need OCR.
pub const MIN_EXTRACTED_CHARS: usize = 500;

/// Number of chars inspected by the domain classifier.
pub const DOMAIN_SAMPLE_CHARS: usize = 2000;

/// Document extensions considered by the file matcher.
pub const DEFAULT_DOCUMENT_EXTENSIONS: &[&str] = &["doc", "docx", "pdf"];

/// Environment variable overriding the minimum aligned text length.
pub const ENV_MIN_ALIGNED_CHARS: &str = "PATENT_SEGMENTER_MIN_ALIGNED_CHARS";

/// Environment variable overriding the maximum aligned text length.
pub const ENV_MAX_ALIGNED_CHARS: &str = "PATENT_SEGMENTER_MAX_ALIGNED_CHARS";

/// Environment variable overriding the document extensions (comma separated).
pub const ENV_EXTENSIONS: &str = "PATENT_SEGMENTER_EXTENSIONS";

/// Options for a corpus processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Minimum chars on both sides of an emitted pair.
    pub min_aligned_chars: usize,

    /// Texts of emitted pairs are truncated to this many chars.
    pub max_aligned_chars: usize,

    /// Lowercase extensions (without dot) eligible for matching.
    pub extensions: Vec<String>,

    /// Domain label applied to every pair instead of auto-detection.
    pub domain: Option<String>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            min_aligned_chars: DEFAULT_MIN_ALIGNED_CHARS,
            max_aligned_chars: DEFAULT_MAX_ALIGNED_CHARS,
            extensions: DEFAULT_DOCUMENT_EXTENSIONS
                .iter()
                .map(|e| (*e).to_string())
                .collect(),
            domain: None,
        }
    }
}

impl ProcessOptions {
    /// Build options from the environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let min_aligned_chars = std::env::var(ENV_MIN_ALIGNED_CHARS)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.min_aligned_chars);

        let max_aligned_chars = std::env::var(ENV_MAX_ALIGNED_CHARS)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_aligned_chars);

        let extensions = std::env::var(ENV_EXTENSIONS)
            .ok()
            .map(|v| parse_extensions(&v))
            .filter(|exts| !exts.is_empty())
            .unwrap_or(defaults.extensions);

        Self {
            min_aligned_chars,
            max_aligned_chars,
            extensions,
            domain: None,
        }
    }

    /// Set the fixed domain label.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the eligible document extensions.
    #[must_use]
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Whether `extension` (any case, without dot) is eligible.
    #[must_use]
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

/// Parse a comma-separated extension list.
///
/// # Examples
/// ```
/// use patent_segmenter::config::parse_extensions;
///
/// assert_eq!(parse_extensions(".DOCX, pdf,"), vec!["docx", "pdf"]);
/// ```
pub fn parse_extensions(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Parse a language tag.
///
/// # Examples
/// ```
/// use patent_segmenter::config::parse_language;
/// use patent_segmenter::Language;
///
/// assert_eq!(parse_language("ja").unwrap(), Language::Japanese);
/// assert_eq!(parse_language("zh-TW").unwrap(), Language::Chinese);
/// assert!(parse_language("fr").is_err());
/// ```
pub fn parse_language(tag: &str) -> Result<Language> {
    match tag.trim().to_lowercase().as_str() {
        "ja" | "jp" | "jpn" | "japanese" => Ok(Language::Japanese),
        "zh" | "zh-tw" | "zh-hant" | "zho" | "chinese" => Ok(Language::Chinese),
        _ => Err(SegmenterError::InvalidLanguage(tag.to_string())),
    }
}

/// Validate that `path` is an existing directory.
pub fn validate_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(SegmenterError::NotADirectory(path.to_path_buf()))
    }
}
