//! Error types for the segmenter.
//!
//! Uses the dual-error pattern: `SegmenterError` for caller-level failures
//! (unreadable directories, output writes, bad arguments) and `SkipReason`
//! for the non-fatal per-document outcomes of a batch run.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Main error type for the segmenter library.
#[derive(Debug, Error)]
pub enum SegmenterError {
    /// Unknown language tag.
    #[error("Invalid language: '{0}'. Expected 'ja' (Japanese) or 'zh' (Chinese)")]
    InvalidLanguage(String),

    /// Unknown output format.
    #[error("Invalid output format: '{0}'. Expected 'json' or 'yaml'")]
    InvalidFormat(String),

    /// Input path is missing or not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A single document could not be extracted.
    #[error("{0}")]
    Skipped(#[from] SkipReason),

    /// Directory listing failed.
    #[error("Failed to list directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for segmenter operations.
pub type Result<T> = std::result::Result<T, SegmenterError>;

/// Why a file or document pair produced nothing.
///
/// None of these abort a batch; they are collected per document.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// File missing, oversized, unsupported or unreadable.
    #[error("Unextractable: {reason}")]
    Unextractable { reason: String },

    /// Image-based source without a text layer.
    #[error("Needs OCR: {reason}")]
    NeedsOcr { reason: String },

    /// Neither paragraph nor header sections were found.
    #[error("No paragraph or header sections found in {language} text")]
    EmptySegmentation { language: String },

    /// Both sides segmented but no section keys intersect.
    #[error("No sections aligned between source and target")]
    EmptyAlignment,

    /// No patent identifier in the file name.
    #[error("No patent identifier in file name")]
    NoIdentifier,

    /// No target-language file shares the identifier.
    #[error("No target file found for patent {patent_id}")]
    NoMatch { patent_id: String },
}

impl SkipReason {
    /// Create an `Unextractable` reason.
    pub fn unextractable(reason: impl Into<String>) -> Self {
        Self::Unextractable {
            reason: reason.into(),
        }
    }

    /// Create a `NeedsOcr` reason.
    pub fn needs_ocr(reason: impl Into<String>) -> Self {
        Self::NeedsOcr {
            reason: reason.into(),
        }
    }
}
