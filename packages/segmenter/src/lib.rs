//! Patent Segmenter - Split and align bilingual patent documents.
//!
//! This crate segments Japanese and Traditional Chinese patent filings into
//! numbered paragraphs, named legal sections and individual claims, and
//! aligns corresponding sections across the two language variants of the
//! same patent.
//!
//! # Example
//!
//! ```
//! use patent_segmenter::{align, segment, Language};
//!
//! let body = "本発明は、半導体装置の製造方法に関し、特に基板の洗浄工程における金属汚染の低減方法に関するものである。";
//! let source = segment(&format!("【0001】{body}"), Language::Japanese);
//!
//! let body = "本發明係關於一種半導體裝置之製造方法,特別是關於在基板清洗步驟中降低金屬污染之方法,並提供其應用及裝置。";
//! let target = segment(&format!("[0001]{body}"), Language::Chinese);
//!
//! let pairs = align(&source, &target);
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].key.to_string(), "0001");
//! ```
//!
//! # Architecture
//!
//! The segmenter is organized into several modules:
//!
//! - [`config`]: Thresholds, run options and validation
//! - [`types`]: Core data types (SectionMap, SectionKey, Claim, etc.)
//! - [`error`]: Error types, skip reasons and Result alias
//! - [`normalize`]: Text cleaning and canonicalization
//! - [`segmentation`]: Paragraph and header segmentation
//! - [`claims`]: Claims block extraction and claim splitting
//! - [`align`]: Section and claim alignment
//! - [`matcher`]: Source/target file pairing
//! - [`extract`]: Text extraction seam
//! - [`corpus`]: Parallel corpus processing
//! - [`output`]: JSON/YAML reports
//! - [`cli`]: Command-line interface

pub mod align;
pub mod claims;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod normalize;
pub mod output;
pub mod segmentation;
pub mod types;

// Re-export main functions
pub use align::{align, align_claims};
pub use claims::{extract_claims_block, split_claims};
pub use matcher::{match_directories, match_files};
pub use normalize::{clean_text, normalize};
pub use segmentation::{segment, SegmentEngine, SegmentedDocument};

// Re-export commonly used items
pub use config::{parse_language, ProcessOptions};
pub use error::{Result, SegmenterError, SkipReason};
pub use types::{
    AlignedClaim, AlignedPair, Claim, HeaderKind, Language, NormalizedText, ParagraphNumber,
    RawText, SectionKey, SectionMap,
};
