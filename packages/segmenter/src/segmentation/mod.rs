//! Section segmentation for Japanese and Chinese patent documents.
//!
//! A document is split two ways: into numbered paragraphs (`【0001】`) and
//! into named legal sections (`【技術分野】`, `【先前技術】`, ...). Both end up
//! in one [`SectionMap`](crate::types::SectionMap) per document.

mod config;
mod engine;
mod header;
mod markers;
mod paragraph;
mod types;

pub use config::{create_chinese_layout, create_japanese_layout};
pub use engine::{segment, SegmentEngine, SegmentedDocument};
pub use header::split_headers;
pub use markers::{MarkerIndex, MarkerMatch};
pub use paragraph::split_paragraphs;
pub use types::{LanguageLayout, SectionSpec};
