//! Corpus processing: turn matched file pairs into aligned section and claim pairs.
//!
//! Each pair is extracted, cleaned, segmented and aligned independently, so
//! pairs run in parallel on the rayon pool. Outcomes keep the order of the
//! match report.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::align::{align, align_claims};
use crate::config::{ProcessOptions, DOMAIN_SAMPLE_CHARS};
use crate::error::SkipReason;
use crate::extract::TextExtractor;
use crate::matcher::{FilePair, MatchReport, Unmatched};
use crate::normalize::clean_text;
use crate::segmentation::SegmentEngine;
use crate::types::{char_len, truncate_chars, AlignedClaim, AlignedPair, Language};

const SEMICONDUCTOR_KEYWORDS: &[&str] = &["半導体", "トランジスタ", "ウェハ", "ウエハ", "集積回路", "MOSFET"];

const MECHANICAL_KEYWORDS: &[&str] = &["機械", "歯車", "軸受", "ベアリング", "モータ"];

/// Technical domain of a patent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Semiconductor,
    Mechanical,
    General,
}

impl Domain {
    /// Get the domain label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semiconductor => "semiconductor",
            Self::Mechanical => "mechanical",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify Japanese text by the keywords in its first 2000 chars.
///
/// Each keyword counts once. Semiconductor wins when it has strictly more
/// hits than mechanical; otherwise any mechanical hit gives mechanical.
///
/// # Examples
/// ```
/// use patent_segmenter::corpus::{classify_domain, Domain};
///
/// assert_eq!(classify_domain("半導体ウェハの洗浄"), Domain::Semiconductor);
/// assert_eq!(classify_domain("歯車を備えた減速機"), Domain::Mechanical);
/// assert_eq!(classify_domain("化合物の合成"), Domain::General);
/// ```
#[must_use]
pub fn classify_domain(text: &str) -> Domain {
    let sample = truncate_chars(text, DOMAIN_SAMPLE_CHARS);
    let hits = |keywords: &[&str]| keywords.iter().filter(|kw| sample.contains(*kw)).count();

    let semiconductor = hits(SEMICONDUCTOR_KEYWORDS);
    let mechanical = hits(MECHANICAL_KEYWORDS);

    if semiconductor > mechanical && semiconductor > 0 {
        Domain::Semiconductor
    } else if mechanical > 0 {
        Domain::Mechanical
    } else {
        Domain::General
    }
}

/// Aligned content of one patent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairAlignment {
    /// Patent identifier.
    pub patent_id: String,

    /// Source file name.
    pub source_file: String,

    /// Target file name.
    pub target_file: String,

    /// Domain label (configured or detected).
    pub domain: String,

    /// Number of source sections found.
    pub source_sections: usize,

    /// Number of target sections found.
    pub target_sections: usize,

    /// Aligned sections that passed the length filter.
    pub sections: Vec<AlignedPair>,

    /// Claims paired by number.
    pub claims: Vec<AlignedClaim>,
}

impl PairAlignment {
    /// Number of emitted entries (sections and claims).
    #[must_use]
    pub fn entries(&self) -> usize {
        self.sections.len() + self.claims.len()
    }
}

/// A pair that produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPair {
    /// Patent identifier.
    pub patent_id: String,

    /// Source file name.
    pub source_file: String,

    /// Target file name.
    pub target_file: String,

    /// Why the pair was skipped.
    pub reason: SkipReason,
}

/// Result of processing one matched pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairOutcome {
    Aligned(PairAlignment),
    Skipped(SkippedPair),
}

/// Counters of a corpus run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    /// Matched pairs processed.
    pub total_files: usize,

    /// Pairs that produced at least one entry.
    pub successful: usize,

    /// Pairs skipped because a document needs OCR.
    pub skipped_ocr: usize,

    /// Pairs skipped for any other reason.
    pub skipped_error: usize,

    /// Source files without a target file.
    pub skipped_no_match: usize,

    /// Aligned sections emitted.
    pub sections_imported: usize,

    /// Aligned claims emitted.
    pub claims_imported: usize,
}

impl CorpusStats {
    /// Count one outcome.
    pub fn record(&mut self, outcome: &PairOutcome) {
        self.total_files += 1;
        match outcome {
            PairOutcome::Aligned(alignment) => {
                self.sections_imported += alignment.sections.len();
                self.claims_imported += alignment.claims.len();
                if alignment.entries() > 0 {
                    self.successful += 1;
                }
            }
            PairOutcome::Skipped(skipped) => match skipped.reason {
                SkipReason::NeedsOcr { .. } => self.skipped_ocr += 1,
                _ => self.skipped_error += 1,
            },
        }
    }

    /// Sections and claims together.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.sections_imported + self.claims_imported
    }
}

/// Outcome of a whole corpus run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusReport {
    pub stats: CorpusStats,
    pub outcomes: Vec<PairOutcome>,
    pub unmatched: Vec<Unmatched>,
    pub warnings: Vec<String>,
}

/// Extract, segment and align one matched pair.
pub fn process_pair(
    pair: &FilePair,
    extractor: &dyn TextExtractor,
    options: &ProcessOptions,
) -> PairOutcome {
    let skipped = |reason: SkipReason| {
        tracing::warn!(
            patent_id = %pair.patent_id,
            source = %pair.source.name,
            reason = %reason,
            "Skipping pair"
        );
        PairOutcome::Skipped(SkippedPair {
            patent_id: pair.patent_id.clone(),
            source_file: pair.source.name.clone(),
            target_file: pair.target.name.clone(),
            reason,
        })
    };

    let source_raw = match extractor.extract(&pair.source.path, Language::Japanese) {
        Ok(raw) => raw,
        Err(reason) => return skipped(reason),
    };
    let target_raw = match extractor.extract(&pair.target.path, Language::Chinese) {
        Ok(raw) => raw,
        Err(reason) => return skipped(reason),
    };

    let source_text = clean_text(source_raw.as_str());
    let target_text = clean_text(target_raw.as_str());
    tracing::debug!(
        patent_id = %pair.patent_id,
        source_chars = char_len(&source_text),
        target_chars = char_len(&target_text),
        "Extracted pair"
    );

    let source = SegmentEngine::new(Language::Japanese).segment_document(&source_text);
    if !source.sections.has_structure() {
        return skipped(SkipReason::EmptySegmentation {
            language: Language::Japanese.to_string(),
        });
    }
    let target = SegmentEngine::new(Language::Chinese).segment_document(&target_text);
    if !target.sections.has_structure() {
        return skipped(SkipReason::EmptySegmentation {
            language: Language::Chinese.to_string(),
        });
    }

    let aligned = align(&source.sections, &target.sections);
    let claims = align_claims(&source.claims, &target.claims);

    if aligned.is_empty() && claims.is_empty() {
        return skipped(SkipReason::EmptyAlignment);
    }

    let domain = options
        .domain
        .clone()
        .unwrap_or_else(|| classify_domain(&source_text).to_string());

    let max = options.max_aligned_chars;
    let sections: Vec<AlignedPair> = aligned
        .into_iter()
        .filter(|pair| {
            char_len(&pair.source) >= options.min_aligned_chars
                && char_len(&pair.target) >= options.min_aligned_chars
        })
        .map(|pair| {
            AlignedPair::new(
                pair.key,
                truncate_chars(&pair.source, max),
                truncate_chars(&pair.target, max),
            )
        })
        .collect();

    let claims: Vec<AlignedClaim> = claims
        .into_iter()
        .map(|claim| AlignedClaim {
            source: truncate_chars(&claim.source, max).to_string(),
            target: truncate_chars(&claim.target, max).to_string(),
            number: claim.number,
        })
        .collect();

    tracing::debug!(
        patent_id = %pair.patent_id,
        sections = sections.len(),
        claims = claims.len(),
        "Aligned pair"
    );

    PairOutcome::Aligned(PairAlignment {
        patent_id: pair.patent_id.clone(),
        source_file: pair.source.name.clone(),
        target_file: pair.target.name.clone(),
        domain,
        source_sections: source.sections.len(),
        target_sections: target.sections.len(),
        sections,
        claims,
    })
}

/// Process every pair of a match report in parallel.
pub fn process_all(
    matches: &MatchReport,
    extractor: &dyn TextExtractor,
    options: &ProcessOptions,
) -> CorpusReport {
    process_all_with_progress(matches, extractor, options, &|_: &PairOutcome| {})
}

/// Process every pair in parallel, calling `progress` after each pair.
pub fn process_all_with_progress(
    matches: &MatchReport,
    extractor: &dyn TextExtractor,
    options: &ProcessOptions,
    progress: &(dyn Fn(&PairOutcome) + Sync),
) -> CorpusReport {
    let outcomes: Vec<PairOutcome> = matches
        .pairs
        .par_iter()
        .map(|pair| {
            let outcome = process_pair(pair, extractor, options);
            progress(&outcome);
            outcome
        })
        .collect();

    let mut stats = CorpusStats {
        skipped_no_match: matches.unmatched.len(),
        ..CorpusStats::default()
    };
    for outcome in &outcomes {
        stats.record(outcome);
    }

    tracing::info!(
        total = stats.total_files,
        successful = stats.successful,
        sections = stats.sections_imported,
        claims = stats.claims_imported,
        "Processed corpus"
    );

    CorpusReport {
        stats,
        outcomes,
        unmatched: matches.unmatched.clone(),
        warnings: matches.warnings.clone(),
    }
}
