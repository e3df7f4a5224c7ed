//! Section alignment between the source and target variant of one patent.
//!
//! Numbered paragraphs are the most precise alignment unit, so they win
//! outright when both documents have any in common. Only documents without
//! shared paragraph numbers fall back to named sections.

use crate::types::{AlignedClaim, AlignedPair, Claim, HeaderKind, SectionKey, SectionMap};

/// Named-section correspondences, in output order.
///
/// Japanese filings split 背景技術 and 先行技術文献 where Chinese filings only
/// have 先前技術, so the Japanese background is paired with the Chinese prior
/// art as well.
pub const FALLBACK_TABLE: &[(SectionKey, SectionKey)] = &[
    (SectionKey::Header(HeaderKind::Title), SectionKey::Header(HeaderKind::Title)),
    (SectionKey::Header(HeaderKind::Abstract), SectionKey::Header(HeaderKind::Abstract)),
    (
        SectionKey::Header(HeaderKind::TechnicalField),
        SectionKey::Header(HeaderKind::TechnicalField),
    ),
    (SectionKey::Header(HeaderKind::Background), SectionKey::Header(HeaderKind::PriorArt)),
    (SectionKey::Header(HeaderKind::PriorArt), SectionKey::Header(HeaderKind::PriorArt)),
    (SectionKey::Header(HeaderKind::Summary), SectionKey::Header(HeaderKind::Summary)),
    (SectionKey::Header(HeaderKind::Problem), SectionKey::Header(HeaderKind::Problem)),
    (SectionKey::Header(HeaderKind::Solution), SectionKey::Header(HeaderKind::Solution)),
    (SectionKey::Header(HeaderKind::Effects), SectionKey::Header(HeaderKind::Effects)),
    (
        SectionKey::Header(HeaderKind::Description),
        SectionKey::Header(HeaderKind::Description),
    ),
    (SectionKey::Header(HeaderKind::Examples), SectionKey::Header(HeaderKind::Examples)),
    (SectionKey::Header(HeaderKind::Claims), SectionKey::Header(HeaderKind::Claims)),
    (SectionKey::FullText, SectionKey::FullText),
];

/// Align the sections of two documents.
///
/// 1. Paragraph numbers present in both maps, ascending. If there is at
///    least one, exactly these are returned.
/// 2. Otherwise every [`FALLBACK_TABLE`] entry present on both sides, in
///    table order.
///
/// An empty result means nothing could be aligned.
///
/// # Examples
/// ```
/// use patent_segmenter::{align, HeaderKind, SectionKey, SectionMap};
///
/// let mut source = SectionMap::new();
/// source.insert(SectionKey::Header(HeaderKind::Background), "背景");
/// let mut target = SectionMap::new();
/// target.insert(SectionKey::Header(HeaderKind::PriorArt), "先前技術");
///
/// let pairs = align(&source, &target);
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].target, "先前技術");
/// ```
#[must_use]
pub fn align(source: &SectionMap, target: &SectionMap) -> Vec<AlignedPair> {
    let paragraphs: Vec<AlignedPair> = source
        .paragraphs()
        .filter_map(|(number, source_text)| {
            let key = SectionKey::Paragraph(number);
            target
                .get(&key)
                .map(|target_text| AlignedPair::new(key, source_text, target_text))
        })
        .collect();

    if !paragraphs.is_empty() {
        tracing::debug!(pairs = paragraphs.len(), "Aligned by paragraph number");
        return paragraphs;
    }

    let sections: Vec<AlignedPair> = FALLBACK_TABLE
        .iter()
        .filter_map(|(source_key, target_key)| {
            let source_text = source.get(source_key)?;
            let target_text = target.get(target_key)?;
            Some(AlignedPair::new(*source_key, source_text, target_text))
        })
        .collect();

    tracing::debug!(pairs = sections.len(), "Aligned by named section");
    sections
}

/// Pair claims by number.
///
/// Every source claim is paired with the first target claim carrying the
/// same number; source claims without a counterpart are skipped.
#[must_use]
pub fn align_claims(source: &[Claim], target: &[Claim]) -> Vec<AlignedClaim> {
    source
        .iter()
        .filter_map(|claim| {
            let counterpart = target.iter().find(|t| t.number == claim.number)?;
            Some(AlignedClaim {
                number: claim.number.clone(),
                source: claim.text.clone(),
                target: counterpart.text.clone(),
            })
        })
        .collect()
}
