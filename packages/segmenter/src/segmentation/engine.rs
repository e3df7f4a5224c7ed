//! Segment engine that combines normalization, paragraph, header and claims splitting.

use super::header::split_headers;
use super::paragraph::split_paragraphs;
use crate::claims::{extract_claims_block, split_claims};
use crate::config::{MIN_CLAIMS_BLOCK_CHARS, MIN_FULL_TEXT_CHARS};
use crate::normalize::normalize;
use crate::types::{char_len, Claim, HeaderKind, Language, NormalizedText, SectionKey, SectionMap};

/// Section map and claims of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentedDocument {
    pub sections: SectionMap,

    /// Claims split from the claims block, whatever its length.
    pub claims: Vec<Claim>,
}

/// Engine for segmenting documents of one language.
///
/// Holds no per-document state; one engine can segment any number of
/// documents, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct SegmentEngine {
    language: Language,
}

impl SegmentEngine {
    /// Create a new segment engine.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Get the language this engine segments.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Normalize and segment raw text.
    #[must_use]
    pub fn segment(&self, text: &str) -> SectionMap {
        self.segment_normalized(&normalize(text, self.language))
    }

    /// Normalize once, then segment and split the claims.
    ///
    /// Claims always come from the claims block, so they never run into the
    /// abstract or drawings that follow it.
    #[must_use]
    pub fn segment_document(&self, text: &str) -> SegmentedDocument {
        let normalized = normalize(text, self.language);
        let (sections, block) = self.split(&normalized);
        let claims = block.as_deref().map(split_claims).unwrap_or_default();
        tracing::debug!(
            language = %self.language(),
            sections = sections.len(),
            claims = claims.len(),
            "Segmented document"
        );
        SegmentedDocument { sections, claims }
    }

    /// Segment already normalized text, using the language it was normalized for.
    ///
    /// The map holds, in this order of precedence:
    /// - `full_text` when the document exceeds 200 chars
    /// - every kept numbered paragraph
    /// - every kept header section
    /// - the claims block under `claims` when it exceeds 200 chars,
    ///   replacing the header-derived claims section
    #[must_use]
    pub fn segment_normalized(&self, text: &NormalizedText) -> SectionMap {
        self.split(text).0
    }

    fn split(&self, text: &NormalizedText) -> (SectionMap, Option<String>) {
        let language = text.language();
        let text = text.as_str();
        let mut sections = SectionMap::new();

        if char_len(text) > MIN_FULL_TEXT_CHARS {
            sections.insert(SectionKey::FullText, text);
        }

        for (number, body) in split_paragraphs(text) {
            sections.insert(SectionKey::Paragraph(number), body);
        }

        for (kind, content) in split_headers(text, language) {
            sections.insert(SectionKey::Header(kind), content);
        }

        let block = extract_claims_block(text, language);
        if let Some(block) = block.as_deref().filter(|b| char_len(b) > MIN_CLAIMS_BLOCK_CHARS) {
            sections.insert(SectionKey::Header(HeaderKind::Claims), block);
        }

        if !sections.has_structure() {
            tracing::debug!(language = %language, "No paragraph or header sections found");
        }

        (sections, block)
    }
}

/// Normalize `text` and split it into its section map.
///
/// # Examples
/// ```
/// use patent_segmenter::{segment, HeaderKind, Language};
///
/// let sections = segment("【発明の名称】半導体装置", Language::Japanese);
/// assert_eq!(sections.header(HeaderKind::Title), Some("半導体装置"));
/// assert!(segment("", Language::Chinese).is_empty());
/// ```
#[must_use]
pub fn segment(text: &str, language: Language) -> SectionMap {
    SegmentEngine::new(language).segment(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParagraphNumber;
    use pretty_assertions::assert_eq;

    fn filler(prefix: &str, len: usize) -> String {
        let mut s = prefix.to_string();
        while char_len(&s) < len {
            s.push('あ');
        }
        s
    }

    #[test]
    fn test_segment_end_to_end_japanese() {
        let field = filler("本発明は", 300);
        let text = format!(
            "送付状 御中\n【書類名】明細書\n【発明の名称】半導体装置\n【技術分野】\n{field}\n【背景技術】\n{}",
            filler("背景", 50)
        );
        let sections = segment(&text, Language::Japanese);

        assert_eq!(sections.header(HeaderKind::TechnicalField), Some(field.as_str()));
        assert_eq!(sections.header(HeaderKind::Title), Some("半導体装置"));
        assert!(sections.header(HeaderKind::Background).is_none());

        let full_text = sections.get(&SectionKey::FullText).unwrap();
        assert!(full_text.starts_with("【書類名】明細書"));
    }

    #[test]
    fn test_segment_full_width_paragraphs() {
        let text = format!("【０００１】{}\n【０００２】{}", filler("一", 60), filler("二", 60));
        let sections = segment(&text, Language::Japanese);
        let numbers: Vec<ParagraphNumber> = sections.paragraphs().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![ParagraphNumber::new(1), ParagraphNumber::new(2)]);
        // 122 chars plus markers stays below the full-text floor.
        assert!(!sections.contains(&SectionKey::FullText));
    }

    #[test]
    fn test_claims_block_replaces_header_claims() {
        let claim_one = filler("基板を備える装置", 120);
        let claim_two = filler("請求項1に記載の装置", 120);
        let text = format!(
            "【技術分野】\n{}\n【書類名】特許請求の範囲\n【請求項1】\n{claim_one}\n【請求項2】\n{claim_two}\n【書類名】図面\n{}",
            filler("分野", 100),
            filler("図", 100),
        );
        let sections = segment(&text, Language::Japanese);

        let claims = sections.header(HeaderKind::Claims).unwrap();
        assert_eq!(claims, format!("【請求項1】\n{claim_one}\n【請求項2】\n{claim_two}"));
    }

    #[test]
    fn test_short_claims_block_keeps_header_claims() {
        let text = format!(
            "【技術分野】\n{}\n【特許請求の範囲】\n【請求項1】\n{}",
            filler("分野", 100),
            filler("装置", 100),
        );
        let sections = segment(&text, Language::Japanese);
        let claims = sections.header(HeaderKind::Claims).unwrap();
        assert!(claims.starts_with("【請求項1】"));
        assert_eq!(char_len(claims), 6 + 1 + 100);
    }

    #[test]
    fn test_unstructured_text_has_only_full_text() {
        let text = filler("構造のない文章", 250);
        let sections = segment(&text, Language::Chinese);
        assert_eq!(sections.len(), 1);
        assert!(!sections.has_structure());
    }

    #[test]
    fn test_segment_document_claims_stop_at_abstract() {
        let text = format!(
            "【技術分野】\n{}\n【書類名】特許請求の範囲\n【請求項1】\n基板を備える装置。\n【書類名】要約書\n【要約】\n{}\n【書類名】図面\n【図1】",
            filler("分野", 100),
            filler("要約", 100),
        );
        let document = SegmentEngine::new(Language::Japanese).segment_document(&text);

        // The short block leaves the header-derived claims section in the map
        let header_claims = document.sections.header(HeaderKind::Claims).unwrap();
        assert!(header_claims.contains("【要約】"));

        assert_eq!(document.claims, vec![Claim::new("1", "基板を備える装置。")]);
    }

    #[test]
    fn test_segment_document_without_claims() {
        let text = format!("【技術領域】\n{}", filler("本發明涉及", 120));
        let engine = SegmentEngine::new(Language::Chinese);
        let document = engine.segment_document(&text);
        assert!(document.sections.header(HeaderKind::TechnicalField).is_some());
        assert!(document.claims.is_empty());
        assert_eq!(engine.language(), Language::Chinese);
    }
}
