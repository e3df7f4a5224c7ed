//! End-to-end integration tests for the segmenter pipeline.
//!
//! Tests the complete pipeline from cleaning raw text to aligned sections
//! and claims using a Japanese/Chinese fixture pair of the same patent (P100).

use std::fs;
use std::path::{Path, PathBuf};

use patent_segmenter::corpus::{process_all, PairOutcome};
use patent_segmenter::extract::SidecarExtractor;
use patent_segmenter::{
    align, align_claims, clean_text, extract_claims_block, match_directories, normalize, segment,
    split_claims, HeaderKind, Language, ProcessOptions, SectionKey, SectionMap, SkipReason,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Clean and segment one fixture.
fn segment_fixture(name: &str, language: Language) -> SectionMap {
    segment(&clean_text(&load_fixture(name)), language)
}

fn keys(sections: &SectionMap) -> Vec<String> {
    sections.iter().map(|(key, _)| key.to_string()).collect()
}

// =============================================================================
// Segmentation
// =============================================================================

#[test]
fn test_japanese_fixture_sections() {
    let sections = segment_fixture("P100_ja.txt", Language::Japanese);

    assert_eq!(sections.header(HeaderKind::Title), Some("半導体装置の製造方法"));
    for kind in [
        HeaderKind::TechnicalField,
        HeaderKind::Background,
        HeaderKind::Problem,
        HeaderKind::Solution,
        HeaderKind::Abstract,
        HeaderKind::Claims,
    ] {
        assert!(sections.header(kind).is_some(), "missing {kind}");
    }

    // 【発明の概要】 is directly followed by the next heading
    assert!(sections.header(HeaderKind::Summary).is_none());
    assert!(sections.header(HeaderKind::PriorArt).is_none());
    assert!(sections.contains(&SectionKey::FullText));

    let paragraphs: Vec<String> = sections.paragraphs().map(|(n, _)| n.key()).collect();
    assert_eq!(paragraphs, vec!["0001", "0002", "0003", "0004"]);
}

#[test]
fn test_japanese_fixture_section_content() {
    let sections = segment_fixture("P100_ja.txt", Language::Japanese);

    let technical_field = sections.header(HeaderKind::TechnicalField).unwrap();
    assert!(technical_field.starts_with("本発明は、半導体装置の製造方法"));
    assert!(!technical_field.contains("【0001】"));

    let abstract_text = sections.header(HeaderKind::Abstract).unwrap();
    assert!(abstract_text.starts_with("【課題】"));
    assert!(!abstract_text.contains("【要約】"));
    assert!(!abstract_text.contains("【図1】"));

    // Page number lines are removed by cleaning
    let full_text = sections.get(&SectionKey::FullText).unwrap();
    assert!(!full_text.lines().any(|l| l.trim() == "1 / 12"));
}

#[test]
fn test_chinese_fixture_sections() {
    let sections = segment_fixture("P100_zh.txt", Language::Chinese);

    assert_eq!(sections.header(HeaderKind::Title), Some("半導體裝置之製造方法"));
    for kind in [
        HeaderKind::Abstract,
        HeaderKind::TechnicalField,
        HeaderKind::PriorArt,
        HeaderKind::Problem,
        HeaderKind::Solution,
        HeaderKind::Claims,
    ] {
        assert!(sections.header(kind).is_some(), "missing {kind}");
    }
    assert!(sections.header(HeaderKind::Summary).is_none());
    assert!(sections.header(HeaderKind::Background).is_none());

    let abstract_text = sections.header(HeaderKind::Abstract).unwrap();
    assert!(abstract_text.starts_with("本發明提供"));
    assert!(!abstract_text.contains("【技術領域】"));

    // Full-width paragraph brackets and digits are canonicalized
    let paragraphs: Vec<String> = sections.paragraphs().map(|(n, _)| n.key()).collect();
    assert_eq!(paragraphs, vec!["0001", "0002", "0003", "0004"]);
}

#[test]
fn test_claims_block_replaces_header_claims() {
    let sections = segment_fixture("P100_ja.txt", Language::Japanese);
    let claims = sections.header(HeaderKind::Claims).unwrap();

    assert!(claims.starts_with("【請求項1】"));
    assert!(!claims.contains("特許請求の範囲"));
    assert!(!claims.contains("要約書"));
    assert!(!claims.contains("【図1】"));
}

#[test]
fn test_two_page_document_without_paragraphs() {
    let technical_field: String = "基板処理装置に関する技術である。".chars().cycle().take(300).collect();
    let background: String = "従来の装置には問題があった。".chars().cycle().take(50).collect();
    let text = format!("【技術分野】\n{technical_field}\n1 / 2\n【背景技術】\n{background}\n2 / 2\n");

    let sections = segment(&clean_text(&text), Language::Japanese);

    assert_eq!(
        sections.header(HeaderKind::TechnicalField).map(|t| t.chars().count()),
        Some(300)
    );
    assert!(sections.header(HeaderKind::Background).is_none());
    assert_eq!(sections.paragraphs().count(), 0);
}

#[test]
fn test_normalize_is_idempotent_on_fixtures() {
    for (name, language) in [
        ("P100_ja.txt", Language::Japanese),
        ("P100_zh.txt", Language::Chinese),
    ] {
        let once = normalize(&clean_text(&load_fixture(name)), language);
        let twice = normalize(once.as_str(), language);
        assert_eq!(once.as_str(), twice.as_str(), "{name}");
    }
}

// =============================================================================
// Alignment
// =============================================================================

#[test]
fn test_fixture_pair_aligns_by_paragraph() {
    let source = segment_fixture("P100_ja.txt", Language::Japanese);
    let target = segment_fixture("P100_zh.txt", Language::Chinese);

    let pairs = align(&source, &target);
    let aligned: Vec<String> = pairs.iter().map(|p| p.key.to_string()).collect();
    assert_eq!(aligned, vec!["0001", "0002", "0003", "0004"]);
    assert!(pairs[0].source.starts_with("本発明は"));
    assert!(pairs[0].target.starts_with("本發明係關於"));
}

#[test]
fn test_fixture_pair_falls_back_to_named_sections() {
    let mut source = segment_fixture("P100_ja.txt", Language::Japanese);
    let target = segment_fixture("P100_zh.txt", Language::Chinese);

    // Drop the source paragraphs to force the named-section fallback
    let mut headers_only = SectionMap::new();
    for (key, text) in source.iter().filter(|(key, _)| !key.is_paragraph()) {
        headers_only.insert(*key, text);
    }
    source = headers_only;

    let aligned = keys_of(&align(&source, &target));
    assert_eq!(
        aligned,
        vec![
            "title",
            "abstract",
            "technical_field",
            "background",
            "problem",
            "solution",
            "claims",
            "full_text",
        ]
    );
}

fn keys_of(pairs: &[patent_segmenter::AlignedPair]) -> Vec<String> {
    pairs.iter().map(|p| p.key.to_string()).collect()
}

#[test]
fn test_fixture_claims_align_by_number() {
    let ja = normalize(&clean_text(&load_fixture("P100_ja.txt")), Language::Japanese);
    let zh = normalize(&clean_text(&load_fixture("P100_zh.txt")), Language::Chinese);

    let source = split_claims(&extract_claims_block(ja.as_str(), Language::Japanese).unwrap());
    let target = split_claims(&extract_claims_block(zh.as_str(), Language::Chinese).unwrap());
    assert_eq!(source.len(), 3);
    assert_eq!(target.len(), 3);

    let claims = align_claims(&source, &target);
    let numbers: Vec<&str> = claims.iter().map(|c| c.number.as_str()).collect();
    assert_eq!(numbers, vec!["1", "2", "3"]);
    assert!(claims[1].source.starts_with("前記オゾン水"));
    assert!(claims[1].target.starts_with("如請求項1所述"));
    assert!(!claims[2].target.contains("【發明圖式】"));
}

// =============================================================================
// Corpus processing
// =============================================================================

/// Build a source/target directory layout with text renditions beside the documents.
fn corpus_dirs(root: &Path) -> (PathBuf, PathBuf) {
    let jp = root.join("jp");
    let zh = root.join("zh");
    fs::create_dir_all(&jp).unwrap();
    fs::create_dir_all(&zh).unwrap();

    // Aligned pair with two target candidates; the final version wins
    fs::write(jp.join("P100(JP).docx"), b"").unwrap();
    fs::write(jp.join("P100(JP).docx.txt"), load_fixture("P100_ja.txt")).unwrap();
    fs::write(zh.join("P100(SCW+KVN)Final.docx"), b"").unwrap();
    fs::write(zh.join("P100(SCW+KVN)Final.docx.txt"), load_fixture("P100_zh.txt")).unwrap();
    fs::write(zh.join("P100(SCW).docx"), b"").unwrap();

    // Source without a target
    fs::write(jp.join("P200(JP).pdf"), b"").unwrap();

    // Pair without text renditions
    fs::write(jp.join("P300(JP).docx"), b"").unwrap();
    fs::write(zh.join("P300(ZH).docx"), b"").unwrap();

    // Scanned source with almost no text layer
    fs::write(jp.join("P400(JP).pdf"), b"").unwrap();
    fs::write(jp.join("P400(JP).pdf.txt"), "図1\u{c}図2\u{c}図3").unwrap();
    fs::write(zh.join("P400(ZH).pdf"), b"").unwrap();
    fs::write(zh.join("P400(ZH).pdf.txt"), load_fixture("P100_zh.txt")).unwrap();

    (jp, zh)
}

#[test]
fn test_match_directories_pairs_by_identifier() {
    let temp_dir = tempdir().unwrap();
    let (jp, zh) = corpus_dirs(temp_dir.path());

    let report = match_directories(&jp, &zh).unwrap();

    let mut pairs: Vec<(&str, &str)> = report
        .pairs
        .iter()
        .map(|p| (p.patent_id.as_str(), p.target.name.as_str()))
        .collect();
    pairs.sort_unstable();
    assert_eq!(
        pairs,
        vec![
            ("P100", "P100(SCW+KVN)Final.docx"),
            ("P300", "P300(ZH).docx"),
            ("P400", "P400(ZH).pdf"),
        ]
    );

    assert_eq!(report.unmatched.len(), 1);
    assert_eq!(report.unmatched[0].file.name, "P200(JP).pdf");
    assert!(matches!(report.unmatched[0].reason, SkipReason::NoMatch { .. }));
}

#[test]
fn test_process_corpus_end_to_end() {
    let temp_dir = tempdir().unwrap();
    let (jp, zh) = corpus_dirs(temp_dir.path());

    let matches = match_directories(&jp, &zh).unwrap();
    let report = process_all(&matches, &SidecarExtractor::new(), &ProcessOptions::default());

    let stats = report.stats;
    assert_eq!(stats.total_files, 3);
    assert_eq!(stats.successful, 1);
    assert_eq!(stats.skipped_ocr, 1);
    assert_eq!(stats.skipped_error, 1);
    assert_eq!(stats.skipped_no_match, 1);
    assert_eq!(stats.sections_imported, 4);
    assert_eq!(stats.claims_imported, 3);
    assert_eq!(stats.total_entries(), 7);

    let alignment = report
        .outcomes
        .iter()
        .find_map(|outcome| match outcome {
            PairOutcome::Aligned(alignment) => Some(alignment),
            PairOutcome::Skipped(_) => None,
        })
        .unwrap();
    assert_eq!(alignment.patent_id, "P100");
    assert_eq!(alignment.target_file, "P100(SCW+KVN)Final.docx");
    assert_eq!(alignment.domain, "semiconductor");
    assert_eq!(keys_of(&alignment.sections), vec!["0001", "0002", "0003", "0004"]);
    assert!(alignment
        .sections
        .iter()
        .all(|p| p.source.chars().count() >= 100 && p.target.chars().count() >= 100));
}

#[test]
fn test_process_corpus_with_fixed_domain() {
    let temp_dir = tempdir().unwrap();
    let (jp, zh) = corpus_dirs(temp_dir.path());

    let matches = match_directories(&jp, &zh).unwrap();
    let options = ProcessOptions::default().with_domain("electronics");
    let report = process_all(&matches, &SidecarExtractor::new(), &options);

    for outcome in &report.outcomes {
        if let PairOutcome::Aligned(alignment) = outcome {
            assert_eq!(alignment.domain, "electronics");
        }
    }
    assert_eq!(report.stats.successful, 1);
}

#[test]
fn test_chinese_fixture_section_keys() {
    let sections = segment_fixture("P100_zh.txt", Language::Chinese);
    let all = keys(&sections);
    assert!(all.contains(&"prior_art".to_string()));
    assert!(all.contains(&"full_text".to_string()));
}
