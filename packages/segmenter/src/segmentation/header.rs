//! Named legal section splitting.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::markers::MarkerIndex;
use super::types::LanguageLayout;
use crate::config::MIN_SECTION_CHARS;
use crate::types::{char_len, HeaderKind, Language};

/// Leading paragraph number token (`【0001】`, `[12]`) at the start of section content.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LEADING_NUMBERING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:【\s*\d+\s*】|\[\s*\d+\s*\])\s*").expect("valid regex")
});

/// Split normalized text into named header sections.
///
/// For every section of the language layout, the content starts after the
/// first match of its marker and ends at the first *later section in layout
/// order* whose marker matches after that point, or at the end of the text.
/// Content of 80 chars or less is discarded. Title and abstract are
/// extracted with their own single-shot markers.
///
/// Missing markers are not an error; the section is simply absent.
#[must_use]
pub fn split_headers(text: &str, language: Language) -> BTreeMap<HeaderKind, String> {
    let layout = LanguageLayout::for_language(language);
    let mut sections = BTreeMap::new();

    if let Some(title) = extract_title(text, layout) {
        sections.insert(HeaderKind::Title, title);
    }

    if let Some(abstract_text) = extract_abstract(text, layout) {
        sections.insert(HeaderKind::Abstract, abstract_text);
    }

    let index = MarkerIndex::build(text, layout.sections.iter().map(|spec| &spec.start));
    let count = layout.sections.len();

    for (i, spec) in layout.sections.iter().enumerate() {
        let Some(start) = index.first_at_or_after(i, 0) else {
            continue;
        };

        let end = index
            .first_in_order(i + 1..count, start.end)
            .map_or(text.len(), |next| next.start);

        let content = strip_leading_numbering(text[start.end..end].trim());
        let len = char_len(content);
        if len > MIN_SECTION_CHARS {
            sections.insert(spec.kind, content.to_string());
        } else {
            tracing::debug!(
                section = %spec.kind,
                len,
                "Discarding section below minimum length"
            );
        }
    }

    sections
}

/// Extract the title: the first non-empty line after the title marker.
fn extract_title(text: &str, layout: &LanguageLayout) -> Option<String> {
    let caps = layout.title.as_ref()?.captures(text)?;
    let title = caps.get(1)?.as_str().trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Extract the abstract between its start marker and the first terminator.
///
/// Both marker lists are tried in list order.
fn extract_abstract(text: &str, layout: &LanguageLayout) -> Option<String> {
    let starts = layout.abstract_starts.len();
    let ends = layout.abstract_ends.len();
    let index = MarkerIndex::build(
        text,
        layout
            .abstract_starts
            .iter()
            .chain(layout.abstract_ends.iter()),
    );

    let start = index.first_in_order(0..starts, 0)?;
    let end = index
        .first_in_order(starts..starts + ends, start.end)
        .map_or(text.len(), |m| m.start);

    let slice = text[start.end..end].trim();
    if char_len(slice) <= MIN_SECTION_CHARS {
        return None;
    }

    let content = match &layout.abstract_prefix {
        Some(prefix) => prefix.replace(slice, "").trim().to_string(),
        None => slice.to_string(),
    };

    if char_len(&content) > MIN_SECTION_CHARS {
        Some(content)
    } else {
        None
    }
}

/// Remove one leading bracketed numbering token.
fn strip_leading_numbering(content: &str) -> &str {
    match LEADING_NUMBERING.find(content) {
        Some(m) => content[m.end()..].trim(),
        None => content.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filler(prefix: &str, len: usize) -> String {
        let mut s = prefix.to_string();
        while char_len(&s) < len {
            s.push('あ');
        }
        s
    }

    #[test]
    fn test_japanese_sections_in_layout_order() {
        let text = format!(
            "【技術分野】\n【0001】{}\n【背景技術】\n【0002】{}\n【発明の概要】\n{}",
            filler("技術", 120),
            filler("背景", 150),
            filler("概要", 90),
        );
        let sections = split_headers(&text, Language::Japanese);

        assert_eq!(sections[&HeaderKind::TechnicalField], filler("技術", 120));
        assert_eq!(sections[&HeaderKind::Background], filler("背景", 150));
        assert_eq!(sections[&HeaderKind::Summary], filler("概要", 90));
        assert!(!sections.contains_key(&HeaderKind::PriorArt));
    }

    #[test]
    fn test_short_section_is_absent() {
        let text = format!(
            "【技術分野】\n{}\n【背景技術】\n{}",
            filler("技術", 300),
            filler("背景", 50),
        );
        let sections = split_headers(&text, Language::Japanese);
        assert!(sections.contains_key(&HeaderKind::TechnicalField));
        assert!(!sections.contains_key(&HeaderKind::Background));
    }

    #[test]
    fn test_end_boundary_follows_list_order_not_document_order() {
        // 【実施例】 appears before 【発明の効果】 in the text.
        let text = format!(
            "【実施例】\n{}\n【発明の効果】\n{}\n【特許請求の範囲】\n{}",
            filler("例", 100),
            filler("効果", 100),
            filler("請求", 100),
        );
        let sections = split_headers(&text, Language::Japanese);
        assert_eq!(sections[&HeaderKind::Effects], filler("効果", 100));
        // Effects precedes examples in layout order, so it never ends the examples section.
        assert!(sections[&HeaderKind::Examples].contains("【発明の効果】"));
    }

    #[test]
    fn test_title_extraction() {
        let text = "【発明の名称】 半導体装置及びその製造方法\n【技術分野】";
        let sections = split_headers(text, Language::Japanese);
        assert_eq!(sections[&HeaderKind::Title], "半導体装置及びその製造方法");

        let text = "【中文發明名稱】\n半導體裝置\n【技術領域】";
        let sections = split_headers(text, Language::Chinese);
        assert_eq!(sections[&HeaderKind::Title], "半導體裝置");
    }

    #[test]
    fn test_empty_title_is_absent() {
        let sections = split_headers("【発明の名称】   ", Language::Japanese);
        assert!(!sections.contains_key(&HeaderKind::Title));
    }

    #[test]
    fn test_japanese_abstract_strips_label() {
        let summary = filler("要約本文", 120);
        let text = format!("【書類名】要約書\n【要約】\n{summary}\n【書類名】図面\n");
        let sections = split_headers(&text, Language::Japanese);
        assert_eq!(sections[&HeaderKind::Abstract], summary);
    }

    #[test]
    fn test_chinese_abstract_and_sections() {
        let abstract_text = filler("本發明提供", 100);
        let field = filler("本發明涉及", 100);
        let prior = filler("習知技術", 100);
        let text = format!(
            "【中文】{abstract_text}\n【技術領域】\n[0001]{field}\n【先前技術】\n[0002]{prior}"
        );
        let sections = split_headers(&text, Language::Chinese);
        assert_eq!(sections[&HeaderKind::Abstract], abstract_text);
        assert_eq!(sections[&HeaderKind::TechnicalField], field);
        assert_eq!(sections[&HeaderKind::PriorArt], prior);
        assert!(!sections.contains_key(&HeaderKind::Background));
    }

    #[test]
    fn test_short_abstract_is_absent() {
        let text = "【中文】太短\n【技術領域】";
        let sections = split_headers(text, Language::Chinese);
        assert!(!sections.contains_key(&HeaderKind::Abstract));
    }

    #[test]
    fn test_strip_leading_numbering() {
        assert_eq!(strip_leading_numbering("【0001】 本文"), "本文");
        assert_eq!(strip_leading_numbering("[12]本文"), "本文");
        assert_eq!(strip_leading_numbering("本文【0001】"), "本文【0001】");
    }

    #[test]
    fn test_no_markers() {
        assert!(split_headers("plain text", Language::Japanese).is_empty());
        assert!(split_headers("", Language::Chinese).is_empty());
    }
}
