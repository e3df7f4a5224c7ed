//! Marker tables for Japanese and Chinese patent documents.
//!
//! All patterns are written against normalized (NFKC) text, so full-width
//! digits and square brackets never need to be matched here. The lenticular
//! brackets 【】 have no compatibility mapping and stay as they are.

use std::sync::LazyLock;

use super::types::LanguageLayout;
use crate::types::{HeaderKind, Language};

static JAPANESE_LAYOUT: LazyLock<LanguageLayout> = LazyLock::new(create_japanese_layout);

static CHINESE_LAYOUT: LazyLock<LanguageLayout> = LazyLock::new(create_chinese_layout);

impl LanguageLayout {
    /// Get the shared layout for `language`.
    #[must_use]
    pub fn for_language(language: Language) -> &'static LanguageLayout {
        match language {
            Language::Japanese => &JAPANESE_LAYOUT,
            Language::Chinese => &CHINESE_LAYOUT,
        }
    }
}

/// Create the layout of a Japanese patent application (JPO format).
///
/// ```text
/// 【書類名】明細書
/// 【発明の名称】…
/// 【技術分野】 【背景技術】 【先行技術文献】
/// 【発明の概要】
///   【発明が解決しようとする課題】 【課題を解決するための手段】 【発明の効果】
/// 【発明を実施するための形態】 【実施例】
/// 【書類名】特許請求の範囲
///   【請求項1】…
/// 【書類名】要約書
///   【要約】…
/// 【書類名】図面
/// ```
#[must_use]
pub fn create_japanese_layout() -> LanguageLayout {
    LanguageLayout::new(
        Language::Japanese,
        r"【発明の名称】|【技術分野】|【書類名】\s*明細書|【特許請求の範囲】|【書類名】\s*特許請求の範囲|\[\s*0*0001\s*\]|【\s*0*0001\s*】",
    )
    .with_title(r"【発明の名称】\s*(.+)")
    // The abstract usually sits near the end, after the claims.
    .with_abstract(
        [r"【書類名】\s*要約書", r"【要約】"],
        [
            r"【書類名】\s*特許請求の範囲",
            r"【特許請求の範囲】",
            r"【請求項",
            r"【書類名】\s*図面",
            r"【図面の簡単な説明】",
            r"【符号の説明】",
        ],
    )
    .with_abstract_prefix(r"(?s)^.*【要約】\s*")
    .with_section(HeaderKind::TechnicalField, r"【技術分野】")
    .with_section(HeaderKind::Background, r"【背景技術】")
    .with_section(HeaderKind::PriorArt, r"【先行技術文献】")
    .with_section(HeaderKind::Summary, r"【発明の概要】")
    .with_section(HeaderKind::Problem, r"【発明が解決しようとする課題】")
    .with_section(HeaderKind::Solution, r"【課題を解決するための手段】")
    .with_section(HeaderKind::Effects, r"【発明の効果】")
    .with_section(HeaderKind::Description, r"【発明を実施するための形態】")
    .with_section(HeaderKind::Examples, r"【実施例】")
    .with_section(
        HeaderKind::Claims,
        r"【書類名】\s*特許請求の範囲|【特許請求の範囲】",
    )
    .with_claims_block(
        [
            r"(?m)^\s*【書類名】\s*特許請求の範囲\s*$",
            r"(?m)^\s*【特許請求の範囲】\s*$",
            r"(?m)^\s*特許請求の範囲\s*$",
        ],
        // Drawings and abstract follow the claims.
        [
            r"(?m)^\s*【書類名】\s*図面\s*$",
            r"(?m)^\s*【図面の簡単な説明】\s*$",
            r"(?m)^\s*【符号の説明】\s*$",
            r"(?m)^\s*【書類名】\s*要約書\s*$",
            r"(?m)^\s*【要約】\s*$",
        ],
    )
    .with_claim_items(
        [r"(?m)^\s*【\s*請求項\s*\d{1,4}\s*】"],
        [r"(?m)^[ \t]*請求項[ \t]*\d{1,4}[ \t]*$"],
    )
    .with_claims_labels([
        r"^【書類名】\s*特許請求の範囲$",
        r"^【特許請求の範囲】$",
        r"^特許請求の範囲$",
    ])
}

/// Create the layout of a Traditional Chinese patent application (TIPO format).
///
/// ```text
/// 【發明摘要】 【中文發明名稱】… 【中文】…
/// 【發明說明書】
/// 【技術領域】 【先前技術】
/// 【發明內容】
///   【發明欲解決之問題】 【解決問題之技術手段】 【發明之功效】
/// 【實施方式】 【實施例】
/// 【發明申請專利範圍】
///   【請求項1】… / 1. …
/// 【發明圖式】
/// ```
#[must_use]
pub fn create_chinese_layout() -> LanguageLayout {
    LanguageLayout::new(
        Language::Chinese,
        r"【中文發明名稱】|【中文】|【技術領域】|【先前技術】|【發明內容】|【發明摘要】|【發明說明書】|【\s*(?:發明)?申請專利範圍\s*】|\[\s*0*0001\s*\]|【\s*0*0001\s*】",
    )
    .with_title(r"【中文發明名稱】\s*(.+)")
    .with_abstract(
        [r"【中文】"],
        [
            r"【技術領域】",
            r"【發明所屬之技術領域】",
            r"【先前技術】",
            r"【發明內容】",
            r"【申請專利範圍】",
            r"【發明申請專利範圍】",
            r"【發明說明書】",
        ],
    )
    .with_section(
        HeaderKind::TechnicalField,
        r"【技術領域】|【發明所屬之技術領域】",
    )
    .with_section(HeaderKind::PriorArt, r"【先前技術】")
    .with_section(HeaderKind::Summary, r"【發明內容】")
    .with_section(HeaderKind::Problem, r"【發明欲解決之問題】")
    .with_section(HeaderKind::Solution, r"【解決問題之技術手段】")
    .with_section(HeaderKind::Effects, r"【發明之功效】")
    .with_section(HeaderKind::Description, r"【實施方式】")
    .with_section(HeaderKind::Examples, r"【實施例】")
    .with_section(HeaderKind::Claims, r"【\s*(?:發明)?申請專利範圍\s*】")
    .with_claims_block(
        [
            r"(?m)^\s*【發明申請專利範圍】\s*$",
            r"(?m)^\s*【申請專利範圍】\s*$",
            r"(?m)^\s*(?:發明)?申請專利範圍\s*$",
        ],
        [
            r"(?m)^\s*【發明圖式】\s*$",
            r"(?m)^\s*【圖式簡單說明】\s*$",
            r"(?m)^\s*【符號說明】\s*$",
            r"(?m)^\s*【主要元件符號說明】\s*$",
        ],
    )
    .with_claim_items(
        [
            r"(?m)^\s*【\s*請求項\s*\d{1,4}\s*】",
            r"(?m)^\s*【\s*項次\s*\d{1,4}\s*】",
        ],
        [
            r"(?m)^[ \t]*請求項[ \t]*\d{1,4}[ \t]*$",
            r"(?m)^[ \t]*\d{1,4}[ \t]*[.．、]\s+",
        ],
    )
    .with_claims_labels([
        r"^【(?:發明申請專利範圍|申請專利範圍)】$",
        r"^(?:發明)?申請專利範圍$",
    ])
}
