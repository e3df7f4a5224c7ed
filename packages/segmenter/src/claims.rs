//! Claims block extraction and claim splitting.
//!
//! The claims block is located with line-anchored header markers and ends at
//! the first marker of the section that legally follows the claims (drawings,
//! abstract). When the header-delimited block holds no claim items, the first
//! bracketed claim item anywhere in the document is used as the start instead.

use std::sync::LazyLock;

use regex::Regex;

use crate::segmentation::{LanguageLayout, MarkerIndex};
use crate::types::{Claim, Language};

/// Every notation that starts a new claim.
///
/// Bracketed items match anywhere; bare `請求項N` headings and `N.` numbered
/// lines only at the start of a line, so that cross references such as
/// "請求項1に記載の" inside a claim body do not start a new claim.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CLAIM_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"【\s*請求項\s*([0-9]{1,4})\s*】",
        r"|【\s*項次\s*([0-9]{1,4})\s*】",
        r"|(?m:^[ \t]*請求項[ \t]*([0-9]{1,4})[ \t]*$)",
        r"|(?m:^[ \t]*([0-9]{1,4})[ \t]*[.．、]\s+)",
    ))
    .expect("valid regex")
});

/// Locate and clean the claims block of a normalized document.
///
/// Returns `None` when no claim item can be found anywhere; this is the
/// normal outcome for documents without claims, not an error.
///
/// # Examples
/// ```
/// use patent_segmenter::claims::extract_claims_block;
/// use patent_segmenter::Language;
///
/// let text = "【技術分野】\n本文\n【書類名】特許請求の範囲\n【請求項1】\nA widget.\n【書類名】図面\n【図1】";
/// let block = extract_claims_block(text, Language::Japanese).unwrap();
/// assert_eq!(block, "【請求項1】\nA widget.");
/// ```
#[must_use]
pub fn extract_claims_block(text: &str, language: Language) -> Option<String> {
    let layout = LanguageLayout::for_language(language);

    let starts = layout.claims_starts.len();
    let ends = layout.claims_ends.len();
    let items = layout.claim_items.len();
    let index = MarkerIndex::build(
        text,
        layout
            .claims_starts
            .iter()
            .chain(&layout.claims_ends)
            .chain(&layout.claim_items),
    );
    let end_patterns = starts..starts + ends;
    let item_patterns = starts + ends..starts + ends + items;

    let header_block = index.earliest_among(0..starts, 0).map(|start| {
        let end = index
            .earliest_among(end_patterns.clone(), start.end)
            .map_or(text.len(), |m| m.start);
        text[start.start..end].trim()
    });

    let block = match header_block {
        Some(block) if contains_claim_item(block, layout) => block,
        header_block => {
            if header_block.is_some() {
                tracing::debug!(
                    language = %language,
                    "Claims header block has no claim items, searching whole document"
                );
            }
            let item = index.earliest_among(item_patterns, 0)?;
            let end = index
                .earliest_among(end_patterns, item.end)
                .map_or(text.len(), |m| m.start);
            text[item.start..end].trim()
        }
    };

    let cleaned = clean_block(block, layout);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Whether a header-delimited block holds at least one claim item.
fn contains_claim_item(block: &str, layout: &LanguageLayout) -> bool {
    layout
        .claim_items
        .iter()
        .chain(&layout.claim_list_items)
        .any(|re| re.is_match(block))
}

/// Drop blank lines and lines that are only the claims header label.
fn clean_block(block: &str, layout: &LanguageLayout) -> String {
    block
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !layout.is_claims_label(trimmed)
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Capture group of the `N.` list notation in [`CLAIM_MARKER`].
const LIST_GROUP: usize = 4;

/// Split a claims block into individual claims.
///
/// Each claim's text runs from its marker to the next marker. Text before
/// the first marker is ignored. A marker with no body still yields a claim
/// with empty text. Numbers are kept as written, in document order, and need
/// not be sequential or unique. When the block has bracketed claim markers,
/// numbered lines such as `1. 步驟A` are steps inside a claim body.
///
/// # Examples
/// ```
/// use patent_segmenter::claims::split_claims;
///
/// let claims = split_claims("【請求項1】A widget.【請求項2】A gadget, wherein A.");
/// assert_eq!(claims.len(), 2);
/// assert_eq!(claims[1].number, "2");
/// assert_eq!(claims[1].text, "A gadget, wherein A.");
/// ```
#[must_use]
pub fn split_claims(claims_text: &str) -> Vec<Claim> {
    let markers: Vec<(usize, &str, usize, usize)> = CLAIM_MARKER
        .captures_iter(claims_text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let (group, number) = (1..caps.len()).find_map(|i| caps.get(i).map(|m| (i, m)))?;
            Some((group, number.as_str(), whole.start(), whole.end()))
        })
        .collect();

    let bracketed = markers.iter().any(|&(group, ..)| group < 3);
    let markers: Vec<(&str, usize, usize)> = markers
        .into_iter()
        .filter(|&(group, ..)| !(bracketed && group == LIST_GROUP))
        .map(|(_, number, start, end)| (number, start, end))
        .collect();

    markers
        .iter()
        .enumerate()
        .map(|(i, &(number, _, body_start))| {
            let body_end = markers
                .get(i + 1)
                .map_or(claims_text.len(), |&(_, next_start, _)| next_start);
            Claim::new(number, claims_text[body_start..body_end].trim())
        })
        .collect()
}
