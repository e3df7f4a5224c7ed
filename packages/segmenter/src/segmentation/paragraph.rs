//! Numbered paragraph splitting.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{MAX_PARAGRAPH_CHARS, MIN_PARAGRAPH_CHARS};
use crate::types::{char_len, truncate_chars, ParagraphNumber};

/// Paragraph marker: `【0001】` or `[0001]`, 1-4 digits, optional leading zeros.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PARAGRAPH_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"【\s*0*([0-9]{1,4})\s*】|\[\s*0*([0-9]{1,4})\s*\]").expect("valid regex")
});

/// Split normalized text into numbered paragraphs.
///
/// Each body runs from the end of its marker to the start of the next marker
/// (or the end of the text). Bodies shorter than 50 chars are dropped, longer
/// than 8000 chars are truncated. A repeated number overwrites the earlier
/// paragraph. Text without markers yields an empty map.
///
/// # Examples
/// ```
/// use patent_segmenter::segmentation::split_paragraphs;
///
/// let body = "本発明は、半導体装置の製造方法に関し、特に基板の洗浄工程における金属汚染の低減方法に関するものである。";
/// let text = format!("【0001】{body}【0002】短い");
/// let paragraphs = split_paragraphs(&text);
/// assert_eq!(paragraphs.len(), 1);
/// assert_eq!(paragraphs.keys().next().unwrap().key(), "0001");
/// ```
#[must_use]
pub fn split_paragraphs(text: &str) -> BTreeMap<ParagraphNumber, String> {
    let markers: Vec<(ParagraphNumber, usize, usize)> = PARAGRAPH_MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let digits = caps.get(1).or_else(|| caps.get(2))?;
            let number = ParagraphNumber::parse(digits.as_str())?;
            Some((number, whole.start(), whole.end()))
        })
        .collect();

    let mut paragraphs = BTreeMap::new();
    for (i, &(number, _, body_start)) in markers.iter().enumerate() {
        let body_end = markers
            .get(i + 1)
            .map_or(text.len(), |&(_, next_start, _)| next_start);
        let body = text[body_start..body_end].trim();

        let len = char_len(body);
        if len < MIN_PARAGRAPH_CHARS {
            tracing::trace!(paragraph = %number, len, "Dropping short paragraph");
            continue;
        }

        let body = if len > MAX_PARAGRAPH_CHARS {
            tracing::debug!(paragraph = %number, len, "Truncating long paragraph");
            truncate_chars(body, MAX_PARAGRAPH_CHARS)
        } else {
            body
        };

        if paragraphs.insert(number, body.to_string()).is_some() {
            tracing::debug!(paragraph = %number, "Duplicate paragraph number, keeping later body");
        }
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn body(c: char, len: usize) -> String {
        std::iter::repeat(c).take(len).collect()
    }

    #[test]
    fn test_drop_short_and_truncate_long() {
        let text = format!(
            "【0001】{}【0002】{}【0005】{}【0009】{}",
            body('a', 60),
            body('b', 40),
            body('c', 70),
            body('d', 9000),
        );
        let paragraphs = split_paragraphs(&text);

        let keys: Vec<String> = paragraphs.keys().map(ParagraphNumber::key).collect();
        assert_eq!(keys, vec!["0001", "0005", "0009"]);
        assert_eq!(char_len(&paragraphs[&ParagraphNumber::new(9)]), 8000);
        assert_eq!(paragraphs[&ParagraphNumber::new(1)], body('a', 60));
    }

    #[test]
    fn test_duplicate_number_keeps_later_body() {
        let text = format!(
            "【0003】{}\n【0004】{}\n【0003】{}",
            body('x', 55),
            body('y', 55),
            body('z', 55)
        );
        let paragraphs = split_paragraphs(&text);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[&ParagraphNumber::new(3)], body('z', 55));
    }

    #[test]
    fn test_square_brackets_and_padding() {
        let text = format!("[ 7 ]{}\n[0012]{}", body('一', 50), body('二', 51));
        let paragraphs = split_paragraphs(&text);
        let keys: Vec<String> = paragraphs.keys().map(ParagraphNumber::key).collect();
        assert_eq!(keys, vec!["0007", "0012"]);
    }

    #[test]
    fn test_body_is_trimmed_and_counted_in_chars() {
        // 49 multibyte chars plus surrounding whitespace stays below the floor.
        let text = format!("【0001】\n  {}  \n", body('字', 49));
        assert!(split_paragraphs(&text).is_empty());

        let text = format!("【0001】\n  {}  \n", body('字', 50));
        assert_eq!(split_paragraphs(&text)[&ParagraphNumber::new(1)], body('字', 50));
    }

    #[test]
    fn test_no_markers() {
        assert!(split_paragraphs("no paragraph markers in this text at all").is_empty());
        assert!(split_paragraphs("").is_empty());
    }

    #[test]
    fn test_text_before_first_marker_ignored() {
        let text = format!("{}【0002】{}", body('p', 100), body('q', 60));
        let paragraphs = split_paragraphs(&text);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[&ParagraphNumber::new(2)], body('q', 60));
    }
}
