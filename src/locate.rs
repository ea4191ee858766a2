//! Nearest-sentence lookup used to cite the clause behind a red flag.

use std::ops::Range;

use crate::CLAUSE_PLACEHOLDER;

fn is_sentence_break(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Byte span of the sentence holding `text[start..start + len]`, excluding the
/// terminating punctuation.
pub(crate) fn sentence_around(text: &str, start: usize, len: usize) -> Range<usize> {
    let start = start.min(text.len());
    let match_end = (start + len).min(text.len());
    let begin = text[..start]
        .rfind(is_sentence_break)
        .map_or(0, |i| i + 1);
    let end = text[match_end..]
        .find(is_sentence_break)
        .map_or(text.len(), |i| match_end + i);
    begin..end
}

/// Sentence containing the first occurrence of the first keyword found, in
/// keyword order. Falls back to [`CLAUSE_PLACEHOLDER`].
pub fn locate(text: &str, keywords: &[&str]) -> String {
    let lowered = text.to_ascii_lowercase();
    locate_lowered(text, &lowered, keywords)
}

/// Same as [`locate`], reusing an ASCII-lowercased copy of `text`.
///
/// ASCII lowercasing keeps byte offsets identical, so spans found in `lowered`
/// slice `text` directly.
pub(crate) fn locate_lowered(text: &str, lowered: &str, keywords: &[&str]) -> String {
    let found = keywords
        .iter()
        .find_map(|k| lowered.find(k).map(|i| (i, k.len())));
    let Some((index, len)) = found else {
        return CLAUSE_PLACEHOLDER.to_string();
    };

    let span = sentence_around(lowered, index, len);
    match text.get(span).map(str::trim) {
        Some(sentence) if !sentence.is_empty() => format!("{sentence}."),
        _ => CLAUSE_PLACEHOLDER.to_string(),
    }
}
