//! Negation-aware keyword detection.
//!
//! Only the first keyword of a pattern that occurs in the text is examined,
//! and only at its first occurrence. The negation window spans
//! `negation_window_chars` characters (not bytes) on either side of that
//! occurrence and never crosses the sentence it sits in. A later, un-negated repeat of the keyword does not
//! revive a suppressed pattern.

use crate::catalog::ConcernPattern;
use crate::locate::sentence_around;
use crate::HP;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub hit: bool,
    /// Keyword whose first occurrence was examined.
    pub matched_keyword: Option<&'static str>,
    /// Negation that suppressed the hit.
    pub negation: Option<&'static str>,
}

impl Detection {
    fn miss() -> Self {
        Self {
            hit: false,
            matched_keyword: None,
            negation: None,
        }
    }
}

pub fn detect(text: &str, pattern: &ConcernPattern) -> Detection {
    detect_lowered(&text.to_ascii_lowercase(), pattern)
}

/// Detection over text the caller already passed through `to_ascii_lowercase`.
pub fn detect_lowered(lowered: &str, pattern: &ConcernPattern) -> Detection {
    let found = pattern
        .keywords
        .iter()
        .find_map(|k| lowered.find(k).map(|i| (*k, i)));
    let Some((keyword, index)) = found else {
        return Detection::miss();
    };

    let window = negation_window(lowered, index, keyword.len());
    let negation = pattern
        .negations
        .iter()
        .copied()
        .find(|n| window.contains(n));

    Detection {
        hit: negation.is_none(),
        matched_keyword: Some(keyword),
        negation,
    }
}

fn negation_window(text: &str, index: usize, len: usize) -> &str {
    let width = HP.negation_window_chars;
    let after = index + len;
    let start = text[..index]
        .char_indices()
        .rev()
        .take(width)
        .last()
        .map_or(index, |(i, _)| i);
    let end = text[after..]
        .char_indices()
        .nth(width)
        .map_or(text.len(), |(i, _)| after + i);
    let sentence = sentence_around(text, index, len);
    &text[start.max(sentence.start)..end.min(sentence.end)]
}
