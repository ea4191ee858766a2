//! Helpers normally supplied by the host: deciding whether a page looks like a
//! legal document, and cleaning extracted text before analysis.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Extracted text longer than this is cut before analysis.
pub const MAX_DOCUMENT_CHARS: usize = 50_000;

const TRUNCATION_NOTE: &str = "... (content truncated for analysis)";

/// How eagerly URLs and titles are treated as legal documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    fn patterns(self) -> &'static [&'static str] {
        match self {
            Sensitivity::Low => &[
                "/terms",
                "/privacy",
                "/policy",
                "/legal",
                "terms of service",
                "privacy policy",
            ],
            Sensitivity::Medium => &[
                "/terms",
                "/privacy",
                "/policy",
                "/legal",
                "/tos",
                "/agreement",
                "/conditions",
                "terms-of-service",
                "privacy-policy",
                "terms of service",
                "privacy policy",
                "terms and conditions",
            ],
            Sensitivity::High => &[
                // URL patterns
                "/terms",
                "/privacy",
                "/policy",
                "/legal",
                "/tos",
                "/eula",
                "/agreement",
                "/conditions",
                "/disclaimer",
                "/gdpr",
                "/ccpa",
                "/data-policy",
                "/cookie-policy",
                "/user-agreement",
                "terms-of-service",
                "privacy-policy",
                "terms-and-conditions",
                "legal-notice",
                "data-protection",
                "cookie-notice",
                // Title patterns
                "terms of service",
                "privacy policy",
                "terms and conditions",
                "user agreement",
                "legal notice",
                "data policy",
                "cookie policy",
                "privacy notice",
                "terms of use",
                "service agreement",
            ],
        }
    }
}

/// True when the URL or title matches any pattern for `sensitivity`.
pub fn is_legal_document(url: &str, title: &str, sensitivity: Sensitivity) -> bool {
    let url = url.to_lowercase();
    let title = title.to_lowercase();
    sensitivity
        .patterns()
        .iter()
        .any(|p| url.contains(p) || title.contains(p))
}

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs (non-breaking spaces included) to single spaces,
/// drop control characters, and trim.
pub fn normalize_whitespace(text: &str) -> String {
    let printable: String = text
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();
    WHITESPACE_RE.replace_all(&printable, " ").trim().to_string()
}

/// Cut `text` to [`MAX_DOCUMENT_CHARS`] characters, appending a note when cut.
pub fn cap_length(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(MAX_DOCUMENT_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}{TRUNCATION_NOTE}", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}
