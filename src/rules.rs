//! Deterministic rule-based analyzer.
//!
//! Pure and total: every input, the empty string included, yields a valid
//! [`AnalysisResult`]. Remote strategies fall back to this and are judged
//! against it.

use tracing::debug;

use crate::catalog::{self, ConcernPattern};
use crate::detect::detect_lowered;
use crate::locate::locate_lowered;
use crate::scoring;
use crate::{AnalysisResult, DocumentKind, Grade, RedFlag, HP};

#[derive(Debug, Clone, Copy)]
pub struct RuleBasedAnalyzer<'c> {
    patterns: &'c [ConcernPattern],
    positive_signals: &'c [&'c str],
}

impl Default for RuleBasedAnalyzer<'static> {
    fn default() -> Self {
        Self::new(catalog::patterns(), catalog::positive_signals())
    }
}

impl<'c> RuleBasedAnalyzer<'c> {
    pub fn new(patterns: &'c [ConcernPattern], positive_signals: &'c [&'c str]) -> Self {
        Self {
            patterns,
            positive_signals,
        }
    }

    pub fn analyze(&self, text: &str, kind: DocumentKind) -> AnalysisResult {
        let lowered = text.to_ascii_lowercase();

        let mut hits: Vec<&ConcernPattern> = Vec::new();
        let mut red_flags: Vec<RedFlag> = Vec::new();
        for pattern in self.patterns {
            let detection = detect_lowered(&lowered, pattern);
            if !detection.hit {
                if let Some(negation) = detection.negation {
                    debug!(
                        category = pattern.category.as_str(),
                        keyword = detection.matched_keyword.unwrap_or_default(),
                        negation,
                        "pattern suppressed by nearby negation"
                    );
                }
                continue;
            }
            debug!(
                category = pattern.category.as_str(),
                keyword = detection.matched_keyword.unwrap_or_default(),
                "concerning pattern detected"
            );
            red_flags.push(RedFlag {
                severity: pattern.severity,
                description: pattern.description.to_string(),
                clause: locate_lowered(text, &lowered, pattern.keywords),
                category: Some(pattern.category),
            });
            hits.push(pattern);
        }

        let positive = scoring::count_positive_signals(&lowered, self.positive_signals);
        let score = scoring::score(&hits, positive);
        let grade = scoring::grade(score);
        let detected = red_flags.len();
        red_flags.truncate(HP.red_flag_cap);

        AnalysisResult {
            transparency_grade: grade,
            score: Some(score),
            summary: summary_lines(kind, score, grade, detected),
            red_flags,
            user_insight: user_insight(kind, detected, grade),
        }
    }
}

fn summary_lines(kind: DocumentKind, score: i32, grade: Grade, detected: usize) -> Vec<String> {
    let verdict = if detected > 0 {
        "Several concerning clauses were identified"
    } else {
        "No major red flags detected"
    };
    vec![
        format!("Document type: {}", kind.label()),
        format!("Transparency score: {score}/100 ({})", grade.description()),
        format!("Red flags detected: {detected}"),
        verdict.to_string(),
        "Analysis performed using advanced pattern recognition".to_string(),
    ]
}

fn user_insight(kind: DocumentKind, detected: usize, grade: Grade) -> String {
    let flags = if detected > 0 {
        "Be aware of the concerning clauses highlighted in the red flags section."
    } else {
        "This document appears relatively user-friendly."
    };
    format!(
        "This {} has been analyzed for user-friendliness. {flags} Overall transparency: {}. \
         Consider reading the full document for complete understanding.",
        kind.noun(),
        grade.description()
    )
}
