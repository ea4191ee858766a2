//! Score and grade computation.
//!
//! Scores start at a fixed baseline, lose points per detected pattern according
//! to its severity, gain points per positive signal, and are clamped to
//! `[score_min, score_max]`. The floor keeps automatically scored documents
//! from reading as categorically unusable.

use crate::catalog::ConcernPattern;
use crate::{Grade, HP};

pub fn score(hits: &[&ConcernPattern], positive_signal_hits: usize) -> i32 {
    let deductions: i32 = hits.iter().map(|p| p.severity.penalty()).sum();
    let hits = i32::try_from(positive_signal_hits).unwrap_or(i32::MAX);
    let bonus = hits.saturating_mul(HP.positive_signal_bonus);
    clamp_score(HP.baseline.saturating_sub(deductions).saturating_add(bonus))
}

pub fn clamp_score(raw: i32) -> i32 {
    raw.clamp(HP.score_min, HP.score_max)
}

pub fn grade(score: i32) -> Grade {
    if score >= HP.grade_a_min {
        Grade::A
    } else if score >= HP.grade_b_min {
        Grade::B
    } else if score >= HP.grade_c_min {
        Grade::C
    } else if score >= HP.grade_d_min {
        Grade::D
    } else {
        Grade::F
    }
}

/// Plain-language description for a grade label. Unknown labels get
/// "Analysis unclear".
pub fn grade_description(label: &str) -> &'static str {
    match label {
        "A" => "Very user-friendly and transparent",
        "B" => "Generally fair with minor concerns",
        "C" => "Average with some concerning clauses",
        "D" => "Several problematic terms",
        "F" => "Many concerning or unfair clauses",
        _ => "Analysis unclear",
    }
}

/// Number of positive-signal phrases present in already-lowercased text.
/// Each phrase counts once no matter how often it repeats.
pub fn count_positive_signals(lowered: &str, signals: &[&str]) -> usize {
    signals.iter().filter(|s| lowered.contains(*s)).count()
}
