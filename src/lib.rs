use std::fmt;

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod config;
pub mod detect;
pub mod locate;
pub mod orchestrator;
pub mod page;
pub mod remote;
pub mod rules;
pub mod scoring;

pub use catalog::{Category, ConcernPattern};
pub use config::Config;
pub use orchestrator::{AnalysisOrchestrator, AnalysisRequest, AnalysisStrategy};
pub use remote::Unavailable;
pub use rules::RuleBasedAnalyzer;

/// Clause text used when no sentence can be bound to a rule-based red flag.
pub const CLAUSE_PLACEHOLDER: &str =
    "Specific clause would be highlighted from the original document.";

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }

    /// Case-insensitive parse of an upstream severity label.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }

    /// Score deduction applied for one hit of this severity.
    pub fn penalty(self) -> i32 {
        match self {
            Severity::High => HP.high_penalty,
            Severity::Medium => HP.medium_penalty,
            Severity::Low => HP.low_penalty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn from_score(score: i32) -> Self {
        scoring::grade(score)
    }

    /// Accepts exactly one of `A`, `B`, `C`, `D`, `F` (surrounding whitespace ignored).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "D" => Some(Grade::D),
            "F" => Some(Grade::F),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn description(self) -> &'static str {
        scoring::grade_description(self.as_str())
    }

    pub fn risk_level(self) -> RiskLevel {
        match self {
            Grade::A | Grade::B => RiskLevel::Low,
            Grade::C | Grade::D => RiskLevel::Medium,
            Grade::F => RiskLevel::High,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn title(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

/// Which kind of legal document is being graded. Only affects wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Privacy,
    Terms,
}

impl DocumentKind {
    /// Titles containing "Privacy" are privacy policies, everything else is terms of service.
    pub fn from_title(title: &str) -> Self {
        if title.contains("Privacy") {
            DocumentKind::Privacy
        } else {
            DocumentKind::Terms
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Privacy => "Privacy Policy",
            DocumentKind::Terms => "Terms of Service",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            DocumentKind::Privacy => "privacy policy",
            DocumentKind::Terms => "terms of service",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlag {
    pub severity: Severity,
    pub description: String,
    pub clause: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub transparency_grade: Grade,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    pub summary: Vec<String>,
    pub red_flags: Vec<RedFlag>,
    pub user_insight: String,
}

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

// Baseline and grade thresholds are coupled; retune them together.
pub(crate) struct Hyperparameters {
    pub(crate) baseline: i32,
    pub(crate) high_penalty: i32,
    pub(crate) medium_penalty: i32,
    pub(crate) low_penalty: i32,
    pub(crate) positive_signal_bonus: i32,
    pub(crate) score_min: i32,
    pub(crate) score_max: i32,
    pub(crate) grade_a_min: i32,
    pub(crate) grade_b_min: i32,
    pub(crate) grade_c_min: i32,
    pub(crate) grade_d_min: i32,
    pub(crate) negation_window_chars: usize,
    pub(crate) red_flag_cap: usize,
    pub(crate) ai_red_flag_cap: usize,
    pub(crate) text_generation_input_chars: usize,
    pub(crate) chat_input_chars: usize,
    pub(crate) ai_summary_excerpt_chars: usize,
}

pub(crate) static HP: Hyperparameters = Hyperparameters {
    baseline: 80,
    high_penalty: 12,
    medium_penalty: 7,
    low_penalty: 3,
    positive_signal_bonus: 5,
    score_min: 15,
    score_max: 100,
    grade_a_min: 85,
    grade_b_min: 70,
    grade_c_min: 55,
    grade_d_min: 40,
    negation_window_chars: 50,
    red_flag_cap: 8,
    ai_red_flag_cap: 3,
    text_generation_input_chars: 2000,
    chat_input_chars: 12000,
    ai_summary_excerpt_chars: 100,
};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Rule-based analysis with the built-in catalog. Never touches the network.
pub fn analyze(text: &str, title: &str) -> AnalysisResult {
    RuleBasedAnalyzer::default().analyze(text, DocumentKind::from_title(title))
}
