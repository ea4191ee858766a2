//! Concern patterns and positive signals used by the rule-based analyzer.
//!
//! Pattern order is significant: it fixes red-flag ordering and decides which
//! flags survive the cap.

use serde::{Deserialize, Serialize};

use crate::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TermsModification,
    DataSharing,
    Arbitration,
    AccountTermination,
    DataCollection,
    LiabilityLimitation,
    ContentRights,
    CookiesTracking,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::TermsModification => "terms_modification",
            Category::DataSharing => "data_sharing",
            Category::Arbitration => "arbitration",
            Category::AccountTermination => "account_termination",
            Category::DataCollection => "data_collection",
            Category::LiabilityLimitation => "liability_limitation",
            Category::ContentRights => "content_rights",
            Category::CookiesTracking => "cookies_tracking",
        }
    }
}

/// Keywords and negations are lower-case literal substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcernPattern {
    pub keywords: &'static [&'static str],
    pub negations: &'static [&'static str],
    pub description: &'static str,
    pub severity: Severity,
    pub category: Category,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

static PATTERNS: [ConcernPattern; 8] = [
    ConcernPattern {
        keywords: &[
            "without notice",
            "without prior notice",
            "at any time without notice",
            "modify these terms at any time",
        ],
        negations: &["will not", "do not", "never", "not without notice"],
        description: "Can change terms without notice",
        severity: Severity::High,
        category: Category::TermsModification,
    },
    ConcernPattern {
        keywords: &[
            "share",
            "sell",
            "third party",
            "third-party",
            "partners",
            "affiliates",
            "service providers",
        ],
        negations: &[
            "do not share",
            "will not share",
            "never share",
            "do not sell",
            "will not sell",
            "never sell",
        ],
        description: "May share your data with third parties",
        severity: Severity::Medium,
        category: Category::DataSharing,
    },
    ConcernPattern {
        keywords: &[
            "binding arbitration",
            "arbitration",
            "waive",
            "class action",
            "jury trial",
        ],
        negations: &["no arbitration", "not binding", "do not waive"],
        description: "Requires binding arbitration",
        severity: Severity::High,
        category: Category::Arbitration,
    },
    ConcernPattern {
        keywords: &[
            "terminate",
            "suspend",
            "sole discretion",
            "without cause",
            "immediately",
        ],
        negations: &["will not terminate", "do not terminate", "only with cause"],
        description: "Can terminate account at their discretion",
        severity: Severity::Medium,
        category: Category::AccountTermination,
    },
    ConcernPattern {
        keywords: &[
            "collect",
            "track",
            "monitor",
            "location",
            "device information",
            "browsing habits",
        ],
        negations: &[
            "do not collect",
            "will not collect",
            "never collect",
            "do not track",
            "will not track",
            "never track",
        ],
        description: "Extensive data collection and tracking",
        severity: Severity::Low,
        category: Category::DataCollection,
    },
    ConcernPattern {
        keywords: &[
            "liability",
            "damages",
            "not responsible",
            "disclaim",
            "exclude",
        ],
        negations: &["accept liability", "responsible for", "do not disclaim"],
        description: "Limits company liability for damages",
        severity: Severity::Low,
        category: Category::LiabilityLimitation,
    },
    ConcernPattern {
        keywords: &[
            "intellectual property",
            "license",
            "royalty-free",
            "worldwide",
            "perpetual",
        ],
        negations: &["do not claim", "limited license", "revocable license"],
        description: "Claims broad rights to your content",
        severity: Severity::Low,
        category: Category::ContentRights,
    },
    ConcernPattern {
        keywords: &[
            "cookies",
            "analytics",
            "advertising",
            "targeting",
            "personalized ads",
        ],
        negations: &[
            "no cookies",
            "do not use cookies",
            "no advertising",
            "no tracking",
        ],
        description: "Uses cookies for advertising and tracking",
        severity: Severity::Low,
        category: Category::CookiesTracking,
    },
];

// Denials such as "do not sell" are left out: the detector already consumes
// them as negations.
static POSITIVE_SIGNALS: [&str; 12] = [
    "user control",
    "opt-out",
    "delete your data",
    "privacy by design",
    "transparent",
    "user rights",
    "data protection",
    "user consent",
    "you can delete",
    "you control",
    "your choice",
    "with your permission",
];

pub fn patterns() -> &'static [ConcernPattern] {
    &PATTERNS
}

pub fn positive_signals() -> &'static [&'static str] {
    &POSITIVE_SIGNALS
}
