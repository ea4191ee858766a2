//! Parse-and-validate steps for upstream payloads, one function per upstream
//! shape.
//!
//! Recoverable defects (a scalar where a list belongs, a grade outside A-F)
//! are coerced here. Unparsable JSON and missing required fields become
//! [`Unavailable`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::{truncate_chars, Unavailable};
use crate::catalog::Category;
use crate::{AnalysisResult, DocumentKind, Grade, RedFlag, Severity, HP};

/// Clause text for red flags reported by a remote model.
pub const AI_CLAUSE_PLACEHOLDER: &str = "AI-identified concerning clause from document analysis";

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static LABELED_GRADE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i:grade)["\s]*:?["\s]*([ABCDF])\b"#).unwrap());

static BARE_GRADE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([ABCDF])\b").unwrap());

static JSON_OBJECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

struct AiIssue {
    keywords: &'static [&'static str],
    description: &'static str,
    severity: Severity,
    category: Category,
}

static AI_ISSUES: [AiIssue; 3] = [
    AiIssue {
        keywords: &["data", "collect", "share"],
        description: "Data collection and sharing practices",
        severity: Severity::Medium,
        category: Category::DataSharing,
    },
    AiIssue {
        keywords: &["terminate", "suspend"],
        description: "Account termination policies",
        severity: Severity::Medium,
        category: Category::AccountTermination,
    },
    AiIssue {
        keywords: &["change", "modify", "update"],
        description: "Terms modification policies",
        severity: Severity::Low,
        category: Category::TermsModification,
    },
];

// ---------------------------------------------------------------------------
// Text-generation responses
// ---------------------------------------------------------------------------

/// Generated text from the shapes hosted inference APIs return:
/// `[{"generated_text": ..}]`, `{"generated_text": ..}` or `{"response": ..}`.
pub fn generated_text(payload: &Value) -> Option<String> {
    payload
        .pointer("/0/generated_text")
        .or_else(|| payload.get("generated_text"))
        .or_else(|| payload.get("response"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Turn free-form generated text into a result. An echoed `prompt` prefix is
/// ignored. Text embedding a JSON object with a grade field is read as the
/// structured contract; anything else is scraped for a grade letter.
pub fn text_generation(
    generated: &str,
    prompt: &str,
    kind: DocumentKind,
) -> Result<AnalysisResult, Unavailable> {
    let text = generated.strip_prefix(prompt).unwrap_or(generated).trim();
    if text.is_empty() {
        return Err(Unavailable::EmptyResponse);
    }

    if let Some(result) = embedded_contract(text, kind) {
        debug!("generated text carried a structured contract");
        return Ok(result);
    }

    let grade = extract_grade(text).unwrap_or(Grade::C);
    let excerpt = if text.chars().count() > 50 {
        truncate_chars(text, HP.ai_summary_excerpt_chars).into_owned()
    } else {
        "Standard terms and conditions detected".to_string()
    };

    Ok(AnalysisResult {
        transparency_grade: grade,
        score: None,
        summary: vec![
            format!("Document type: {}", kind.label()),
            format!("AI-generated transparency assessment: Grade {grade}"),
            "Analysis performed using free AI model".to_string(),
            excerpt,
        ],
        red_flags: keyword_flags(text),
        user_insight: ai_insight(grade),
    })
}

/// First grade letter in `text`, preferring one labeled "grade".
pub fn extract_grade(text: &str) -> Option<Grade> {
    LABELED_GRADE_RE
        .captures(text)
        .or_else(|| BARE_GRADE_RE.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| Grade::parse(m.as_str()))
}

fn embedded_contract(text: &str, kind: DocumentKind) -> Option<AnalysisResult> {
    let object = JSON_OBJECT_RE.find(text)?;
    let body: Value = serde_json::from_str(object.as_str()).ok()?;
    let grade_value = body
        .get("transparencyGrade")
        .or_else(|| body.get("grade"))?;
    let grade = grade_value
        .as_str()
        .and_then(Grade::parse)
        .unwrap_or(Grade::C);

    let mut summary = string_list(body.get("summary"));
    summary.extend(string_list(body.get("keyPoints")));
    if summary.is_empty() {
        summary.push(format!("Document type: {}", kind.label()));
        summary.push("Analysis completed".to_string());
    }

    let user_insight = body
        .get("userInsight")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map_or_else(|| ai_insight(grade), str::to_string);

    Some(AnalysisResult {
        transparency_grade: grade,
        score: score_field(&body),
        summary,
        red_flags: red_flag_list(body.get("redFlags")),
        user_insight,
    })
}

fn keyword_flags(text: &str) -> Vec<RedFlag> {
    let lowered = text.to_lowercase();
    AI_ISSUES
        .iter()
        .filter(|issue| issue.keywords.iter().any(|k| lowered.contains(k)))
        .take(HP.ai_red_flag_cap)
        .map(|issue| RedFlag {
            severity: issue.severity,
            description: issue.description.to_string(),
            clause: AI_CLAUSE_PLACEHOLDER.to_string(),
            category: Some(issue.category),
        })
        .collect()
}

fn ai_insight(grade: Grade) -> String {
    format!(
        "This document received a {grade} grade from our AI analysis. {}. \
         Consider reviewing the highlighted concerns before accepting.",
        grade.description()
    )
}

// ---------------------------------------------------------------------------
// Chat-completion responses
// ---------------------------------------------------------------------------

/// Validate a chat-completion payload whose message content is the JSON
/// contract `{transparencyGrade, summary, redFlags, userInsight}`.
pub fn chat_completion(payload: &Value) -> Result<AnalysisResult, Unavailable> {
    let content = payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or(Unavailable::MissingField("choices[0].message.content"))?;
    let body: Value =
        serde_json::from_str(content).map_err(|e| Unavailable::MalformedPayload(e.to_string()))?;
    if !body.is_object() {
        return Err(Unavailable::MalformedPayload(
            "message content is not a JSON object".to_string(),
        ));
    }

    let grade = required(&body, "transparencyGrade")?;
    let summary = required(&body, "summary")?;
    let insight = required(&body, "userInsight")?;

    let transparency_grade = grade.as_str().and_then(Grade::parse).unwrap_or_else(|| {
        debug!(grade = %grade, "upstream grade outside A-F, defaulting to C");
        Grade::C
    });

    Ok(AnalysisResult {
        transparency_grade,
        score: score_field(&body),
        summary: string_list(Some(summary)),
        red_flags: red_flag_list(body.get("redFlags")),
        user_insight: scalar_text(insight),
    })
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

fn required<'v>(body: &'v Value, field: &'static str) -> Result<&'v Value, Unavailable> {
    body.get(field)
        .filter(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
        .ok_or(Unavailable::MissingField(field))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(scalar_text)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(other) => vec![scalar_text(other)],
    }
}

fn score_field(body: &Value) -> Option<i32> {
    body.get("score")
        .and_then(Value::as_f64)
        .map(|s| s.round().clamp(0.0, 100.0) as i32)
}

fn red_flag_list(value: Option<&Value>) -> Vec<RedFlag> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(red_flag_from_value).collect(),
        _ => Vec::new(),
    }
}

fn red_flag_from_value(value: &Value) -> Option<RedFlag> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(RedFlag {
            severity: Severity::Medium,
            description: s.trim().to_string(),
            clause: AI_CLAUSE_PLACEHOLDER.to_string(),
            category: None,
        }),
        Value::Object(map) => {
            let description = map
                .get("description")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())?;
            let severity = map
                .get("severity")
                .and_then(Value::as_str)
                .and_then(Severity::parse)
                .unwrap_or(Severity::Medium);
            let clause = map
                .get("clause")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(AI_CLAUSE_PLACEHOLDER);
            let category = map
                .get("category")
                .or_else(|| map.get("type"))
                .and_then(|v| serde_json::from_value(v.clone()).ok());
            Some(RedFlag {
                severity,
                description: description.to_string(),
                clause: clause.to_string(),
                category,
            })
        }
        _ => None,
    }
}
