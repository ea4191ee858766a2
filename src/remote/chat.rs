use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use super::{build_agent, parse, post_json, truncate_chars, Unavailable};
use crate::orchestrator::{AnalysisRequest, AnalysisStrategy};
use crate::{AnalysisResult, HP};

const SYSTEM_PROMPT: &str = "\
You are a legal document analyzer specializing in Terms of Service and Privacy Policy analysis.
Analyze the provided document and return a JSON response with the following structure:
{
  \"transparencyGrade\": \"A-F letter grade\",
  \"summary\": [\"bullet point 1\", \"bullet point 2\", \"bullet point 3\", \"bullet point 4\", \"bullet point 5\"],
  \"redFlags\": [
    {\"severity\": \"High/Medium/Low\", \"description\": \"Description of concerning clause\"}
  ],
  \"userInsight\": \"A paragraph explaining what this means for the average user in plain English\"
}

Focus on identifying concerning clauses like:
- Broad data collection practices
- Unclear data sharing policies
- Difficult account deletion processes
- Binding arbitration clauses
- Automatic renewals
- Overly broad liability limitations
- Unclear termination policies

Provide practical, actionable insights that help users understand the real implications.";

/// Premium chat-completion backend returning the structured JSON contract.
/// Only consulted when the caller supplies usable credentials.
pub struct ChatCompletionStrategy {
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    agent: ureq::Agent,
}

impl ChatCompletionStrategy {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            max_tokens: 1500,
            temperature: 0.3,
            agent: build_agent(timeout),
        }
    }

    fn request_body(&self, request: &AnalysisRequest<'_>) -> Value {
        let excerpt = truncate_chars(request.text, HP.chat_input_chars);
        let user = format!(
            "Please analyze this Terms of Service or Privacy Policy document:\n\n\
             Title: {}\nURL: {}\n\nDocument text:\n{excerpt}",
            request.title, request.url
        );
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user },
            ],
            "response_format": { "type": "json_object" },
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        })
    }
}

impl AnalysisStrategy for ChatCompletionStrategy {
    fn name(&self) -> &str {
        &self.endpoint
    }

    fn requires_credentials(&self) -> bool {
        true
    }

    fn analyze(&self, request: &AnalysisRequest<'_>) -> Result<AnalysisResult, Unavailable> {
        let api_key = request
            .usable_credentials()
            .ok_or(Unavailable::MissingCredentials)?;
        debug!(endpoint = %self.endpoint, model = %self.model, "calling chat-completion endpoint");

        let payload = post_json(
            &self.agent,
            &self.endpoint,
            Some(api_key),
            &self.request_body(request),
        )?;
        parse::chat_completion(&payload)
    }
}
