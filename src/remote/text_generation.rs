use std::time::Duration;

use serde_json::{json, Map, Value};
use tracing::debug;

use super::{build_agent, parse, post_json, truncate_chars, Unavailable};
use crate::orchestrator::{AnalysisRequest, AnalysisStrategy};
use crate::{AnalysisResult, DocumentKind, HP};

/// Name of the generation-length field in the request parameters. Hosted
/// inference APIs disagree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthParameter {
    #[default]
    MaxLength,
    MaxNewTokens,
}

impl LengthParameter {
    /// Accepts the wire names `max_length` and `max_new_tokens`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "max_length" => Some(LengthParameter::MaxLength),
            "max_new_tokens" => Some(LengthParameter::MaxNewTokens),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            LengthParameter::MaxLength => "max_length",
            LengthParameter::MaxNewTokens => "max_new_tokens",
        }
    }
}

/// Free text-generation endpoint taking `{inputs, parameters}`.
pub struct TextGenerationStrategy {
    endpoint: String,
    token: Option<String>,
    length_parameter: LengthParameter,
    max_tokens: u32,
    temperature: f64,
    agent: ureq::Agent,
}

impl TextGenerationStrategy {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            length_parameter: LengthParameter::default(),
            max_tokens: 500,
            temperature: 0.3,
            agent: build_agent(timeout),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_length_parameter(mut self, length_parameter: LengthParameter) -> Self {
        self.length_parameter = length_parameter;
        self
    }

    pub fn prompt(kind: DocumentKind, text: &str) -> String {
        let excerpt = truncate_chars(text, HP.text_generation_input_chars);
        format!(
            "Analyze this {} and rate its transparency from A-F. List concerning clauses:\n\n\
             {excerpt}\n\n\
             Provide: Grade (A-F), 3 key points, and concerning issues.",
            kind.noun()
        )
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut parameters = Map::new();
        parameters.insert(self.length_parameter.key().to_string(), json!(self.max_tokens));
        parameters.insert("temperature".to_string(), json!(self.temperature));
        json!({
            "inputs": prompt,
            "parameters": parameters,
        })
    }
}

impl AnalysisStrategy for TextGenerationStrategy {
    fn name(&self) -> &str {
        &self.endpoint
    }

    fn analyze(&self, request: &AnalysisRequest<'_>) -> Result<AnalysisResult, Unavailable> {
        let kind = request.kind();
        let prompt = Self::prompt(kind, request.text);
        debug!(endpoint = %self.endpoint, prompt_chars = prompt.len(), "calling text-generation endpoint");

        let payload = post_json(
            &self.agent,
            &self.endpoint,
            self.token.as_deref(),
            &self.request_body(&prompt),
        )?;
        let generated =
            parse::generated_text(&payload).ok_or(Unavailable::MissingField("generated_text"))?;
        parse::text_generation(&generated, &prompt, kind)
    }
}
