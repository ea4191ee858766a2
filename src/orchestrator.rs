//! Strategy chain: remote strategies in priority order, then the rule-based
//! analyzer, which always answers.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::remote::{ChatCompletionStrategy, TextGenerationStrategy, Unavailable};
use crate::rules::RuleBasedAnalyzer;
use crate::{AnalysisResult, DocumentKind, HP};

/// Credential value shipped in settings templates; never sent upstream.
pub const PLACEHOLDER_API_KEY: &str = "your-openai-api-key-here";

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisRequest<'a> {
    pub text: &'a str,
    pub url: &'a str,
    pub title: &'a str,
    pub credentials: Option<&'a str>,
}

impl<'a> AnalysisRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: &'a str) -> Self {
        self.url = url;
        self
    }

    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn with_credentials(mut self, credentials: Option<&'a str>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_title(self.title)
    }

    /// Credentials that are present, non-blank and not the template placeholder.
    pub fn usable_credentials(&self) -> Option<&'a str> {
        self.credentials
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != PLACEHOLDER_API_KEY)
    }
}

pub trait AnalysisStrategy {
    fn name(&self) -> &str;

    /// Strategies that need caller credentials are skipped without them.
    fn requires_credentials(&self) -> bool {
        false
    }

    fn analyze(&self, request: &AnalysisRequest<'_>) -> Result<AnalysisResult, Unavailable>;
}

pub struct AnalysisOrchestrator {
    strategies: Vec<Box<dyn AnalysisStrategy>>,
    rules: RuleBasedAnalyzer<'static>,
}

impl Default for AnalysisOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisOrchestrator {
    /// Orchestrator without remote strategies.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
            rules: RuleBasedAnalyzer::default(),
        }
    }

    /// Free text-generation endpoints first, then the premium chat endpoint.
    pub fn from_config(config: &Config) -> Self {
        let mut orchestrator = Self::new();
        for endpoint in &config.text_generation_endpoints {
            orchestrator = orchestrator.with_strategy(
                TextGenerationStrategy::new(endpoint.as_str(), config.timeout)
                    .with_token(config.text_generation_token.clone())
                    .with_length_parameter(config.text_generation_length_parameter),
            );
        }
        orchestrator.with_strategy(ChatCompletionStrategy::new(
            config.chat_endpoint.as_str(),
            config.chat_model.as_str(),
            config.timeout,
        ))
    }

    /// Append a strategy after the ones already registered.
    pub fn with_strategy(mut self, strategy: impl AnalysisStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn analyze_text(&self, request: &AnalysisRequest<'_>) -> AnalysisResult {
        for strategy in &self.strategies {
            if strategy.requires_credentials() && request.usable_credentials().is_none() {
                debug!(strategy = strategy.name(), "skipping strategy without usable credentials");
                continue;
            }
            debug!(strategy = strategy.name(), "trying analysis strategy");
            match strategy.analyze(request) {
                Ok(result) => {
                    info!(
                        strategy = strategy.name(),
                        grade = %result.transparency_grade,
                        "analysis strategy answered"
                    );
                    return normalize(result);
                }
                Err(reason) => {
                    warn!(
                        strategy = strategy.name(),
                        error = %reason,
                        "analysis strategy unavailable, falling back"
                    );
                }
            }
        }

        debug!("using rule-based analysis");
        self.rules.analyze(request.text, request.kind())
    }
}

fn normalize(mut result: AnalysisResult) -> AnalysisResult {
    result.red_flags.truncate(HP.red_flag_cap);
    result.score = result.score.map(|s| s.clamp(0, 100));
    result
}

