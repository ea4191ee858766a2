use std::time::Duration;

use crate::remote::LengthParameter;

const ENV_TEXT_GENERATION_ENDPOINTS: &str = "FINEPRINT_TEXT_GENERATION_ENDPOINTS";
const ENV_TEXT_GENERATION_TOKEN: &str = "HF_API_TOKEN";
const ENV_TEXT_GENERATION_LENGTH_PARAM: &str = "FINEPRINT_TEXT_GENERATION_LENGTH_PARAM";
const ENV_CHAT_ENDPOINT: &str = "FINEPRINT_CHAT_ENDPOINT";
const ENV_CHAT_MODEL: &str = "FINEPRINT_CHAT_MODEL";
const ENV_TIMEOUT_MS: &str = "FINEPRINT_TIMEOUT_MS";
const ENV_API_KEY: &str = "OPENAI_API_KEY";

pub const DEFAULT_TEXT_GENERATION_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/microsoft/DialoGPT-medium";
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";
const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Runtime configuration for the remote strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Free endpoints, tried in order. Empty disables them.
    pub text_generation_endpoints: Vec<String>,
    pub text_generation_token: Option<String>,
    /// `max_length` for Hugging Face style APIs, `max_new_tokens` for local
    /// servers such as Ollama.
    pub text_generation_length_parameter: LengthParameter,
    pub chat_endpoint: String,
    pub chat_model: String,
    /// Premium credentials passed along with each request.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text_generation_endpoints: vec![DEFAULT_TEXT_GENERATION_ENDPOINT.to_string()],
            text_generation_token: None,
            text_generation_length_parameter: LengthParameter::default(),
            chat_endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`; unset or invalid values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let text_generation_endpoints = match lookup(ENV_TEXT_GENERATION_ENDPOINTS) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.text_generation_endpoints,
        };

        let timeout = match lookup(ENV_TIMEOUT_MS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    tracing::warn!(variable = ENV_TIMEOUT_MS, value = %raw, "invalid timeout, using default");
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        let length_parameter = non_blank(lookup(ENV_TEXT_GENERATION_LENGTH_PARAM));
        let text_generation_length_parameter = match length_parameter {
            Some(raw) => LengthParameter::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    variable = ENV_TEXT_GENERATION_LENGTH_PARAM,
                    value = %raw,
                    "unknown length parameter, using default"
                );
                defaults.text_generation_length_parameter
            }),
            None => defaults.text_generation_length_parameter,
        };

        Self {
            text_generation_endpoints,
            text_generation_token: non_blank(lookup(ENV_TEXT_GENERATION_TOKEN)),
            text_generation_length_parameter,
            chat_endpoint: non_blank(lookup(ENV_CHAT_ENDPOINT)).unwrap_or(defaults.chat_endpoint),
            chat_model: non_blank(lookup(ENV_CHAT_MODEL)).unwrap_or(defaults.chat_model),
            api_key: non_blank(lookup(ENV_API_KEY)),
            timeout,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
