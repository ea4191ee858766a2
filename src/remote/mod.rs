//! Remote analysis strategies backed by hosted text models.
//!
//! Every failure mode, transport or payload, comes back as [`Unavailable`] so
//! the orchestrator can move on to the next strategy.

use std::borrow::Cow;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

pub mod chat;
pub mod parse;
pub mod text_generation;

pub use chat::ChatCompletionStrategy;
pub use text_generation::{LengthParameter, TextGenerationStrategy};

#[derive(Debug, Error)]
pub enum Unavailable {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),
    #[error("upstream payload is missing `{0}`")]
    MissingField(&'static str),
    #[error("upstream returned no text")]
    EmptyResponse,
    #[error("no usable credentials")]
    MissingCredentials,
}

impl From<ureq::Error> for Unavailable {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => Unavailable::Status(status),
            ureq::Error::Transport(transport) => Unavailable::Transport(transport.to_string()),
        }
    }
}

pub(crate) fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout_read(timeout)
        .timeout_write(timeout)
        .user_agent(concat!("fineprint/", env!("CARGO_PKG_VERSION")))
        .build()
}

pub(crate) fn post_json(
    agent: &ureq::Agent,
    endpoint: &str,
    bearer: Option<&str>,
    payload: &Value,
) -> Result<Value, Unavailable> {
    let mut request = agent
        .post(endpoint)
        .set("Content-Type", "application/json")
        .set("Accept", "application/json");
    if let Some(token) = bearer {
        request = request.set("Authorization", &format!("Bearer {token}"));
    }
    let response = request.send_json(payload)?;
    serde_json::from_reader(response.into_reader())
        .map_err(|e| Unavailable::MalformedPayload(e.to_string()))
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `...`.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}
