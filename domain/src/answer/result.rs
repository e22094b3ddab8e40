//! Answer result value objects

use serde::{Deserialize, Serialize};

/// Text used when the upstream produced no usable answer.
pub const DEFAULT_FALLBACK_ANSWER: &str = "No answer was found in the documents.";

/// How the upstream delivered the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// A single JSON object carrying the whole answer.
    FullResponse,
    /// An event stream of fragments reassembled locally.
    StreamedResponse,
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerSource::FullResponse => write!(f, "full"),
            AnswerSource::StreamedResponse => write!(f, "streamed"),
        }
    }
}

/// The answer relayed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub text: String,
    pub source: AnswerSource,
}

impl AnswerResult {
    pub fn full(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::FullResponse,
        }
    }

    pub fn streamed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::StreamedResponse,
        }
    }
}
