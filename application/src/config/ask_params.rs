//! Ask parameters — how questions are put to the upstream.
//!
//! [`AskParams`] groups the static settings the
//! [`SubmitQuestionUseCase`](crate::use_cases::submit_question::SubmitQuestionUseCase)
//! attaches to every question. These are application-layer concerns, not
//! domain policy.

use relay_domain::DEFAULT_FALLBACK_ANSWER;
use std::time::Duration;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskParams {
    /// Upstream model name sent with every question.
    pub model: String,
    /// Request answers grounded strictly in the document.
    pub grounded: bool,
    /// Prefer event-stream replies.
    pub stream: bool,
    /// Returned when the upstream produced no usable answer.
    pub fallback_answer: String,
    /// Wait this long after creating a conversation before the first
    /// question on it. `None` asks immediately.
    pub settle_delay: Option<Duration>,
}

impl Default for AskParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            grounded: true,
            stream: true,
            fallback_answer: DEFAULT_FALLBACK_ANSWER.to_string(),
            settle_delay: None,
        }
    }
}

impl AskParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_grounded(mut self, grounded: bool) -> Self {
        self.grounded = grounded;
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_fallback_answer(mut self, fallback: impl Into<String>) -> Self {
        self.fallback_answer = fallback.into();
        self
    }

    pub fn with_settle_delay(mut self, delay: Option<Duration>) -> Self {
        self.settle_delay = delay.filter(|d| !d.is_zero());
        self
    }
}
