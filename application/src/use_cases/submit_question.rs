//! Submit Question use case.
//!
//! Relays one question to the upstream document Q&A API:
//!
//! 1. Validate the question
//! 2. Obtain the conversation from the [`SessionStore`]
//! 3. Ask the question within that conversation
//! 4. Read the answer from a single JSON reply, or reassemble it from an
//!    event stream with [`AnswerAssembler`]
//!
//! A non-success status on the question invalidates the conversation so the
//! next question starts a fresh one. Nothing is retried.

use crate::config::AskParams;
use crate::ports::exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger};
use crate::ports::qa_gateway::{AskReply, AskRequest, GatewayError, QaGateway};
use crate::use_cases::session_store::{SessionCreationError, SessionStore};
use relay_domain::util::preview;
use relay_domain::{AnswerAssembler, AnswerResult, DocumentId, DomainError, Question};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while submitting a question.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitQuestionError {
    /// Required settings (API key, document id) are missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(#[from] DomainError),

    #[error("Could not create upstream conversation: {0}")]
    SessionCreation(#[from] SessionCreationError),

    /// The upstream was reached but refused the question, or its reply
    /// could not be read. `status` is `None` for unreadable replies.
    #[error("Upstream question failed{}: {body}", status_suffix(.status))]
    UpstreamQuestion { status: Option<u16>, body: String },

    /// The upstream could not be reached.
    #[error("Could not reach upstream: {0}")]
    Transport(String),
}

impl SubmitQuestionError {
    /// Short machine-readable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitQuestionError::Configuration(_) => "configuration",
            SubmitQuestionError::InvalidQuestion(_) => "invalid_question",
            SubmitQuestionError::SessionCreation(_) => "session_creation",
            SubmitQuestionError::UpstreamQuestion { .. } => "upstream_question",
            SubmitQuestionError::Transport(_) => "transport",
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

/// Use case for relaying a question to the upstream.
pub struct SubmitQuestionUseCase {
    gateway: Arc<dyn QaGateway>,
    sessions: Arc<SessionStore>,
    params: AskParams,
    exchange_logger: Arc<dyn ExchangeLogger>,
}

impl SubmitQuestionUseCase {
    pub fn new(gateway: Arc<dyn QaGateway>, sessions: Arc<SessionStore>, params: AskParams) -> Self {
        Self {
            gateway,
            sessions,
            params,
            exchange_logger: Arc::new(NoExchangeLogger),
        }
    }

    /// Create with an exchange logger.
    pub fn with_exchange_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.exchange_logger = logger;
        self
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn params(&self) -> &AskParams {
        &self.params
    }

    /// Ask `question` about `document_id` and return the cleaned answer.
    pub async fn execute(
        &self,
        document_id: &DocumentId,
        question: &str,
    ) -> Result<AnswerResult, SubmitQuestionError> {
        let question = Question::parse(question)?;
        info!("Relaying question: {}", preview(question.content(), 100));

        let result = self.relay(document_id, &question).await;

        match &result {
            Ok(answer) => {
                info!(
                    "Answer ready ({}, {} bytes)",
                    answer.source,
                    answer.text.len()
                );
                self.exchange_logger.log(ExchangeEvent::new(
                    "answer",
                    serde_json::json!({
                        "source": answer.source,
                        "bytes": answer.text.len(),
                        "text": answer.text,
                    }),
                ));
            }
            Err(e) => {
                warn!("Question failed ({}): {}", e.kind(), e);
                self.exchange_logger.log(ExchangeEvent::new(
                    "question_failed",
                    serde_json::json!({
                        "kind": e.kind(),
                        "error": e.to_string(),
                    }),
                ));
            }
        }

        result
    }

    async fn relay(
        &self,
        document_id: &DocumentId,
        question: &Question,
    ) -> Result<AnswerResult, SubmitQuestionError> {
        let acquired = self.sessions.acquire(document_id).await?;
        let session = acquired.session;

        if acquired.created
            && let Some(delay) = self.params.settle_delay
        {
            debug!("Waiting {:?} for new session {} to settle", delay, session.id());
            tokio::time::sleep(delay).await;
        }

        let request = AskRequest {
            session_id: session.id().to_string(),
            question: question.content().to_string(),
            model: self.params.model.clone(),
            grounded: self.params.grounded,
            stream: self.params.stream,
        };

        self.exchange_logger.log(ExchangeEvent::new(
            "question",
            serde_json::json!({
                "session_id": session.id(),
                "model": request.model,
                "text": request.question,
            }),
        ));

        let reply = match self.gateway.ask(&request).await {
            Ok(reply) => reply,
            Err(GatewayError::Rejected { status, body }) => {
                self.sessions.invalidate(&session).await;
                return Err(SubmitQuestionError::UpstreamQuestion {
                    status: Some(status),
                    body,
                });
            }
            Err(GatewayError::MalformedBody(body)) => {
                return Err(SubmitQuestionError::UpstreamQuestion { status: None, body });
            }
            Err(e) => return Err(SubmitQuestionError::Transport(e.to_string())),
        };

        match reply {
            AskReply::Full(body) => Ok(AnswerResult::full(self.full_answer(&body))),
            AskReply::Stream(stream) => {
                let text = stream
                    .assemble(AnswerAssembler::new(self.params.fallback_answer.as_str()))
                    .await
                    .map_err(|e| SubmitQuestionError::Transport(e.to_string()))?;
                Ok(AnswerResult::streamed(text))
            }
        }
    }

    fn full_answer(&self, body: &Value) -> String {
        body.get("answer")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                debug!("Reply carried no answer: {}", preview(&body.to_string(), 200));
                self.params.fallback_answer.clone()
            })
    }
}
