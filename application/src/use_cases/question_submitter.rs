//! Inbound boundary used by the presentation layer.
//!
//! The HTTP surface only needs "ask this and give me an answer". A
//! [`QuestionSubmitter`] is either a [`DocumentQuestionSubmitter`] bound to
//! the configured document, or an [`UnconfiguredSubmitter`] that reports why
//! the relay cannot answer (missing API key or document id). The latter
//! lets the service start and report the problem on the first request.

use crate::use_cases::submit_question::{SubmitQuestionError, SubmitQuestionUseCase};
use async_trait::async_trait;
use relay_domain::{AnswerResult, DocumentId};

#[async_trait]
pub trait QuestionSubmitter: Send + Sync {
    async fn submit(&self, question: &str) -> Result<AnswerResult, SubmitQuestionError>;
}

/// Submits every question against one fixed document.
pub struct DocumentQuestionSubmitter {
    use_case: SubmitQuestionUseCase,
    document_id: DocumentId,
}

impl DocumentQuestionSubmitter {
    pub fn new(use_case: SubmitQuestionUseCase, document_id: DocumentId) -> Self {
        Self {
            use_case,
            document_id,
        }
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }
}

#[async_trait]
impl QuestionSubmitter for DocumentQuestionSubmitter {
    async fn submit(&self, question: &str) -> Result<AnswerResult, SubmitQuestionError> {
        self.use_case.execute(&self.document_id, question).await
    }
}

/// Fails every question with a configuration error.
pub struct UnconfiguredSubmitter {
    reason: String,
}

impl UnconfiguredSubmitter {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl QuestionSubmitter for UnconfiguredSubmitter {
    async fn submit(&self, _question: &str) -> Result<AnswerResult, SubmitQuestionError> {
        Err(SubmitQuestionError::Configuration(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AskParams;
    use crate::testing::{MockGateway, doc};
    use crate::use_cases::session_store::SessionStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_document_submitter_uses_bound_document() {
        let gateway = Arc::new(MockGateway::new());
        let sessions = Arc::new(SessionStore::new(gateway.clone()));
        let use_case = SubmitQuestionUseCase::new(gateway.clone(), sessions.clone(), AskParams::default());
        let submitter = DocumentQuestionSubmitter::new(use_case, doc("doc-7"));

        let answer = submitter.submit("Hours?").await.unwrap();
        assert_eq!(answer.text, "ok");
        let session = sessions.current().await.unwrap();
        assert!(session.is_bound_to(&doc("doc-7")));
    }

    #[tokio::test]
    async fn test_unconfigured_submitter_reports_reason() {
        let submitter = UnconfiguredSubmitter::new("HUMATA_API_KEY is not set");
        let err = submitter.submit("Hours?").await.unwrap_err();
        assert_eq!(
            err,
            SubmitQuestionError::Configuration("HUMATA_API_KEY is not set".to_string())
        );
    }
}
