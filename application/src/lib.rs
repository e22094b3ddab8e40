//! Application layer for docqa-relay
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{AskParams, DEFAULT_MODEL};
pub use ports::{
    exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger},
    qa_gateway::{AskReply, AskRequest, FragmentStream, GatewayError, QaGateway},
};
pub use use_cases::question_submitter::{
    DocumentQuestionSubmitter, QuestionSubmitter, UnconfiguredSubmitter,
};
pub use use_cases::session_store::{AcquiredSession, SessionCreationError, SessionStore};
pub use use_cases::submit_question::{SubmitQuestionError, SubmitQuestionUseCase};
