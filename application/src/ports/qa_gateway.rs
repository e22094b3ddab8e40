//! Document Q&A gateway port
//!
//! Defines the interface for talking to the upstream question-answering API.
//! The port deals in raw JSON bodies and raw stream lines; interpreting them
//! (identifier fields, answer assembly) is application and domain logic.

use async_trait::async_trait;
use relay_domain::{AnswerAssembler, DocumentId};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The upstream was reached and answered with a non-success status.
    #[error("Upstream responded with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The upstream answered successfully but the body could not be read.
    #[error("Malformed upstream response: {0}")]
    MalformedBody(String),

    /// The upstream could not be reached, or the connection broke.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,
}

impl GatewayError {
    /// True when the upstream was never reached (or stopped responding).
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::ConnectionError(_) | GatewayError::Timeout)
    }
}

/// A question addressed to an existing upstream conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub session_id: String,
    pub question: String,
    pub model: String,
    /// Ask for answers grounded strictly in the document.
    pub grounded: bool,
    /// Prefer an event-stream reply over a single JSON object.
    pub stream: bool,
}

/// Handle for receiving raw event-stream lines from the upstream.
///
/// Wraps an `mpsc::Receiver` fed by the adapter's reader task. Dropping the
/// handle closes the channel, which stops the reader and the underlying
/// request.
pub struct FragmentStream {
    receiver: mpsc::Receiver<Result<String, GatewayError>>,
}

impl FragmentStream {
    pub fn new(receiver: mpsc::Receiver<Result<String, GatewayError>>) -> Self {
        Self { receiver }
    }

    /// Build a stream that yields the given lines and then closes.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let (tx, rx) = mpsc::channel(lines.len().max(1));
        for line in lines {
            // Capacity matches the line count, so this never fills up
            let _ = tx.try_send(Ok(line));
        }
        Self::new(rx)
    }

    /// Receive the next line, or `None` once the upstream closed the stream.
    pub async fn next_line(&mut self) -> Option<Result<String, GatewayError>> {
        self.receiver.recv().await
    }

    /// Feed every line into `assembler` and return the cleaned answer.
    ///
    /// A transport error mid-stream discards everything assembled so far.
    pub async fn assemble(mut self, mut assembler: AnswerAssembler) -> Result<String, GatewayError> {
        while let Some(line) = self.next_line().await {
            assembler.push_line(&line?);
        }
        Ok(assembler.finish())
    }
}

impl std::fmt::Debug for FragmentStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentStream").finish_non_exhaustive()
    }
}

/// The upstream's reply to a question.
#[derive(Debug)]
pub enum AskReply {
    /// A single JSON object, expected to carry an `answer` field.
    Full(Value),
    /// An event stream of `data:` lines.
    Stream(FragmentStream),
}

/// Gateway for the document Q&A upstream
///
/// This port defines how the application layer talks to the upstream API.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait QaGateway: Send + Sync {
    /// Create a conversation bound to `document_id`, returning the raw
    /// response body.
    async fn create_conversation(&self, document_id: &DocumentId) -> Result<Value, GatewayError>;

    /// Ask a question within an existing conversation.
    async fn ask(&self, request: &AskRequest) -> Result<AskReply, GatewayError>;
}
