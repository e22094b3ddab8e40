//! Test doubles shared by the use case tests.

use crate::ports::exchange_logger::{ExchangeEvent, ExchangeLogger};
use crate::ports::qa_gateway::{AskReply, AskRequest, FragmentStream, GatewayError, QaGateway};
use async_trait::async_trait;
use relay_domain::DocumentId;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted reply for one `ask` call.
pub enum MockAsk {
    Full(Value),
    Stream(Vec<String>),
    Reject(u16, &'static str),
    Malformed,
    Unreachable,
}

/// Scripted reply for one `create_conversation` call.
pub enum MockCreate {
    /// Respond `{"id": "conv-N"}` with N counting creations.
    Id,
    /// Respond `{"conversationId": "conv-N"}`.
    ConversationId,
    Body(Value),
    Reject(u16, &'static str),
    Malformed,
    Unreachable,
}

pub struct MockGateway {
    creates: Mutex<VecDeque<MockCreate>>,
    asks: Mutex<VecDeque<MockAsk>>,
    create_delay: Option<Duration>,
    create_calls: AtomicUsize,
    ask_calls: Mutex<Vec<AskRequest>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            creates: Mutex::new(VecDeque::new()),
            asks: Mutex::new(VecDeque::new()),
            create_delay: None,
            create_calls: AtomicUsize::new(0),
            ask_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_creates(self, creates: Vec<MockCreate>) -> Self {
        *self.creates.lock().unwrap() = creates.into();
        self
    }

    pub fn with_asks(self, asks: Vec<MockAsk>) -> Self {
        *self.asks.lock().unwrap() = asks.into();
        self
    }

    pub fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = Some(delay);
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn ask_calls(&self) -> Vec<AskRequest> {
        self.ask_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QaGateway for MockGateway {
    async fn create_conversation(&self, _document_id: &DocumentId) -> Result<Value, GatewayError> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.create_delay {
            tokio::time::sleep(delay).await;
        }
        let scripted = self.creates.lock().unwrap().pop_front().unwrap_or(MockCreate::Id);
        match scripted {
            MockCreate::Id => Ok(json!({ "id": format!("conv-{n}") })),
            MockCreate::ConversationId => Ok(json!({ "conversationId": format!("conv-{n}") })),
            MockCreate::Body(body) => Ok(body),
            MockCreate::Reject(status, body) => Err(GatewayError::Rejected {
                status,
                body: body.to_string(),
            }),
            MockCreate::Malformed => Err(GatewayError::MalformedBody("<html>".to_string())),
            MockCreate::Unreachable => Err(GatewayError::ConnectionError(
                "connection refused".to_string(),
            )),
        }
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskReply, GatewayError> {
        self.ask_calls.lock().unwrap().push(request.clone());
        let scripted = self
            .asks
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockAsk::Full(json!({ "answer": "ok" })));
        match scripted {
            MockAsk::Full(body) => Ok(AskReply::Full(body)),
            MockAsk::Stream(lines) => Ok(AskReply::Stream(FragmentStream::from_lines(lines))),
            MockAsk::Reject(status, body) => Err(GatewayError::Rejected {
                status,
                body: body.to_string(),
            }),
            MockAsk::Malformed => Err(GatewayError::MalformedBody("not json".to_string())),
            MockAsk::Unreachable => Err(GatewayError::Timeout),
        }
    }
}

/// Exchange logger that keeps event types in memory.
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<(&'static str, Value)>>,
}

impl RecordingLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn events(&self) -> Vec<(&'static str, Value)> {
        self.events.lock().unwrap().clone()
    }
}

impl ExchangeLogger for RecordingLogger {
    fn log(&self, event: ExchangeEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

pub fn data_line(content: &str) -> String {
    format!("data: {}", json!({ "content": content }))
}

pub fn doc(id: &str) -> DocumentId {
    DocumentId::parse(id).unwrap()
}
